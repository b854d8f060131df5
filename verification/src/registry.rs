//! The verification registry. It owns every record, the rating ledger and the
//! configuration, and exposes the engine's entry points.
//!
//! Each entry point validates completely before it writes anything. The fee
//! transfer of a request is the last check: if the transfer primitive
//! refuses, the request fails and nothing is recorded.

use crate::config::VerificationConfig;
use crate::context::CallContext;
use crate::error::{SnapshotError, VerificationError};
use crate::rating::VerifierRatings;
use crate::request::{check_reason, VerificationRequest};
use crate::state::{Verification, VerificationUpdate};
use agriproof_types::{
    FeeTransfer, MicroStx, PracticeType, Principal, TokenTransfer, VerificationId,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Events emitted by the registry for the embedding environment to process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerificationEvent {
    /// The fee-receiving authority has been installed.
    AuthoritySet { authority: Principal },
    /// A verification fee moved from the verifier to the authority.
    FeeTransferred(FeeTransfer),
    /// A new pending verification was recorded.
    VerificationRequested {
        id: VerificationId,
        verifier: Principal,
        farmer: Principal,
        practice_type: PracticeType,
    },
    /// A pending verification was approved.
    PracticeApproved {
        id: VerificationId,
        verifier: Principal,
        score: u32,
        rating: u64,
    },
    /// A pending verification was rejected.
    PracticeRejected {
        id: VerificationId,
        verifier: Principal,
        rating: u64,
    },
    /// A decided verification was amended.
    VerificationUpdated {
        id: VerificationId,
        updater: Principal,
        score: u32,
    },
}

pub struct VerificationRegistry<T: TokenTransfer> {
    config: VerificationConfig,
    transfer: T,
    next_id: VerificationId,
    verifications: BTreeMap<VerificationId, Verification>,
    /// Latest amendment per verification; each update replaces the last.
    updates: BTreeMap<VerificationId, VerificationUpdate>,
    ratings: VerifierRatings,
    pending_events: Vec<VerificationEvent>,
}

impl<T: TokenTransfer + Default> Default for VerificationRegistry<T> {
    fn default() -> Self {
        Self::new(VerificationConfig::default(), T::default())
    }
}

impl<T: TokenTransfer> VerificationRegistry<T> {
    pub fn new(config: VerificationConfig, transfer: T) -> Self {
        Self {
            config,
            transfer,
            next_id: VerificationId::FIRST,
            verifications: BTreeMap::new(),
            updates: BTreeMap::new(),
            ratings: VerifierRatings::new(),
            pending_events: Vec::new(),
        }
    }

    // ── Configuration ──────────────────────────────────────────────────

    /// Install the authority that receives verification fees. Succeeds once.
    pub fn set_authority_contract(&mut self, principal: Principal) -> Result<(), VerificationError> {
        self.config
            .set_authority(principal.clone())
            .inspect_err(|e| log_rejected("set_authority_contract", e))?;
        tracing::info!(authority = %principal, "authority contract set");
        self.pending_events
            .push(VerificationEvent::AuthoritySet { authority: principal });
        Ok(())
    }

    pub fn set_verification_fee(&mut self, fee: MicroStx) -> Result<(), VerificationError> {
        self.config
            .set_verification_fee(fee)
            .inspect_err(|e| log_rejected("set_verification_fee", e))?;
        tracing::info!(fee = %fee, "verification fee changed");
        Ok(())
    }

    pub fn set_min_verification_score(&mut self, min: u32) -> Result<(), VerificationError> {
        self.config
            .set_min_verification_score(min)
            .inspect_err(|e| log_rejected("set_min_verification_score", e))?;
        tracing::info!(min, "minimum verification score changed");
        Ok(())
    }

    pub fn set_max_verification_score(&mut self, max: u32) -> Result<(), VerificationError> {
        self.config
            .set_max_verification_score(max)
            .inspect_err(|e| log_rejected("set_max_verification_score", e))?;
        tracing::info!(max, "maximum verification score changed");
        Ok(())
    }

    // ── Lifecycle ──────────────────────────────────────────────────────

    /// File a new verification with the caller as verifier.
    ///
    /// Checks, in order: capacity, the request fields (see
    /// [`VerificationRequest`]), that an authority is set, and finally that
    /// the fee transfer to the authority succeeds.
    pub fn request_verification(
        &mut self,
        ctx: &CallContext,
        request: VerificationRequest,
    ) -> Result<VerificationId, VerificationError> {
        self.try_request(ctx, request)
            .inspect_err(|e| log_rejected("request_verification", e))
    }

    fn try_request(
        &mut self,
        ctx: &CallContext,
        request: VerificationRequest,
    ) -> Result<VerificationId, VerificationError> {
        let max = self.config.max_verifications();
        if self.next_id.as_u64() >= max {
            return Err(VerificationError::MaxVerificationsExceeded(max));
        }

        let request = request.validate()?;
        let authority = self.config.require_authority()?.clone();
        let fee = self.config.verification_fee();

        self.transfer.transfer(fee, &ctx.sender, &authority)?;

        let id = self.next_id;
        let record = Verification::pending(
            id,
            request.practice_id,
            ctx.sender.clone(),
            request.proof_hash,
            request.practice_type,
            request.impact_level,
            request.location,
            request.evidence_url,
            request.farmer.clone(),
            ctx.block_height,
        );
        self.verifications.insert(id, record);
        self.next_id = id.next();

        tracing::debug!(
            id = %id,
            verifier = %ctx.sender,
            farmer = %request.farmer,
            practice_type = %request.practice_type,
            height = %ctx.block_height,
            "verification requested"
        );

        self.pending_events
            .push(VerificationEvent::FeeTransferred(FeeTransfer {
                amount: fee,
                from: ctx.sender.clone(),
                to: authority,
            }));
        self.pending_events
            .push(VerificationEvent::VerificationRequested {
                id,
                verifier: ctx.sender.clone(),
                farmer: request.farmer,
                practice_type: request.practice_type,
            });

        Ok(id)
    }

    /// Approve a pending verification with a score within the current bounds.
    pub fn approve_practice(
        &mut self,
        ctx: &CallContext,
        id: VerificationId,
        score: u32,
        reason: Option<String>,
    ) -> Result<(), VerificationError> {
        self.try_approve(ctx, id, score, reason)
            .inspect_err(|e| log_rejected("approve_practice", e))
    }

    fn try_approve(
        &mut self,
        ctx: &CallContext,
        id: VerificationId,
        score: u32,
        reason: Option<String>,
    ) -> Result<(), VerificationError> {
        let record = self
            .verifications
            .get_mut(&id)
            .ok_or(VerificationError::NotFound(id))?;
        check_verifier(record, &ctx.sender)?;
        if !record.status().is_pending() {
            return Err(VerificationError::AlreadyVerified(id));
        }
        self.config.check_score(score)?;
        if let Some(reason) = &reason {
            check_reason(reason)?;
        }

        record.approve(score, reason, ctx.block_height);
        let rating = self.ratings.reward(&ctx.sender);

        tracing::debug!(id = %id, verifier = %ctx.sender, score, rating, "practice approved");
        self.pending_events.push(VerificationEvent::PracticeApproved {
            id,
            verifier: ctx.sender.clone(),
            score,
            rating,
        });
        Ok(())
    }

    /// Reject a pending verification. The score is reset to 0.
    pub fn reject_practice(
        &mut self,
        ctx: &CallContext,
        id: VerificationId,
        reason: String,
    ) -> Result<(), VerificationError> {
        self.try_reject(ctx, id, reason)
            .inspect_err(|e| log_rejected("reject_practice", e))
    }

    fn try_reject(
        &mut self,
        ctx: &CallContext,
        id: VerificationId,
        reason: String,
    ) -> Result<(), VerificationError> {
        let record = self
            .verifications
            .get_mut(&id)
            .ok_or(VerificationError::NotFound(id))?;
        check_verifier(record, &ctx.sender)?;
        if !record.status().is_pending() {
            return Err(VerificationError::AlreadyVerified(id));
        }
        check_reason(&reason)?;

        record.reject(reason, ctx.block_height);
        let rating = self.ratings.penalize(&ctx.sender);

        tracing::debug!(id = %id, verifier = %ctx.sender, rating, "practice rejected");
        self.pending_events.push(VerificationEvent::PracticeRejected {
            id,
            verifier: ctx.sender.clone(),
            rating,
        });
        Ok(())
    }

    /// Amend the score and reason of a decided verification.
    ///
    /// The status is kept. The amendment replaces any earlier
    /// [`VerificationUpdate`] for the same id.
    pub fn update_verification(
        &mut self,
        ctx: &CallContext,
        id: VerificationId,
        score: u32,
        reason: Option<String>,
    ) -> Result<(), VerificationError> {
        self.try_update(ctx, id, score, reason)
            .inspect_err(|e| log_rejected("update_verification", e))
    }

    fn try_update(
        &mut self,
        ctx: &CallContext,
        id: VerificationId,
        score: u32,
        reason: Option<String>,
    ) -> Result<(), VerificationError> {
        let record = self
            .verifications
            .get_mut(&id)
            .ok_or(VerificationError::NotFound(id))?;
        check_verifier(record, &ctx.sender)?;
        let status = record.status();
        if status.is_pending() {
            return Err(VerificationError::UpdateNotAllowed { id, status });
        }
        self.config.check_score(score)?;
        if let Some(reason) = &reason {
            check_reason(reason)?;
        }

        record.amend(score, reason.clone(), ctx.block_height);
        self.updates.insert(
            id,
            VerificationUpdate {
                update_score: score,
                update_status: status,
                update_reason: reason,
                update_timestamp: ctx.block_height,
                updater: ctx.sender.clone(),
            },
        );

        tracing::debug!(id = %id, updater = %ctx.sender, score, %status, "verification updated");
        self.pending_events
            .push(VerificationEvent::VerificationUpdated {
                id,
                updater: ctx.sender.clone(),
                score,
            });
        Ok(())
    }

    // ── Reads ──────────────────────────────────────────────────────────

    /// Total number of verifications ever created.
    pub fn verification_count(&self) -> u64 {
        self.next_id.as_u64()
    }

    pub fn get_verification(&self, id: VerificationId) -> Option<&Verification> {
        self.verifications.get(&id)
    }

    pub fn get_verification_update(&self, id: VerificationId) -> Option<&VerificationUpdate> {
        self.updates.get(&id)
    }

    pub fn verifier_rating(&self, verifier: &Principal) -> u64 {
        self.ratings.get(verifier)
    }

    pub fn config(&self) -> &VerificationConfig {
        &self.config
    }

    /// All records in id order.
    pub fn verifications(&self) -> impl Iterator<Item = &Verification> {
        self.verifications.values()
    }

    pub fn transfer(&self) -> &T {
        &self.transfer
    }

    /// Drain pending events for the environment to process.
    pub fn drain_events(&mut self) -> Vec<VerificationEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ── Persistence ────────────────────────────────────────────────────

    /// Serializable copy of the registry state, excluding pending events
    /// and the transfer primitive.
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            config: self.config.clone(),
            next_id: self.next_id,
            verifications: self.verifications.values().cloned().collect(),
            updates: self
                .updates
                .iter()
                .map(|(id, update)| (*id, update.clone()))
                .collect(),
            ratings: self.ratings.clone(),
        }
    }

    /// Rebuild a registry from a snapshot.
    ///
    /// Record ids must be exactly `0..next_id` and every update must belong
    /// to a decided record. The configuration is checked when it is
    /// deserialized.
    pub fn restore(snapshot: RegistrySnapshot, transfer: T) -> Result<Self, SnapshotError> {
        let next_id = snapshot.next_id;

        let mut verifications = BTreeMap::new();
        for record in snapshot.verifications {
            let id = record.id();
            if id >= next_id {
                return Err(SnapshotError::StaleNextId { next_id, record: id });
            }
            if verifications.insert(id, record).is_some() {
                return Err(SnapshotError::DuplicateRecord(id));
            }
        }
        if verifications.len() as u64 != next_id.as_u64() {
            return Err(SnapshotError::MissingRecords {
                next_id,
                found: verifications.len(),
            });
        }

        let mut updates = BTreeMap::new();
        for (id, update) in snapshot.updates {
            let decided = verifications
                .get(&id)
                .is_some_and(|record: &Verification| record.status().is_decided());
            if !decided {
                return Err(SnapshotError::OrphanUpdate(id));
            }
            if updates.insert(id, update).is_some() {
                return Err(SnapshotError::DuplicateUpdate(id));
            }
        }

        Ok(Self {
            config: snapshot.config,
            transfer,
            next_id,
            verifications,
            updates,
            ratings: snapshot.ratings,
            pending_events: Vec::new(),
        })
    }
}

/// Serializable registry state for persistence across restarts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub config: VerificationConfig,
    pub next_id: VerificationId,
    pub verifications: Vec<Verification>,
    pub updates: Vec<(VerificationId, VerificationUpdate)>,
    pub ratings: VerifierRatings,
}

fn check_verifier(record: &Verification, caller: &Principal) -> Result<(), VerificationError> {
    if record.verifier() != caller {
        return Err(VerificationError::NotAuthorized {
            caller: caller.clone(),
            verifier: record.verifier().clone(),
        });
    }
    Ok(())
}

fn log_rejected(op: &'static str, err: &VerificationError) {
    tracing::debug!(op, code = err.code(), error = %err, "call rejected");
}
