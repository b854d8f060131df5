//! Verification records and their amendment history.

use agriproof_types::{
    BlockHeight, PracticeType, Principal, ProofHash, VerificationId, VerificationStatus,
};
use serde::{Deserialize, Serialize};

/// A verification of one farmer's practice.
///
/// Identity and evidence fields are fixed at creation. Only the decision
/// fields (score, status, reason) and the timestamp move, and only through
/// the registry's transitions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    id: VerificationId,
    practice_id: u64,
    verifier: Principal,
    proof_hash: ProofHash,
    /// Block height of the most recent write.
    timestamp: BlockHeight,
    score: u32,
    status: VerificationStatus,
    reason: Option<String>,
    practice_type: PracticeType,
    impact_level: u8,
    location: String,
    evidence_url: Option<String>,
    farmer: Principal,
}

impl Verification {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn pending(
        id: VerificationId,
        practice_id: u64,
        verifier: Principal,
        proof_hash: ProofHash,
        practice_type: PracticeType,
        impact_level: u8,
        location: String,
        evidence_url: Option<String>,
        farmer: Principal,
        now: BlockHeight,
    ) -> Self {
        Self {
            id,
            practice_id,
            verifier,
            proof_hash,
            timestamp: now,
            score: 0,
            status: VerificationStatus::Pending,
            reason: None,
            practice_type,
            impact_level,
            location,
            evidence_url,
            farmer,
        }
    }

    pub fn id(&self) -> VerificationId {
        self.id
    }

    pub fn practice_id(&self) -> u64 {
        self.practice_id
    }

    pub fn verifier(&self) -> &Principal {
        &self.verifier
    }

    pub fn proof_hash(&self) -> &ProofHash {
        &self.proof_hash
    }

    pub fn timestamp(&self) -> BlockHeight {
        self.timestamp
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> VerificationStatus {
        self.status
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn practice_type(&self) -> PracticeType {
        self.practice_type
    }

    pub fn impact_level(&self) -> u8 {
        self.impact_level
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn evidence_url(&self) -> Option<&str> {
        self.evidence_url.as_deref()
    }

    pub fn farmer(&self) -> &Principal {
        &self.farmer
    }

    pub(crate) fn approve(&mut self, score: u32, reason: Option<String>, now: BlockHeight) {
        self.status = VerificationStatus::Approved;
        self.score = score;
        self.reason = reason;
        self.timestamp = now;
    }

    pub(crate) fn reject(&mut self, reason: String, now: BlockHeight) {
        self.status = VerificationStatus::Rejected;
        self.score = 0;
        self.reason = Some(reason);
        self.timestamp = now;
    }

    /// Overwrite the decision details, keeping the status.
    pub(crate) fn amend(&mut self, score: u32, reason: Option<String>, now: BlockHeight) {
        self.score = score;
        self.reason = reason;
        self.timestamp = now;
    }
}

/// The latest amendment made to a decided verification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationUpdate {
    pub update_score: u32,
    /// Status of the record when the amendment was made.
    pub update_status: VerificationStatus,
    pub update_reason: Option<String>,
    pub update_timestamp: BlockHeight,
    pub updater: Principal,
}
