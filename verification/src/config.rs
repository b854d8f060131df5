//! Registry configuration and its setter contracts.
//!
//! The authority can be installed exactly once. Every other setting may be
//! changed only after that, and the score bounds must keep
//! `0 < min < max <= 100` at all times. Tightening the bounds never rewrites
//! scores that were stored under the old bounds.

use crate::error::VerificationError;
use agriproof_types::{MicroStx, Principal, VerificationParams};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct VerificationConfig {
    authority: Option<Principal>,
    params: VerificationParams,
}

/// Serialized form of [`VerificationConfig`], checked on the way in.
#[derive(Deserialize)]
struct RawConfig {
    authority: Option<Principal>,
    params: VerificationParams,
}

impl TryFrom<RawConfig> for VerificationConfig {
    type Error = VerificationError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let mut config = Self::from_params(raw.params)?;
        if let Some(authority) = raw.authority {
            config.set_authority(authority)?;
        }
        Ok(config)
    }
}

impl VerificationConfig {
    /// Build a configuration from initial parameters, with no authority yet.
    pub fn from_params(params: VerificationParams) -> Result<Self, VerificationError> {
        params.validate()?;
        Ok(Self {
            authority: None,
            params,
        })
    }

    pub fn authority(&self) -> Option<&Principal> {
        self.authority.as_ref()
    }

    pub fn verification_fee(&self) -> MicroStx {
        self.params.verification_fee
    }

    pub fn min_verification_score(&self) -> u32 {
        self.params.min_verification_score
    }

    pub fn max_verification_score(&self) -> u32 {
        self.params.max_verification_score
    }

    pub fn max_verifications(&self) -> u64 {
        self.params.max_verifications
    }

    pub fn review_period(&self) -> u64 {
        self.params.review_period
    }

    pub fn challenge_period(&self) -> u64 {
        self.params.challenge_period
    }

    pub fn params(&self) -> &VerificationParams {
        &self.params
    }

    /// The configured authority, or `AuthorityNotVerified`.
    pub fn require_authority(&self) -> Result<&Principal, VerificationError> {
        self.authority
            .as_ref()
            .ok_or(VerificationError::AuthorityNotVerified)
    }

    /// Check `score` against the current bounds.
    pub fn check_score(&self, score: u32) -> Result<(), VerificationError> {
        if self.params.score_in_bounds(score) {
            Ok(())
        } else {
            Err(VerificationError::InvalidScore {
                score,
                min: self.params.min_verification_score,
                max: self.params.max_verification_score,
            })
        }
    }

    pub fn set_authority(&mut self, principal: Principal) -> Result<(), VerificationError> {
        if principal.is_burn() {
            return Err(VerificationError::InvalidAuthority(principal));
        }
        if let Some(current) = &self.authority {
            return Err(VerificationError::AuthorityAlreadySet(current.clone()));
        }
        self.authority = Some(principal);
        Ok(())
    }

    pub fn set_verification_fee(&mut self, fee: MicroStx) -> Result<(), VerificationError> {
        self.require_authority()?;
        self.params.verification_fee = fee;
        Ok(())
    }

    pub fn set_min_verification_score(&mut self, min: u32) -> Result<(), VerificationError> {
        VerificationParams::check_min_score(min, self.params.max_verification_score)?;
        self.require_authority()?;
        self.params.min_verification_score = min;
        Ok(())
    }

    pub fn set_max_verification_score(&mut self, max: u32) -> Result<(), VerificationError> {
        VerificationParams::check_max_score(self.params.min_verification_score, max)?;
        self.require_authority()?;
        self.params.max_verification_score = max;
        Ok(())
    }
}
