//! Verification parameters and the fixed input bounds of the engine.
//!
//! `VerificationParams` seeds a registry's configuration at construction.
//! Everything here except the constants can later be adjusted through the
//! registry's setter contracts once an authority is installed.

use crate::amount::MicroStx;
use crate::error::ScoreBoundsError;
use serde::{Deserialize, Serialize};

/// Hard upper bound for any verification score.
pub const SCORE_CEILING: u32 = 100;

/// Inclusive range of accepted impact levels.
pub const MIN_IMPACT_LEVEL: u32 = 1;
pub const MAX_IMPACT_LEVEL: u32 = 10;

/// Maximum location length in characters. Locations must also be non-empty.
pub const MAX_LOCATION_LEN: usize = 100;

/// Maximum evidence URL length in characters.
pub const MAX_EVIDENCE_URL_LEN: usize = 256;

/// Maximum decision/amendment reason length in characters.
pub const MAX_REASON_LEN: usize = 256;

/// Initial parameters of a verification registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationParams {
    /// Fee (µSTX) paid by the verifier to the authority on every request.
    #[serde(default = "default_verification_fee")]
    pub verification_fee: MicroStx,

    /// Lowest score an approval or amendment may carry.
    #[serde(default = "default_min_verification_score")]
    pub min_verification_score: u32,

    /// Highest score an approval or amendment may carry.
    #[serde(default = "default_max_verification_score")]
    pub max_verification_score: u32,

    /// Total number of verifications the registry will ever accept.
    #[serde(default = "default_max_verifications")]
    pub max_verifications: u64,

    /// Review window in blocks. Informational.
    #[serde(default = "default_review_period")]
    pub review_period: u64,

    /// Challenge window in blocks. Informational.
    #[serde(default = "default_challenge_period")]
    pub challenge_period: u64,
}

fn default_verification_fee() -> MicroStx {
    MicroStx::new(500)
}

fn default_min_verification_score() -> u32 {
    50
}

fn default_max_verification_score() -> u32 {
    SCORE_CEILING
}

fn default_max_verifications() -> u64 {
    10_000
}

fn default_review_period() -> u64 {
    144
}

fn default_challenge_period() -> u64 {
    288
}

impl VerificationParams {
    /// Check the score bounds obey `0 < min < max <= 100`.
    pub fn validate(&self) -> Result<(), ScoreBoundsError> {
        let (min, max) = (self.min_verification_score, self.max_verification_score);
        Self::check_min_score(min, max)?;
        Self::check_max_score(min, max)
    }

    /// Whether `min` may serve as the lower bound under upper bound `max`.
    pub fn check_min_score(min: u32, max: u32) -> Result<(), ScoreBoundsError> {
        if min == 0 || min >= max {
            return Err(ScoreBoundsError::Min { min, max });
        }
        Ok(())
    }

    /// Whether `max` may serve as the upper bound over lower bound `min`.
    pub fn check_max_score(min: u32, max: u32) -> Result<(), ScoreBoundsError> {
        if max <= min || max > SCORE_CEILING {
            return Err(ScoreBoundsError::Max { min, max });
        }
        Ok(())
    }

    /// Whether `score` lies within the inclusive score bounds.
    pub fn score_in_bounds(&self, score: u32) -> bool {
        (self.min_verification_score..=self.max_verification_score).contains(&score)
    }
}

impl Default for VerificationParams {
    fn default() -> Self {
        Self {
            verification_fee: default_verification_fee(),
            min_verification_score: default_min_verification_score(),
            max_verification_score: default_max_verification_score(),
            max_verifications: default_max_verifications(),
            review_period: default_review_period(),
            challenge_period: default_challenge_period(),
        }
    }
}
