//! Verification request input and its stateless validation.
//!
//! Requests arrive as raw caller input: the proof hash as bytes of any
//! length and the practice type as a name. `validate` turns them into typed
//! values, checking each field in a fixed order so the first bad field
//! decides the error.

use crate::error::VerificationError;
use agriproof_types::params::{
    MAX_EVIDENCE_URL_LEN, MAX_IMPACT_LEVEL, MAX_LOCATION_LEN, MAX_REASON_LEN, MIN_IMPACT_LEVEL,
};
use agriproof_types::{PracticeType, Principal, ProofHash};
use serde::{Deserialize, Serialize};

/// Input to `request_verification`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub practice_id: u64,
    pub proof_hash: Vec<u8>,
    pub practice_type: String,
    pub impact_level: u32,
    pub location: String,
    #[serde(default)]
    pub evidence_url: Option<String>,
    pub farmer: Principal,
}

/// A request whose fields all passed validation.
#[derive(Clone, Debug)]
pub(crate) struct ValidatedRequest {
    pub practice_id: u64,
    pub proof_hash: ProofHash,
    pub practice_type: PracticeType,
    pub impact_level: u8,
    pub location: String,
    pub evidence_url: Option<String>,
    pub farmer: Principal,
}

impl VerificationRequest {
    pub fn new(
        practice_id: u64,
        proof_hash: impl Into<Vec<u8>>,
        practice_type: impl Into<String>,
        impact_level: u32,
        location: impl Into<String>,
        farmer: Principal,
    ) -> Self {
        Self {
            practice_id,
            proof_hash: proof_hash.into(),
            practice_type: practice_type.into(),
            impact_level,
            location: location.into(),
            evidence_url: None,
            farmer,
        }
    }

    pub fn with_evidence_url(mut self, url: impl Into<String>) -> Self {
        self.evidence_url = Some(url.into());
        self
    }

    /// Validate field by field: practice id, proof hash, practice type,
    /// impact level, location, evidence url.
    pub(crate) fn validate(self) -> Result<ValidatedRequest, VerificationError> {
        if self.practice_id == 0 {
            return Err(VerificationError::InvalidPracticeId);
        }

        let proof_hash = ProofHash::try_from(self.proof_hash.as_slice())
            .map_err(|_| VerificationError::InvalidProofHash(self.proof_hash.len()))?;

        let practice_type: PracticeType = self
            .practice_type
            .parse()
            .map_err(|_| VerificationError::InvalidPracticeType(self.practice_type.clone()))?;

        if !(MIN_IMPACT_LEVEL..=MAX_IMPACT_LEVEL).contains(&self.impact_level) {
            return Err(VerificationError::InvalidImpactLevel(self.impact_level));
        }

        let location_len = char_len(&self.location);
        if location_len == 0 || location_len > MAX_LOCATION_LEN {
            return Err(VerificationError::InvalidLocation(location_len));
        }

        if let Some(url) = &self.evidence_url {
            let url_len = char_len(url);
            if url_len > MAX_EVIDENCE_URL_LEN {
                return Err(VerificationError::InvalidEvidenceUrl(url_len));
            }
        }

        Ok(ValidatedRequest {
            practice_id: self.practice_id,
            proof_hash,
            practice_type,
            impact_level: self.impact_level as u8,
            location: self.location,
            evidence_url: self.evidence_url,
            farmer: self.farmer,
        })
    }
}

/// Check a decision or amendment reason against the length limit.
pub(crate) fn check_reason(reason: &str) -> Result<(), VerificationError> {
    let len = char_len(reason);
    if len > MAX_REASON_LEN {
        return Err(VerificationError::InvalidReason(len));
    }
    Ok(())
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
