use agriproof_types::{
    Principal, ScoreBoundsError, TransferError, VerificationId, VerificationStatus,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("caller {caller} is not the verifier {verifier} of this record")]
    NotAuthorized {
        caller: Principal,
        verifier: Principal,
    },

    #[error("principal {0} cannot act as the authority")]
    InvalidAuthority(Principal),

    #[error("practice id must be positive")]
    InvalidPracticeId,

    #[error("proof hash must be 32 bytes, got {0}")]
    InvalidProofHash(usize),

    #[error("score {score} outside [{min}, {max}]")]
    InvalidScore { score: u32, min: u32, max: u32 },

    #[error("verification {0} has already been decided")]
    AlreadyVerified(VerificationId),

    #[error("verification {0} not found")]
    NotFound(VerificationId),

    #[error("reason is {0} characters, limit is 256")]
    InvalidReason(usize),

    #[error("maximum of {0} verifications reached")]
    MaxVerificationsExceeded(u64),

    #[error("verification {id} is {status}; only decided records can be updated")]
    UpdateNotAllowed {
        id: VerificationId,
        status: VerificationStatus,
    },

    #[error("unknown practice type {0:?}")]
    InvalidPracticeType(String),

    #[error("impact level {0} outside [1, 10]")]
    InvalidImpactLevel(u32),

    #[error("location must be 1 to 100 characters, got {0}")]
    InvalidLocation(usize),

    #[error("evidence url is {0} characters, limit is 256")]
    InvalidEvidenceUrl(usize),

    #[error("authority is already set to {0}")]
    AuthorityAlreadySet(Principal),

    #[error("no authority has been configured")]
    AuthorityNotVerified,

    #[error("minimum score {min} must be positive and below maximum {max}")]
    InvalidMinScore { min: u32, max: u32 },

    #[error("maximum score {max} must be above minimum {min} and at most 100")]
    InvalidMaxScore { min: u32, max: u32 },

    #[error("fee transfer failed: {0}")]
    Transfer(#[from] TransferError),
}

impl From<ScoreBoundsError> for VerificationError {
    fn from(err: ScoreBoundsError) -> Self {
        match err {
            ScoreBoundsError::Min { min, max } => Self::InvalidMinScore { min, max },
            ScoreBoundsError::Max { min, max } => Self::InvalidMaxScore { min, max },
        }
    }
}

impl VerificationError {
    /// Numeric error code returned to callers.
    pub fn code(&self) -> u32 {
        match self {
            Self::NotAuthorized { .. } | Self::InvalidAuthority(_) => 100,
            Self::InvalidPracticeId => 101,
            Self::InvalidProofHash(_) => 103,
            Self::InvalidScore { .. } => 105,
            Self::AlreadyVerified(_) => 106,
            Self::NotFound(_) => 107,
            Self::InvalidReason(_) => 110,
            Self::MaxVerificationsExceeded(_) => 112,
            Self::UpdateNotAllowed { .. } => 114,
            Self::InvalidPracticeType(_) => 116,
            Self::InvalidImpactLevel(_) => 117,
            Self::InvalidLocation(_) => 118,
            Self::InvalidEvidenceUrl(_) => 119,
            Self::AuthorityAlreadySet(_) => 120,
            Self::AuthorityNotVerified => 123,
            Self::InvalidMinScore { .. } => 124,
            Self::InvalidMaxScore { .. } => 125,
            Self::Transfer(e) => e.code(),
        }
    }
}


/// A snapshot whose records cannot belong to any registry history.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("record {record} is not below next id {next_id}")]
    StaleNextId {
        next_id: VerificationId,
        record: VerificationId,
    },

    #[error("record {0} appears more than once")]
    DuplicateRecord(VerificationId),

    #[error("next id {next_id} implies {next_id} records, found {found}")]
    MissingRecords { next_id: VerificationId, found: usize },

    #[error("update for {0} has no decided record")]
    OrphanUpdate(VerificationId),

    #[error("record {0} has more than one update")]
    DuplicateUpdate(VerificationId),
}
