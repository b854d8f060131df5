//! Error types shared across crates.

use thiserror::Error;

/// Errors raised while constructing or parsing the fundamental types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid principal: {0:?}")]
    InvalidPrincipal(String),

    #[error("proof hash must be {expected} bytes, got {actual}")]
    InvalidProofHashLength { expected: usize, actual: usize },

    #[error("proof hash is not valid hex: {0}")]
    InvalidProofHashHex(String),

    #[error("unknown practice type: {0:?}")]
    UnknownPracticeType(String),
}

/// Score bounds that break `0 < min < max <= 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScoreBoundsError {
    #[error("minimum score {min} must be positive and below maximum {max}")]
    Min { min: u32, max: u32 },

    #[error("maximum score {max} must be above minimum {min} and at most 100")]
    Max { min: u32, max: u32 },
}

/// Failure of the token-transfer primitive.
///
/// Codes follow the chain's native transfer errors so they can be surfaced
/// unchanged to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u64, available: u64 },

    #[error("sender and recipient are the same principal")]
    SenderIsRecipient,

    #[error("transfer amount must be positive")]
    NonPositiveAmount,
}

impl TransferError {
    /// Numeric code of this failure.
    pub fn code(&self) -> u32 {
        match self {
            Self::InsufficientBalance { .. } => 1,
            Self::SenderIsRecipient => 2,
            Self::NonPositiveAmount => 3,
        }
    }
}
