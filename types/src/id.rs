//! Verification identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sequential identifier of a verification record. The first record is `0`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct VerificationId(u64);

impl VerificationId {
    pub const FIRST: Self = Self(0);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The id assigned after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u64> for VerificationId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for VerificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
