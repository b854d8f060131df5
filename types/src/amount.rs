//! Fee amounts.
//!
//! Amounts are fixed-point integers in micro-STX (1 STX = 1_000_000 µSTX),
//! represented as `u64` so a fee can never be negative.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of micro-STX in one STX.
pub const MICRO_PER_STX: u64 = 1_000_000;

/// An amount of micro-STX.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct MicroStx(u64);

impl MicroStx {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl From<u64> for MicroStx {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for MicroStx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} uSTX", self.0)
    }
}
