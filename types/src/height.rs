//! Block height, the only clock the engine knows about.
//!
//! Heights are supplied by the environment with each call and are treated
//! as an opaque monotonic counter; wall-clock time is never consulted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A chain block height.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BlockHeight(u64);

impl BlockHeight {
    /// Height of the genesis block.
    pub const GENESIS: Self = Self(0);

    pub fn new(height: u64) -> Self {
        Self(height)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Blocks elapsed since this height (relative to `now`), saturating at 0.
    pub fn elapsed_since(&self, now: BlockHeight) -> u64 {
        now.0.saturating_sub(self.0)
    }

    /// Whether `period` blocks have passed since this height.
    pub fn has_elapsed(&self, period: u64, now: BlockHeight) -> bool {
        now.0 >= self.0.saturating_add(period)
    }

    /// The height `blocks` after this one, saturating at `u64::MAX`.
    pub fn saturating_add(self, blocks: u64) -> Self {
        Self(self.0.saturating_add(blocks))
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
