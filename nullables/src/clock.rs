//! Nullable clock: deterministic block heights for testing.

use agriproof_types::BlockHeight;
use std::cell::Cell;

/// A deterministic block-height source.
///
/// The chain only advances when you tell it to.
pub struct NullClock {
    current: Cell<BlockHeight>,
}

impl NullClock {
    pub fn new(initial_height: u64) -> Self {
        Self {
            current: Cell::new(BlockHeight::new(initial_height)),
        }
    }

    /// Get the current block height.
    pub fn now(&self) -> BlockHeight {
        self.current.get()
    }

    /// Mine `blocks` blocks, saturating at `u64::MAX`.
    pub fn advance(&self, blocks: u64) {
        self.current.set(self.current.get().saturating_add(blocks));
    }

    /// Jump to a specific height.
    pub fn set(&self, height: u64) {
        self.current.set(BlockHeight::new(height));
    }
}

impl Default for NullClock {
    fn default() -> Self {
        Self::new(0)
    }
}
