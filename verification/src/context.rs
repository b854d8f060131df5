//! Per-call execution context.

use agriproof_types::{BlockHeight, Principal};

/// Who is calling and at which block height.
///
/// Every mutating registry call that acts on behalf of a verifier receives
/// one of these; the registry never reads a clock or an identity on its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallContext {
    pub sender: Principal,
    pub block_height: BlockHeight,
}

impl CallContext {
    pub fn new(sender: Principal, block_height: BlockHeight) -> Self {
        Self {
            sender,
            block_height,
        }
    }

    /// The same sender, one block later.
    pub fn next_block(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            block_height: self.block_height.saturating_add(1),
        }
    }
}
