//! Token-transfer seam.
//!
//! The engine never moves value itself. It asks a [`TokenTransfer`]
//! implementation to move the verification fee and only commits the request
//! once the transfer succeeded.

use crate::amount::MicroStx;
use crate::error::TransferError;
use crate::principal::Principal;
use serde::{Deserialize, Serialize};

/// A single value transfer from one principal to another.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTransfer {
    pub amount: MicroStx,
    pub from: Principal,
    pub to: Principal,
}

/// The chain's token-transfer primitive.
pub trait TokenTransfer {
    /// Move `amount` from `from` to `to`.
    fn transfer(
        &mut self,
        amount: MicroStx,
        from: &Principal,
        to: &Principal,
    ) -> Result<(), TransferError>;
}

/// A transfer primitive that accepts every transfer and keeps a log of them.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransferLog {
    transfers: Vec<FeeTransfer>,
}

impl TransferLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All transfers recorded so far, oldest first.
    pub fn transfers(&self) -> &[FeeTransfer] {
        &self.transfers
    }

    /// Sum of every amount received by `recipient`.
    pub fn total_received(&self, recipient: &Principal) -> MicroStx {
        MicroStx::new(
            self.transfers
                .iter()
                .filter(|t| &t.to == recipient)
                .map(|t| t.amount.raw())
                .sum(),
        )
    }
}

impl TokenTransfer for TransferLog {
    fn transfer(
        &mut self,
        amount: MicroStx,
        from: &Principal,
        to: &Principal,
    ) -> Result<(), TransferError> {
        self.transfers.push(FeeTransfer {
            amount,
            from: from.clone(),
            to: to.clone(),
        });
        Ok(())
    }
}
