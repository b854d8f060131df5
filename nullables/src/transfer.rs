//! Nullable token transfer: records transfers and fails on demand.

use agriproof_types::{FeeTransfer, MicroStx, Principal, TokenTransfer, TransferError};
use std::collections::{HashMap, VecDeque};

/// A controllable [`TokenTransfer`] for testing.
///
/// By default every transfer succeeds and is recorded. Failures can be
/// queued with [`NullTransfer::fail_next`]. In strict mode the native
/// transfer rules apply: the amount must be positive, sender and recipient
/// must differ, and the sender needs a sufficient balance (see
/// [`NullTransfer::fund`]).
#[derive(Debug, Default)]
pub struct NullTransfer {
    transfers: Vec<FeeTransfer>,
    queued_failures: VecDeque<TransferError>,
    strict: bool,
    balances: HashMap<Principal, u64>,
}

impl NullTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transfer primitive that enforces balances and the native rules.
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    /// Make the next transfer fail with `err`. Failures queue in order.
    pub fn fail_next(&mut self, err: TransferError) {
        self.queued_failures.push_back(err);
    }

    /// Credit `amount` to `principal`.
    pub fn fund(&mut self, principal: &Principal, amount: MicroStx) {
        *self.balances.entry(principal.clone()).or_insert(0) += amount.raw();
    }

    pub fn balance(&self, principal: &Principal) -> MicroStx {
        MicroStx::new(self.balances.get(principal).copied().unwrap_or(0))
    }

    /// Every successful transfer, oldest first.
    pub fn transfers(&self) -> &[FeeTransfer] {
        &self.transfers
    }

    fn check_strict(
        &self,
        amount: MicroStx,
        from: &Principal,
        to: &Principal,
    ) -> Result<(), TransferError> {
        if amount.is_zero() {
            return Err(TransferError::NonPositiveAmount);
        }
        if from == to {
            return Err(TransferError::SenderIsRecipient);
        }
        let available = self.balance(from).raw();
        if available < amount.raw() {
            return Err(TransferError::InsufficientBalance {
                needed: amount.raw(),
                available,
            });
        }
        Ok(())
    }
}

impl TokenTransfer for NullTransfer {
    fn transfer(
        &mut self,
        amount: MicroStx,
        from: &Principal,
        to: &Principal,
    ) -> Result<(), TransferError> {
        if let Some(err) = self.queued_failures.pop_front() {
            return Err(err);
        }
        if self.strict {
            self.check_strict(amount, from, to)?;
            *self.balances.entry(from.clone()).or_insert(0) -= amount.raw();
            *self.balances.entry(to.clone()).or_insert(0) += amount.raw();
        }
        self.transfers.push(FeeTransfer {
            amount,
            from: from.clone(),
            to: to.clone(),
        });
        Ok(())
    }
}
