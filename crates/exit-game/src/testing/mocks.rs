//! Host collaborators that record what they were asked to do.
//!
//! Clones share their records, so a test can keep a handle on a mock after boxing it into the
//! exit game or the framework.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use alloy_primitives::{Address, U256};
use plasma_primitives::types::Token;

use crate::transfer::{FundsTransfer, TransferError, Vault};

/// How a receiver reacts to incoming funds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reaction {
    Reject,
    Reenter,
}

#[derive(Debug)]
struct Ledger<T> {
    records: Vec<T>,
    reactions: HashMap<Address, Reaction>,
}

impl<T> Default for Ledger<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            reactions: HashMap::new(),
        }
    }
}

impl<T> Ledger<T> {
    fn settle(&mut self, receiver: Address, record: T) -> Result<(), TransferError> {
        match self.reactions.get(&receiver) {
            Some(Reaction::Reject) => Err(TransferError::Rejected(format!(
                "{receiver} does not accept funds"
            ))),
            Some(Reaction::Reenter) => Err(TransferError::Reentrant),
            None => {
                self.records.push(record);
                Ok(())
            }
        }
    }
}

/// A [`FundsTransfer`] paying out bonds and bounties.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingTransfer {
    ledger: Rc<RefCell<Ledger<(Address, U256)>>>,
}

impl RecordingTransfer {
    /// Makes every transfer to `receiver` fail.
    pub(crate) fn reject(&self, receiver: Address) {
        self.ledger
            .borrow_mut()
            .reactions
            .insert(receiver, Reaction::Reject);
    }

    /// Makes `receiver` call back into the exit game on every transfer.
    pub(crate) fn reenter(&self, receiver: Address) {
        self.ledger
            .borrow_mut()
            .reactions
            .insert(receiver, Reaction::Reenter);
    }

    /// Returns the successful payments, in order.
    pub(crate) fn payments(&self) -> Vec<(Address, U256)> {
        self.ledger.borrow().records.clone()
    }

    /// Returns the total paid to `receiver`.
    pub(crate) fn paid_to(&self, receiver: Address) -> U256 {
        self.ledger
            .borrow()
            .records
            .iter()
            .filter(|(to, _)| *to == receiver)
            .fold(U256::ZERO, |total, (_, amount)| total + *amount)
    }
}

impl FundsTransfer for RecordingTransfer {
    fn transfer(&mut self, receiver: Address, amount: U256) -> Result<(), TransferError> {
        self.ledger
            .borrow_mut()
            .settle(receiver, (receiver, amount))
    }
}

/// A withdrawal made by a [`RecordingVault`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Withdrawal {
    pub(crate) receiver: Address,
    pub(crate) token: Token,
    pub(crate) amount: U256,
}

/// A [`Vault`] that never runs out of funds.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingVault {
    ledger: Rc<RefCell<Ledger<Withdrawal>>>,
}

impl RecordingVault {
    /// Makes every withdrawal to `receiver` fail.
    pub(crate) fn reject(&self, receiver: Address) {
        self.ledger
            .borrow_mut()
            .reactions
            .insert(receiver, Reaction::Reject);
    }

    /// Returns the successful withdrawals, in order.
    pub(crate) fn withdrawals(&self) -> Vec<Withdrawal> {
        self.ledger.borrow().records.clone()
    }
}

impl Vault for RecordingVault {
    fn withdraw(
        &mut self,
        receiver: Address,
        token: Token,
        amount: U256,
    ) -> Result<(), TransferError> {
        self.ledger.borrow_mut().settle(
            receiver,
            Withdrawal {
                receiver,
                token,
                amount,
            },
        )
    }
}
