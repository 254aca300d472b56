//! The seams through which the exit game moves funds.
//!
//! The exit game never holds user funds itself: deposits sit in per-asset [`Vault`]s and bonds sit
//! in an [`Escrow`] whose payouts go through a [`FundsTransfer`]. Both are host collaborators and
//! either may refuse a transfer. Such refusals are reported back as a [`TransferError`] and turned
//! into failure events by the caller, they never abort an operation.

use std::fmt;

use alloy_primitives::{Address, U256};
use plasma_primitives::types::Token;
use thiserror::Error;
use tracing::warn;

use crate::errors::{ExitGameError, ExitGameResult};

/// Why a transfer of funds did not happen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// The receiver refused the funds.
    #[error("receiver rejected the transfer: {0}")]
    Rejected(String),

    /// The receiver tried to call back into the exit game while receiving the funds.
    #[error("reentrant call during transfer")]
    Reentrant,

    /// The sender does not hold enough funds.
    #[error("insufficient funds: available {available}, requested {requested}")]
    InsufficientFunds {
        /// The funds available.
        available: U256,
        /// The funds requested.
        requested: U256,
    },
}

/// A vault custodying deposits of one kind of asset.
pub trait Vault: fmt::Debug {
    /// Sends `amount` of `token` to `receiver`.
    ///
    /// Only ever called for outputs that were just flagged as finalized, so the same output is
    /// never withdrawn twice.
    fn withdraw(&mut self, receiver: Address, token: Token, amount: U256)
        -> Result<(), TransferError>;
}

/// Moves native funds out of the exit game's escrow.
pub trait FundsTransfer: fmt::Debug {
    /// Sends `amount` to `receiver`.
    fn transfer(&mut self, receiver: Address, amount: U256) -> Result<(), TransferError>;
}

/// The bonds held by an exit game.
#[derive(Debug)]
pub struct Escrow {
    balance: U256,
    transfer: Box<dyn FundsTransfer>,
}

impl Escrow {
    /// Creates an empty escrow paying out through `transfer`.
    pub fn new(transfer: Box<dyn FundsTransfer>) -> Self {
        Self {
            balance: U256::ZERO,
            transfer,
        }
    }

    /// Returns the funds currently held.
    pub const fn balance(&self) -> U256 {
        self.balance
    }

    /// Checks that `amount` can be deposited without overflowing the balance.
    pub fn check_deposit(&self, amount: U256) -> ExitGameResult<()> {
        self.balance
            .checked_add(amount)
            .map(|_| ())
            .ok_or(ExitGameError::AmountOverflow)
    }

    /// Takes `amount` into custody.
    pub fn deposit(&mut self, amount: U256) -> ExitGameResult<()> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(ExitGameError::AmountOverflow)?;
        Ok(())
    }

    /// Pays `amount` to `receiver`. The balance is only debited if the transfer succeeds.
    pub fn pay(&mut self, receiver: Address, amount: U256) -> Result<(), TransferError> {
        let remaining =
            self.balance
                .checked_sub(amount)
                .ok_or(TransferError::InsufficientFunds {
                    available: self.balance,
                    requested: amount,
                })?;

        if let Err(err) = self.transfer.transfer(receiver, amount) {
            warn!(%receiver, %amount, %err, "escrow payout failed");
            return Err(err);
        }

        self.balance = remaining;
        Ok(())
    }
}
