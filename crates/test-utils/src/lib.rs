//! This crate provides deterministic fixtures for testing the exit game: accounts that can sign
//! transactions, builders for payment transactions and child blocks whose Merkle roots and
//! inclusion proofs line up with the on-chain checks.
//!
//! Everything here panics on misuse instead of returning errors, since it is only ever used from
//! tests.

pub mod accounts;
pub mod child_block;
pub mod payment;
pub mod strategies;

pub mod prelude {
    //! Re-exports of the fixtures most tests need.
    pub use crate::{
        accounts::Account,
        child_block::ChildBlock,
        payment::{deposit_tx, PaymentTxBuilder},
    };
}
