//! In-flight exits: exits of a transaction that may never have made it into a block.
//!
//! An in-flight exit covers every input and output of its transaction. Owners join it by
//! piggybacking their slot, and which side gets paid depends on whether the transaction is
//! canonical, that is, whether it is the first spend of its inputs.
//!
//! The life of an in-flight exit is split in two halves of the minimum exit period:
//!
//! - **first phase**: anybody can show a competing transaction to mark the exit non-canonical;
//! - **second phase**: an exit nobody piggybacked can be deleted by anyone.
//!
//! Responses to canonicity challenges, piggybacks and spent-input/output challenges are accepted
//! for as long as the exit exists. Processing happens once per token and retires the slots of that
//! token; the record is removed when no slot is left.

mod canonicity;
mod delete;
mod piggyback;
mod process;
mod spent;
mod start;

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;

use alloy_primitives::{Address, U256};
use plasma_exit_params::prelude::{MAX_INPUTS, MAX_OUTPUTS};
use plasma_primitives::{
    output_id::OutputId,
    types::{Timestamp, Token},
    utxo_pos::UtxoPos,
};
use serde::{Deserialize, Serialize};

/// What the owner of an input or output of an in-flight exit can claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawData {
    /// The id of the input or output.
    pub output_id: OutputId,
    /// The owner of the input or output.
    pub exit_target: Address,
    /// The token.
    pub token: Token,
    /// The amount.
    pub amount: U256,
    /// The bond posted when piggybacking, zero until then.
    pub piggyback_bond_size: U256,
    /// The part of the piggyback bond paid to whoever processes the slot.
    pub bounty_size: U256,
}

/// The state of one input or output of an in-flight exit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    /// The transaction has no input or output at this index.
    Empty,
    /// The slot exists but nobody claimed it.
    Active(WithdrawData),
    /// The owner claimed the slot.
    Piggybacked(WithdrawData),
    /// The slot's token was processed.
    Processed(WithdrawData),
}

impl Slot {
    /// Returns the data of the slot, unless it is empty.
    pub const fn data(&self) -> Option<&WithdrawData> {
        match self {
            Slot::Empty => None,
            Slot::Active(data) | Slot::Piggybacked(data) | Slot::Processed(data) => Some(data),
        }
    }

    /// Whether the owner claimed the slot.
    pub const fn is_piggybacked(&self) -> bool {
        matches!(self, Slot::Piggybacked(_))
    }

    /// Whether the slot still waits for its token to be processed.
    pub const fn is_pending(&self) -> bool {
        matches!(self, Slot::Active(_) | Slot::Piggybacked(_))
    }

    /// Whether the slot is pending and holds `token`.
    fn is_pending_for(&self, token: &Token) -> bool {
        self.is_pending() && self.data().is_some_and(|data| data.token == *token)
    }
}

/// The two sides of an in-flight transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Input,
    Output,
}

/// A pending in-flight exit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InFlightExit {
    /// When the exit was started.
    pub exit_start_timestamp: Timestamp,
    /// The position of the oldest input, which determines the exit's priority.
    pub position: UtxoPos,
    /// Who gets the exit bond back.
    pub bond_owner: Address,
    /// The bond posted when the exit was started.
    pub bond_size: U256,
    /// The position of the oldest known competitor; `u64::MAX` for competitors not in a block.
    pub oldest_competitor_position: Option<u64>,
    /// The inputs of the in-flight transaction.
    pub inputs: [Slot; MAX_INPUTS],
    /// The outputs of the in-flight transaction.
    pub outputs: [Slot; MAX_OUTPUTS],
    /// Whether the transaction is currently considered the first spend of its inputs.
    pub is_canonical: bool,
}

impl InFlightExit {
    /// Returns the piggyback flags packed into a bitmask: bit `i` for input `i` and bit
    /// `MAX_INPUTS + j` for output `j`.
    pub fn exit_map(&self) -> u8 {
        self.inputs
            .iter()
            .chain(self.outputs.iter())
            .enumerate()
            .filter(|(_, slot)| slot.is_piggybacked())
            .fold(0, |map, (bit, _)| map | (1 << bit))
    }

    /// Returns the slot at `index` on `side`.
    pub(crate) fn slot(&self, side: Side, index: usize) -> Option<&Slot> {
        match side {
            Side::Input => self.inputs.get(index),
            Side::Output => self.outputs.get(index),
        }
    }

    /// Returns the slot at `index` on `side` for updating.
    pub(crate) fn slot_mut(&mut self, side: Side, index: usize) -> Option<&mut Slot> {
        match side {
            Side::Input => self.inputs.get_mut(index),
            Side::Output => self.outputs.get_mut(index),
        }
    }

    /// Whether any input or output is piggybacked.
    pub fn has_piggybacks(&self) -> bool {
        self.exit_map() != 0
    }

    /// Whether the first phase is still running at `now`.
    pub const fn is_first_phase(&self, now: Timestamp, min_exit_period: u64) -> bool {
        now < self.exit_start_timestamp.saturating_add(min_exit_period / 2)
    }

    /// Whether every slot has been processed.
    pub fn is_resolved(&self) -> bool {
        self.inputs
            .iter()
            .chain(self.outputs.iter())
            .all(|slot| !slot.is_pending())
    }

    /// Returns the distinct tokens of the inputs and outputs.
    pub fn tokens(&self) -> BTreeSet<Token> {
        self.inputs
            .iter()
            .chain(self.outputs.iter())
            .filter_map(Slot::data)
            .map(|data| data.token)
            .collect()
    }
}

/// The arguments of [`PaymentExitGame::start_in_flight_exit`](crate::game::PaymentExitGame::start_in_flight_exit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartInFlightExitArgs {
    /// The in-flight transaction.
    pub in_flight_tx: Vec<u8>,
    /// The transactions creating each input, in input order.
    pub input_txs: Vec<Vec<u8>>,
    /// The position of each input.
    pub input_utxos_pos: Vec<UtxoPos>,
    /// The inclusion proof of each input transaction.
    pub input_txs_inclusion_proofs: Vec<Vec<u8>>,
    /// The witness authorizing the in-flight transaction to spend each input.
    pub in_flight_tx_witnesses: Vec<Vec<u8>>,
}

/// The arguments of
/// [`PaymentExitGame::challenge_in_flight_exit_not_canonical`](crate::game::PaymentExitGame::challenge_in_flight_exit_not_canonical).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeCanonicityArgs {
    /// The in-flight transaction.
    pub in_flight_tx: Vec<u8>,
    /// The index of the shared input in the in-flight transaction.
    pub in_flight_tx_input_index: usize,
    /// The transaction creating the shared input.
    pub input_tx: Vec<u8>,
    /// The position of the shared input.
    pub input_utxo_pos: UtxoPos,
    /// A different transaction spending the shared input.
    pub competing_tx: Vec<u8>,
    /// The index of the shared input in the competing transaction.
    pub competing_tx_input_index: usize,
    /// Where the competing transaction was included, if it was.
    pub competing_tx_pos: Option<UtxoPos>,
    /// The inclusion proof of the competing transaction, ignored if it was not included.
    pub competing_tx_inclusion_proof: Vec<u8>,
    /// The witness authorizing the competing transaction to spend the shared input.
    pub competing_tx_witness: Vec<u8>,
}

/// The arguments of
/// [`PaymentExitGame::respond_to_non_canonical_challenge`](crate::game::PaymentExitGame::respond_to_non_canonical_challenge).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RespondToChallengeArgs {
    /// The in-flight transaction.
    pub in_flight_tx: Vec<u8>,
    /// Where the in-flight transaction was included.
    pub in_flight_tx_pos: UtxoPos,
    /// The inclusion proof of the in-flight transaction.
    pub in_flight_tx_inclusion_proof: Vec<u8>,
}

/// The arguments of
/// [`PaymentExitGame::challenge_in_flight_exit_input_spent`](crate::game::PaymentExitGame::challenge_in_flight_exit_input_spent).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeInputSpentArgs {
    /// The in-flight transaction.
    pub in_flight_tx: Vec<u8>,
    /// The index of the challenged input.
    pub in_flight_tx_input_index: usize,
    /// The transaction creating the challenged input.
    pub input_tx: Vec<u8>,
    /// The position of the challenged input.
    pub input_utxo_pos: UtxoPos,
    /// A different transaction spending the challenged input.
    pub challenging_tx: Vec<u8>,
    /// The index of the challenged input in the challenging transaction.
    pub challenging_tx_input_index: usize,
    /// The witness authorizing the challenging transaction to spend the input.
    pub challenging_tx_witness: Vec<u8>,
}

/// The arguments of
/// [`PaymentExitGame::challenge_in_flight_exit_output_spent`](crate::game::PaymentExitGame::challenge_in_flight_exit_output_spent).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeOutputSpentArgs {
    /// The in-flight transaction.
    pub in_flight_tx: Vec<u8>,
    /// The inclusion proof of the in-flight transaction.
    pub in_flight_tx_inclusion_proof: Vec<u8>,
    /// The position of the challenged output.
    pub output_utxo_pos: UtxoPos,
    /// A transaction spending the challenged output.
    pub challenging_tx: Vec<u8>,
    /// The index of the challenged output in the challenging transaction.
    pub challenging_tx_input_index: usize,
    /// The witness authorizing the challenging transaction to spend the output.
    pub challenging_tx_witness: Vec<u8>,
}

