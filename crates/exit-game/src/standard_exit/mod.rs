//! Standard exits: exits of a single output that was included in a block.
//!
//! A standard exit moves through `NonExistent -> Pending -> {Challenged, Processed}`. Both terminal
//! states remove the record, so a record exists exactly while the exit is pending.

mod challenge;
mod process;
mod start;

#[cfg(test)]
mod tests;

use alloy_primitives::{Address, U256};
use plasma_primitives::{exit_id::ExitId, output_id::OutputId, types::Token, utxo_pos::UtxoPos};
use serde::{Deserialize, Serialize};

/// A pending standard exit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardExit {
    /// The position of the exiting output.
    pub utxo_pos: UtxoPos,
    /// The id of the exiting output.
    pub output_id: OutputId,
    /// The token of the exiting output.
    pub token: Token,
    /// Who receives the funds and the bond.
    pub exit_target: Address,
    /// The amount of the exiting output.
    pub amount: U256,
    /// The bond posted when the exit was started.
    pub bond_size: U256,
}

/// The arguments of [`PaymentExitGame::start_standard_exit`](crate::game::PaymentExitGame::start_standard_exit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartStandardExitArgs {
    /// The position of the output to exit.
    pub utxo_pos: UtxoPos,
    /// The transaction that created the output.
    pub output_tx: Vec<u8>,
    /// The inclusion proof of `output_tx` in its block.
    pub output_tx_inclusion_proof: Vec<u8>,
}

/// The arguments of [`PaymentExitGame::challenge_standard_exit`](crate::game::PaymentExitGame::challenge_standard_exit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeStandardExitArgs {
    /// The exit to challenge.
    pub exit_id: ExitId,
    /// The transaction that created the exiting output.
    pub exiting_tx: Vec<u8>,
    /// A transaction spending the exiting output.
    pub challenge_tx: Vec<u8>,
    /// The input of `challenge_tx` that spends the exiting output.
    pub input_index: usize,
    /// The witness authorizing the spend.
    pub challenge_tx_witness: Vec<u8>,
}
