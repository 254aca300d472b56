//! The events emitted by the exit game.
//!
//! Events are the only observable output of a successful call. They are returned to the caller in
//! the order in which they happened.

use std::fmt;

use alloy_primitives::{Address, B256, U256};
use plasma_primitives::{
    exit_id::ExitId,
    priority::ExitPriority,
    types::{Timestamp, Token, VaultId},
    utxo_pos::UtxoPos,
};

use crate::{bonds::BondKind, transfer::TransferError};

/// Something that happened while executing a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitGameEvent {
    /// A new exit queue was created.
    ExitQueueAdded {
        /// The vault of the queue.
        vault_id: VaultId,
        /// The token of the queue.
        token: Token,
    },
    /// An exit was inserted into a queue.
    ExitQueued {
        /// The exit.
        exit_id: ExitId,
        /// Its priority in the queue.
        priority: ExitPriority,
        /// The token of the queue.
        token: Token,
    },
    /// A standard exit was started.
    StandardExitStarted {
        /// The owner of the exiting output.
        owner: Address,
        /// The exit.
        exit_id: ExitId,
        /// The position of the exiting output.
        utxo_pos: UtxoPos,
    },
    /// A standard exit was successfully challenged.
    ExitChallenged {
        /// The exit.
        exit_id: ExitId,
        /// The position of the exiting output.
        utxo_pos: UtxoPos,
        /// The account that challenged it.
        challenger: Address,
    },
    /// A standard exit paid out.
    ExitFinalized {
        /// The exit.
        exit_id: ExitId,
    },
    /// A queued standard exit was skipped because it no longer applies.
    ExitOmitted {
        /// The exit.
        exit_id: ExitId,
    },
    /// An in-flight exit was started.
    InFlightExitStarted {
        /// The account that started it.
        initiator: Address,
        /// The exit.
        exit_id: ExitId,
        /// The hash of the in-flight transaction.
        tx_hash: B256,
    },
    /// An input of an in-flight exit was piggybacked.
    InFlightExitInputPiggybacked {
        /// The owner of the input.
        exit_target: Address,
        /// The exit.
        exit_id: ExitId,
        /// The index of the input.
        input_index: usize,
    },
    /// An output of an in-flight exit was piggybacked.
    InFlightExitOutputPiggybacked {
        /// The owner of the output.
        exit_target: Address,
        /// The exit.
        exit_id: ExitId,
        /// The index of the output.
        output_index: usize,
    },
    /// An in-flight exit was shown a competing transaction.
    InFlightExitChallenged {
        /// The account that challenged it.
        challenger: Address,
        /// The exit.
        exit_id: ExitId,
        /// The position of the competitor, if it was included in a block.
        competitor_position: Option<u64>,
    },
    /// The in-flight transaction was shown to be older than its competitor.
    InFlightExitChallengeResponded {
        /// The account that responded.
        responder: Address,
        /// The exit.
        exit_id: ExitId,
        /// The position at which the in-flight transaction was included.
        tx_position: u64,
    },
    /// A piggybacked input was shown to be spent elsewhere.
    InFlightExitInputBlocked {
        /// The account that challenged it.
        challenger: Address,
        /// The exit.
        exit_id: ExitId,
        /// The index of the input.
        input_index: usize,
    },
    /// A piggybacked output was shown to be spent.
    InFlightExitOutputBlocked {
        /// The account that challenged it.
        challenger: Address,
        /// The exit.
        exit_id: ExitId,
        /// The index of the output.
        output_index: usize,
    },
    /// An in-flight exit without piggybacks was deleted.
    InFlightExitDeleted {
        /// The exit.
        exit_id: ExitId,
    },
    /// A queued in-flight exit was skipped because it no longer exists.
    InFlightExitOmitted {
        /// The exit.
        exit_id: ExitId,
        /// The token of the queue.
        token: Token,
    },
    /// A piggybacked input of an in-flight exit paid out.
    InFlightExitInputWithdrawn {
        /// The exit.
        exit_id: ExitId,
        /// The index of the input.
        input_index: usize,
    },
    /// A piggybacked output of an in-flight exit paid out.
    InFlightExitOutputWithdrawn {
        /// The exit.
        exit_id: ExitId,
        /// The index of the output.
        output_index: usize,
    },
    /// Every slot of an in-flight exit was processed and the exit was removed.
    InFlightExitFinalized {
        /// The exit.
        exit_id: ExitId,
    },
    /// A bond update was scheduled.
    BondUpdateScheduled {
        /// The bond being updated.
        kind: BondKind,
        /// The new bond.
        bond: U256,
        /// The new bounty, for piggyback bonds.
        bounty: Option<U256>,
        /// When the new values take effect.
        effective_at: Timestamp,
    },
    /// A bond could not be returned. The funds stay in escrow.
    BondReturnFailed {
        /// The intended receiver.
        receiver: Address,
        /// The bond.
        amount: U256,
        /// Why the transfer failed.
        reason: TransferError,
    },
    /// A bounty could not be paid. The funds stay in escrow.
    BountyPaymentFailed {
        /// The intended receiver.
        receiver: Address,
        /// The bounty.
        amount: U256,
        /// Why the transfer failed.
        reason: TransferError,
    },
    /// A vault withdrawal failed. The output stays finalized.
    WithdrawalFailed {
        /// The exit.
        exit_id: ExitId,
        /// The intended receiver.
        receiver: Address,
        /// The token.
        token: Token,
        /// The amount.
        amount: U256,
        /// Why the withdrawal failed.
        reason: TransferError,
    },
    /// A batch of queued exits was processed.
    ProcessedExitsNum {
        /// The number of queue entries consumed.
        processed: usize,
        /// The vault of the queue.
        vault_id: VaultId,
        /// The token of the queue.
        token: Token,
    },
}

impl fmt::Display for ExitGameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitGameEvent::ExitQueueAdded { vault_id, token } => {
                write!(f, "ExitQueueAdded for {token} in {vault_id}")
            }
            ExitGameEvent::ExitQueued {
                exit_id, priority, ..
            } => write!(
                f,
                "ExitQueued {exit_id} exitable at {}",
                priority.exitable_at()
            ),
            ExitGameEvent::StandardExitStarted {
                exit_id, utxo_pos, ..
            } => write!(f, "StandardExitStarted {exit_id} on {utxo_pos}"),
            ExitGameEvent::ExitChallenged {
                exit_id,
                challenger,
                ..
            } => write!(f, "ExitChallenged {exit_id} by {challenger}"),
            ExitGameEvent::ExitFinalized { exit_id } => write!(f, "ExitFinalized {exit_id}"),
            ExitGameEvent::ExitOmitted { exit_id } => write!(f, "ExitOmitted {exit_id}"),
            ExitGameEvent::InFlightExitStarted { exit_id, .. } => {
                write!(f, "InFlightExitStarted {exit_id}")
            }
            ExitGameEvent::InFlightExitInputPiggybacked {
                exit_id,
                input_index,
                ..
            } => write!(f, "InFlightExitInputPiggybacked {exit_id} input {input_index}"),
            ExitGameEvent::InFlightExitOutputPiggybacked {
                exit_id,
                output_index,
                ..
            } => write!(
                f,
                "InFlightExitOutputPiggybacked {exit_id} output {output_index}"
            ),
            ExitGameEvent::InFlightExitChallenged {
                exit_id,
                challenger,
                ..
            } => write!(f, "InFlightExitChallenged {exit_id} by {challenger}"),
            ExitGameEvent::InFlightExitChallengeResponded {
                exit_id, responder, ..
            } => write!(f, "InFlightExitChallengeResponded {exit_id} by {responder}"),
            ExitGameEvent::InFlightExitInputBlocked {
                exit_id,
                input_index,
                ..
            } => write!(f, "InFlightExitInputBlocked {exit_id} input {input_index}"),
            ExitGameEvent::InFlightExitOutputBlocked {
                exit_id,
                output_index,
                ..
            } => write!(f, "InFlightExitOutputBlocked {exit_id} output {output_index}"),
            ExitGameEvent::InFlightExitDeleted { exit_id } => {
                write!(f, "InFlightExitDeleted {exit_id}")
            }
            ExitGameEvent::InFlightExitOmitted { exit_id, token } => {
                write!(f, "InFlightExitOmitted {exit_id} for {token}")
            }
            ExitGameEvent::InFlightExitInputWithdrawn {
                exit_id,
                input_index,
            } => write!(f, "InFlightExitInputWithdrawn {exit_id} input {input_index}"),
            ExitGameEvent::InFlightExitOutputWithdrawn {
                exit_id,
                output_index,
            } => write!(
                f,
                "InFlightExitOutputWithdrawn {exit_id} output {output_index}"
            ),
            ExitGameEvent::InFlightExitFinalized { exit_id } => {
                write!(f, "InFlightExitFinalized {exit_id}")
            }
            ExitGameEvent::BondUpdateScheduled {
                kind, bond, effective_at, ..
            } => write!(f, "BondUpdateScheduled {kind} to {bond} at {effective_at}"),
            ExitGameEvent::BondReturnFailed {
                receiver, amount, ..
            } => write!(f, "BondReturnFailed {amount} to {receiver}"),
            ExitGameEvent::BountyPaymentFailed {
                receiver, amount, ..
            } => write!(f, "BountyPaymentFailed {amount} to {receiver}"),
            ExitGameEvent::WithdrawalFailed {
                exit_id, receiver, ..
            } => write!(f, "WithdrawalFailed {exit_id} to {receiver}"),
            ExitGameEvent::ProcessedExitsNum {
                processed, token, ..
            } => write!(f, "ProcessedExitsNum {processed} for {token}"),
        }
    }
}
