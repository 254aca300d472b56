//! Errors returned by the operations of the exit game.
//!
//! Every error is returned before any state is mutated, so a failed call leaves the exit game
//! exactly as it found it.

use alloy_primitives::{Address, U256};
use plasma_primitives::{
    errors::PrimitivesError,
    exit_id::ExitId,
    output_id::OutputId,
    types::{BlockNumber, OutputType, Token, TxType, VaultId},
    utxo_pos::UtxoPos,
};
use plasma_tx_format::errors::TxFormatError;
use thiserror::Error;

/// Errors of the exit queue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The queue has no entries.
    #[error("exit queue is empty")]
    EmptyQueue,
}

/// Errors raised while scheduling bond updates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BondError {
    /// Bonds must never be zero.
    #[error("bond must be greater than zero")]
    ZeroBond,

    /// The new bond is too far from the current one.
    #[error("bond {proposed} is out of bounds [{lower}, {upper}]")]
    OutOfBounds {
        /// The proposed value.
        proposed: U256,
        /// The smallest acceptable value.
        lower: U256,
        /// The largest acceptable value.
        upper: U256,
    },

    /// The bounty paid out of a piggyback bond cannot exceed the bond.
    #[error("bounty {bounty} exceeds bond {bond}")]
    BountyExceedsBond {
        /// The proposed bond.
        bond: U256,
        /// The proposed bounty.
        bounty: U256,
    },
}

/// Errors of the output spend tracker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpendTrackerError {
    /// The output was already finalized by a different exit.
    #[error("output {output_id} already finalized by exit {finalized_by}")]
    AlreadyFinalized {
        /// The output.
        output_id: OutputId,
        /// The exit that finalized it.
        finalized_by: ExitId,
    },
}

/// Errors that can occur while operating the exit game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExitGameError {
    /// An exit queue operation failed.
    #[error(transparent)]
    Queue(#[from] QueueError),

    /// A bond update was rejected.
    #[error(transparent)]
    Bond(#[from] BondError),

    /// The spend tracker refused to record a finalization.
    #[error(transparent)]
    SpendTracker(#[from] SpendTrackerError),

    /// A transaction or witness is malformed.
    #[error(transparent)]
    TxFormat(#[from] TxFormatError),

    /// A position, proof or priority is malformed.
    #[error(transparent)]
    Primitives(#[from] PrimitivesError),

    /// No root was submitted for the block.
    #[error("unknown block {0}")]
    UnknownBlock(BlockNumber),

    /// A root was already submitted for the block.
    #[error("block {0} was already submitted")]
    BlockAlreadySubmitted(BlockNumber),

    /// No exit queue exists for the vault and token.
    #[error("no exit queue for {token} in {vault_id}")]
    QueueNotFound {
        /// The vault.
        vault_id: VaultId,
        /// The token.
        token: Token,
    },

    /// An exit queue already exists for the vault and token.
    #[error("exit queue for {token} in {vault_id} already exists")]
    QueueAlreadyExists {
        /// The vault.
        vault_id: VaultId,
        /// The token.
        token: Token,
    },

    /// The head of the queue is not the exit the caller expected to process first.
    #[error("top exit mismatch: expected {expected}, found {actual:?}")]
    TopExitMismatch {
        /// The exit the caller expected at the head of the queue.
        expected: ExitId,
        /// The exit actually at the head of the queue.
        actual: Option<ExitId>,
    },

    /// Only the maintainer may perform the operation.
    #[error("{0} is not authorized")]
    Unauthorized(Address),

    /// Only the owner of an output may start its standard exit.
    #[error("caller {caller} is not the owner {owner} of the output")]
    NotOutputOwner {
        /// The owner of the output.
        owner: Address,
        /// The caller.
        caller: Address,
    },

    /// Only the exit target of a slot may piggyback it.
    #[error("caller {caller} is not the exit target {exit_target} of the slot")]
    NotExitTarget {
        /// The exit target of the slot.
        exit_target: Address,
        /// The caller.
        caller: Address,
    },

    /// The output was already finalized.
    #[error("output {0} is already spent")]
    OutputAlreadySpent(OutputId),

    /// The transaction is not included in the block at the given position.
    #[error("transaction is not included at {0}")]
    InvalidInclusionProof(UtxoPos),

    /// An exit with this id already exists.
    #[error("exit {0} already exists")]
    AlreadyExiting(ExitId),

    /// No exit with this id exists.
    #[error("exit {0} does not exist")]
    ExitNotFound(ExitId),

    /// The bond sent along with the call is too small.
    #[error("insufficient bond: required {required}, provided {provided}")]
    InsufficientBond {
        /// The current bond size.
        required: U256,
        /// The value sent.
        provided: U256,
    },

    /// The arguments of a call are inconsistent with each other.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// An input transaction does not create the output spent by the in-flight transaction.
    #[error("input {0} does not match the in-flight transaction")]
    InputMismatch(usize),

    /// No spending condition is registered for the combination.
    #[error("no spending condition for output type {output_type} and tx type {tx_type}")]
    SpendingConditionNotRegistered {
        /// The output type of the spent output.
        output_type: OutputType,
        /// The type of the spending transaction.
        tx_type: TxType,
    },

    /// A spending condition is already registered for the combination.
    #[error("spending condition for output type {output_type} and tx type {tx_type} already registered")]
    SpendingConditionAlreadyRegistered {
        /// The output type of the spent output.
        output_type: OutputType,
        /// The type of the spending transaction.
        tx_type: TxType,
    },

    /// The witness of an input of the in-flight transaction does not satisfy its spending
    /// condition.
    #[error("input {0} of the in-flight transaction is not correctly signed")]
    InvalidSpendingCondition(usize),

    /// The in-flight transaction creates more value than it spends.
    #[error("in-flight transaction creates more value than it spends")]
    InvalidStateTransition,

    /// The challenge does not prove the exit invalid.
    #[error("invalid challenge: {0}")]
    InvalidChallenge(String),

    /// The response does not prove the in-flight transaction canonical.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The slot index is out of range or the slot is empty.
    #[error("invalid slot index {0}")]
    InvalidIndex(usize),

    /// The slot is already piggybacked, or the exit has piggybacked slots.
    #[error("already piggybacked")]
    AlreadyPiggybacked,

    /// The operation is only allowed in the first phase of the in-flight exit.
    #[error("first phase of exit {0} is over")]
    FirstPhaseOver(ExitId),

    /// The operation is not allowed in the first phase of the in-flight exit.
    #[error("exit {0} is still in its first phase")]
    StillInFirstPhase(ExitId),

    /// The exit is already being acted upon further up the call stack.
    #[error("reentrant call on exit {0}")]
    ReentrantCall(ExitId),

    /// An amount computation overflowed.
    #[error("amount overflow")]
    AmountOverflow,
}

/// The result type for exit game operations.
pub type ExitGameResult<T> = Result<T, ExitGameError>;
