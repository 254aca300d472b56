//! Errors produced while constructing primitives.

use thiserror::Error;

/// Errors that can occur while building or checking primitive values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrimitivesError {
    /// One of the components of a UTXO position is out of range.
    #[error("invalid utxo position: {0}")]
    InvalidUtxoPos(String),

    /// A Merkle proof must carry exactly one sibling per tree level.
    #[error("merkle proof must be {expected} bytes, got {actual}")]
    InvalidProofLength {
        /// The expected length in bytes.
        expected: usize,
        /// The length that was supplied.
        actual: usize,
    },

    /// The leaf index does not fit in the tree.
    #[error("leaf index {0} is out of range")]
    LeafIndexOutOfRange(u64),

    /// A component of an exit priority does not fit its bit width.
    #[error("{field} value {value} does not fit in {bits} bits")]
    PriorityFieldOverflow {
        /// The name of the overflowing field.
        field: &'static str,
        /// The value that was supplied.
        value: u64,
        /// The number of bits available.
        bits: u32,
    },
}

/// The result type for primitive constructors.
pub type PrimitivesResult<T> = Result<T, PrimitivesError>;
