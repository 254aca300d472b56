//! Errors produced while decoding or validating transactions.

use plasma_primitives::types::{OutputType, TxType};
use thiserror::Error;

/// Errors that can occur while handling encoded transactions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxFormatError {
    /// The bytes are not a well-formed encoding of the expected structure.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(#[from] alloy_rlp::Error),

    /// A well-formed encoding was followed by extra bytes.
    #[error("invalid encoding: {0} trailing bytes")]
    TrailingBytes(usize),

    /// The transaction is not of the expected type.
    #[error("unexpected tx type {actual}, expected {expected}")]
    UnexpectedTxType {
        /// The expected transaction type.
        expected: TxType,
        /// The transaction type found in the encoding.
        actual: TxType,
    },

    /// An output is not of the expected type.
    #[error("output {index} has unexpected type {actual}, expected {expected}")]
    UnexpectedOutputType {
        /// The index of the offending output.
        index: usize,
        /// The expected output type.
        expected: OutputType,
        /// The output type found in the encoding.
        actual: OutputType,
    },

    /// Too many inputs.
    #[error("transaction has {0} inputs, more than allowed")]
    TooManyInputs(usize),

    /// Either no outputs or too many of them.
    #[error("transaction has {0} outputs, expected between 1 and the maximum")]
    InvalidOutputCount(usize),

    /// An input references the zero output id.
    #[error("input {0} is empty")]
    EmptyInput(usize),

    /// The same output is spent twice by one transaction.
    #[error("input {0} is spent more than once")]
    DuplicateInput(usize),

    /// An output carries no value.
    #[error("output {0} has zero amount")]
    ZeroAmount(usize),

    /// The requested output does not exist.
    #[error("output index {index} out of range for a transaction with {count} outputs")]
    OutputIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of outputs of the transaction.
        count: usize,
    },

    /// A witness does not have the length of a recoverable signature.
    #[error("signature must be 65 bytes, got {0}")]
    InvalidSignatureLength(usize),

    /// The recovery byte of a signature is not one of 0, 1, 27 or 28.
    #[error("invalid signature recovery byte {0}")]
    InvalidRecoveryId(u8),

    /// The signature could not be parsed or recovered.
    #[error("signature recovery failed: {0}")]
    Secp256k1(#[from] secp256k1::Error),
}

/// The result type for transaction handling.
pub type TxFormatResult<T> = Result<T, TxFormatError>;
