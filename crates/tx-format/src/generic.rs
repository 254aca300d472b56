//! The generic transaction envelope shared by every transaction type.

use alloy_primitives::{Address, B256, U256};
use alloy_rlp::{Decodable, RlpDecodable, RlpEncodable};

use crate::errors::{TxFormatError, TxFormatResult};

/// The data carried by an output: who may spend it, in which asset, and how much.
#[derive(Debug, Clone, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct OutputData {
    /// The address that controls the output.
    pub output_guard: Address,
    /// The asset of the output.
    pub token: Address,
    /// The value of the output.
    pub amount: U256,
}

/// An output tagged with its type: `[output_type, [output_guard, token, amount]]`.
#[derive(Debug, Clone, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct GenericOutput {
    /// The output type marker.
    pub output_type: u64,
    /// The output payload.
    pub data: OutputData,
}

/// The envelope `[tx_type, inputs, outputs, metadata]`.
#[derive(Debug, Clone, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct GenericTransaction {
    /// The transaction type marker.
    pub tx_type: u64,
    /// The ids of the outputs being spent.
    pub inputs: Vec<B256>,
    /// The outputs being created.
    pub outputs: Vec<GenericOutput>,
    /// Free-form metadata.
    pub metadata: B256,
}

impl GenericTransaction {
    /// Decodes a transaction, rejecting anything but an exact encoding.
    ///
    /// Lists with missing or surplus items are rejected by the derived decoders; this function
    /// additionally rejects bytes left over after the top-level list.
    pub fn decode_strict(bytes: &[u8]) -> TxFormatResult<Self> {
        let mut buf = bytes;
        let tx = Self::decode(&mut buf)?;

        if !buf.is_empty() {
            return Err(TxFormatError::TrailingBytes(buf.len()));
        }

        Ok(tx)
    }

    /// Encodes the transaction.
    pub fn encode_to_vec(&self) -> Vec<u8> {
        alloy_rlp::encode(self)
    }
}
