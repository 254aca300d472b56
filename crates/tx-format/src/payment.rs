//! Payment transactions: the only transaction type the exit game can adjudicate.

use std::collections::HashSet;

use alloy_primitives::{keccak256, Address, B256, U256};
use plasma_exit_params::prelude::{ProtocolParams, MAX_INPUTS, MAX_OUTPUTS};
use plasma_primitives::{
    output_id::OutputId,
    types::{OutputType, Token, TxType},
};

use crate::{
    errors::{TxFormatError, TxFormatResult},
    generic::{GenericOutput, GenericTransaction, OutputData},
};

/// Hashes an encoded transaction. This is the message signed by the owners of its inputs.
pub fn tx_hash(tx_bytes: &[u8]) -> B256 {
    keccak256(tx_bytes)
}

/// An output of a payment transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOutput {
    /// The output type marker.
    pub output_type: OutputType,
    /// The owner of the output.
    pub output_guard: Address,
    /// The asset of the output.
    pub token: Token,
    /// The value of the output.
    pub amount: U256,
}

impl PaymentOutput {
    /// Returns the address allowed to spend (and exit) this output.
    pub const fn owner(&self) -> Address {
        self.output_guard
    }
}

impl From<PaymentOutput> for GenericOutput {
    fn from(value: PaymentOutput) -> Self {
        GenericOutput {
            output_type: value.output_type,
            data: OutputData {
                output_guard: value.output_guard,
                token: value.token,
                amount: value.amount,
            },
        }
    }
}

impl From<GenericOutput> for PaymentOutput {
    fn from(value: GenericOutput) -> Self {
        PaymentOutput {
            output_type: value.output_type,
            output_guard: value.data.output_guard,
            token: value.data.token,
            amount: value.data.amount,
        }
    }
}

/// A decoded and validated payment transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentTransaction {
    /// The transaction type marker.
    pub tx_type: TxType,
    /// The outputs spent by this transaction.
    pub inputs: Vec<OutputId>,
    /// The outputs created by this transaction.
    pub outputs: Vec<PaymentOutput>,
    /// Free-form metadata.
    pub metadata: B256,
}

impl PaymentTransaction {
    /// Decodes `tx_bytes` and validates it as a payment transaction.
    pub fn decode(tx_bytes: &[u8], protocol: &ProtocolParams) -> TxFormatResult<Self> {
        let generic = GenericTransaction::decode_strict(tx_bytes)?;

        if generic.tx_type != protocol.payment_tx_type {
            return Err(TxFormatError::UnexpectedTxType {
                expected: protocol.payment_tx_type,
                actual: generic.tx_type,
            });
        }

        if generic.inputs.len() > MAX_INPUTS {
            return Err(TxFormatError::TooManyInputs(generic.inputs.len()));
        }

        if generic.outputs.is_empty() || generic.outputs.len() > MAX_OUTPUTS {
            return Err(TxFormatError::InvalidOutputCount(generic.outputs.len()));
        }

        let mut seen = HashSet::with_capacity(generic.inputs.len());
        for (index, input) in generic.inputs.iter().enumerate() {
            if input.is_zero() {
                return Err(TxFormatError::EmptyInput(index));
            }
            if !seen.insert(*input) {
                return Err(TxFormatError::DuplicateInput(index));
            }
        }

        for (index, output) in generic.outputs.iter().enumerate() {
            if output.output_type != protocol.payment_output_type {
                return Err(TxFormatError::UnexpectedOutputType {
                    index,
                    expected: protocol.payment_output_type,
                    actual: output.output_type,
                });
            }
            if output.data.amount.is_zero() {
                return Err(TxFormatError::ZeroAmount(index));
            }
        }

        Ok(Self {
            tx_type: generic.tx_type,
            inputs: generic.inputs.into_iter().map(OutputId::from).collect(),
            outputs: generic.outputs.into_iter().map(PaymentOutput::from).collect(),
            metadata: generic.metadata,
        })
    }

    /// Encodes the transaction into its canonical bytes.
    pub fn encode(&self) -> Vec<u8> {
        GenericTransaction {
            tx_type: self.tx_type,
            inputs: self.inputs.iter().copied().map(B256::from).collect(),
            outputs: self.outputs.iter().cloned().map(GenericOutput::from).collect(),
            metadata: self.metadata,
        }
        .encode_to_vec()
    }

    /// Returns the output at `index`.
    pub fn output(&self, index: usize) -> TxFormatResult<&PaymentOutput> {
        self.outputs
            .get(index)
            .ok_or(TxFormatError::OutputIndexOutOfRange {
                index,
                count: self.outputs.len(),
            })
    }

    /// Returns the position of `output_id` among the inputs, if it is spent by this transaction.
    pub fn input_index_of(&self, output_id: &OutputId) -> Option<usize> {
        self.inputs.iter().position(|input| input == output_id)
    }
}
