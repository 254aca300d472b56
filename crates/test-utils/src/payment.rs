//! Builders for payment transactions.

use alloy_primitives::{Address, B256, U256};
use plasma_exit_params::prelude::ProtocolParams;
use plasma_primitives::{output_id::OutputId, types::Token};
use plasma_tx_format::payment::{PaymentOutput, PaymentTransaction};

/// Incrementally builds a payment transaction using the default protocol markers.
#[derive(Debug, Clone, Default)]
pub struct PaymentTxBuilder {
    inputs: Vec<OutputId>,
    outputs: Vec<PaymentOutput>,
    metadata: B256,
}

impl PaymentTxBuilder {
    /// Starts an empty transaction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spends `output_id`.
    pub fn input(mut self, output_id: OutputId) -> Self {
        self.inputs.push(output_id);
        self
    }

    /// Creates an output of `amount` of `token` owned by `owner`.
    pub fn output(mut self, owner: Address, token: Token, amount: u64) -> Self {
        self.outputs.push(PaymentOutput {
            output_type: ProtocolParams::default().payment_output_type,
            output_guard: owner,
            token,
            amount: U256::from(amount),
        });
        self
    }

    /// Sets the metadata, which is handy to make otherwise identical transactions differ.
    pub fn metadata(mut self, metadata: B256) -> Self {
        self.metadata = metadata;
        self
    }

    /// Returns the transaction.
    pub fn build(self) -> PaymentTransaction {
        PaymentTransaction {
            tx_type: ProtocolParams::default().payment_tx_type,
            inputs: self.inputs,
            outputs: self.outputs,
            metadata: self.metadata,
        }
    }

    /// Returns the encoded transaction.
    pub fn encode(self) -> Vec<u8> {
        self.build().encode()
    }
}

/// Encodes a deposit: a payment without inputs and with a single output.
pub fn deposit_tx(owner: Address, token: Token, amount: u64) -> Vec<u8> {
    PaymentTxBuilder::new().output(owner, token, amount).encode()
}
