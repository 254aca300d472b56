//! Spending conditions, keyed by the type of the spent output and of the spending transaction.

use std::{collections::HashMap, fmt};

use alloy_primitives::Address;
use plasma_exit_params::prelude::ProtocolParams;
use plasma_primitives::{
    output_id::OutputId,
    types::{OutputType, TxType},
};
use plasma_tx_format::{
    payment::{tx_hash, PaymentTransaction},
    signature::recover_signer,
};
use tracing::debug;

use crate::errors::{ExitGameError, ExitGameResult};

/// The output being spent, as far as a spending condition is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpentOutput {
    /// The id of the output.
    pub output_id: OutputId,
    /// The address guarding the output.
    pub output_guard: Address,
}

/// Decides whether a transaction may spend an output.
pub trait SpendingCondition: fmt::Debug {
    /// Whether `spending_tx` spends `spent` as its input `input_index`, authorized by `witness`.
    ///
    /// Malformed transactions and witnesses are reported as errors; well-formed ones that do not
    /// satisfy the condition yield `Ok(false)`.
    fn verify(
        &self,
        spent: &SpentOutput,
        spending_tx: &[u8],
        input_index: usize,
        witness: &[u8],
    ) -> ExitGameResult<bool>;
}

/// A payment output spent by a payment transaction: the spender must reference the output and be
/// signed by its guard.
#[derive(Debug, Clone)]
pub struct PaymentSpendingCondition {
    protocol: ProtocolParams,
}

impl PaymentSpendingCondition {
    /// Creates the condition for the payment markers in `protocol`.
    pub const fn new(protocol: ProtocolParams) -> Self {
        Self { protocol }
    }
}

impl SpendingCondition for PaymentSpendingCondition {
    fn verify(
        &self,
        spent: &SpentOutput,
        spending_tx: &[u8],
        input_index: usize,
        witness: &[u8],
    ) -> ExitGameResult<bool> {
        let tx = PaymentTransaction::decode(spending_tx, &self.protocol)?;

        if tx.inputs.get(input_index) != Some(&spent.output_id) {
            debug!(%input_index, output_id = %spent.output_id, "spending tx does not reference output");
            return Ok(false);
        }

        let signer = recover_signer(&tx_hash(spending_tx), witness)?;
        Ok(signer == spent.output_guard)
    }
}

/// The spending conditions known to an exit game.
///
/// A missing registration is an error, never a default.
#[derive(Debug, Default)]
pub struct SpendingConditionRegistry {
    conditions: HashMap<(OutputType, TxType), Box<dyn SpendingCondition>>,
}

impl SpendingConditionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry that knows how payment transactions spend payment outputs.
    pub fn with_payment(protocol: ProtocolParams) -> Self {
        let mut registry = Self::new();
        registry.conditions.insert(
            (protocol.payment_output_type, protocol.payment_tx_type),
            Box::new(PaymentSpendingCondition::new(protocol)),
        );
        registry
    }

    /// Registers `condition` for spending outputs of `output_type` with transactions of `tx_type`.
    pub fn register(
        &mut self,
        output_type: OutputType,
        tx_type: TxType,
        condition: Box<dyn SpendingCondition>,
    ) -> ExitGameResult<()> {
        if self.conditions.contains_key(&(output_type, tx_type)) {
            return Err(ExitGameError::SpendingConditionAlreadyRegistered {
                output_type,
                tx_type,
            });
        }

        self.conditions.insert((output_type, tx_type), condition);
        Ok(())
    }

    /// Returns the condition for spending outputs of `output_type` with transactions of
    /// `tx_type`.
    pub fn get(
        &self,
        output_type: OutputType,
        tx_type: TxType,
    ) -> ExitGameResult<&dyn SpendingCondition> {
        self.conditions
            .get(&(output_type, tx_type))
            .map(|condition| condition.as_ref())
            .ok_or(ExitGameError::SpendingConditionNotRegistered {
                output_type,
                tx_type,
            })
    }
}
