//! Value preservation of in-flight transactions.

use std::{collections::BTreeMap, fmt};

use alloy_primitives::U256;
use plasma_primitives::types::Token;
use plasma_tx_format::payment::PaymentOutput;

use crate::errors::{ExitGameError, ExitGameResult};

/// Decides whether a transaction is a valid state transition from its inputs to its outputs.
pub trait StateTransitionVerifier: fmt::Debug {
    /// Whether spending `inputs` may create `outputs`.
    fn verify(&self, inputs: &[PaymentOutput], outputs: &[PaymentOutput]) -> ExitGameResult<bool>;
}

/// Payments may not create value: for every token, the outputs sum to at most the inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaymentStateTransitionVerifier;

impl StateTransitionVerifier for PaymentStateTransitionVerifier {
    fn verify(&self, inputs: &[PaymentOutput], outputs: &[PaymentOutput]) -> ExitGameResult<bool> {
        let available = sum_by_token(inputs)?;
        let spent = sum_by_token(outputs)?;

        Ok(spent.iter().all(|(token, amount)| {
            available
                .get(token)
                .is_some_and(|available| amount <= available)
        }))
    }
}

fn sum_by_token(outputs: &[PaymentOutput]) -> ExitGameResult<BTreeMap<Token, U256>> {
    let mut sums = BTreeMap::new();
    for output in outputs {
        let sum: &mut U256 = sums.entry(output.token).or_default();
        *sum = sum
            .checked_add(output.amount)
            .ok_or(ExitGameError::AmountOverflow)?;
    }
    Ok(sums)
}

#[cfg(test)]
mod tests {
    use alloy_primitives::Address;
    use plasma_primitives::types::ETH_TOKEN;

    use super::*;

    fn output(token: Token, amount: u64) -> PaymentOutput {
        PaymentOutput {
            output_type: 1,
            output_guard: Address::repeat_byte(0xaa),
            token,
            amount: U256::from(amount),
        }
    }

    #[test]
    fn test_value_preservation() {
        let erc20 = Address::repeat_byte(1);
        let verifier = PaymentStateTransitionVerifier;

        let inputs = [output(ETH_TOKEN, 5), output(ETH_TOKEN, 5), output(erc20, 3)];
        assert!(verifier
            .verify(&inputs, &[output(ETH_TOKEN, 10), output(erc20, 2)])
            .unwrap());
        assert!(!verifier.verify(&inputs, &[output(ETH_TOKEN, 11)]).unwrap());
        assert!(!verifier
            .verify(&inputs, &[output(Address::repeat_byte(2), 1)])
            .unwrap());
    }

    #[test]
    fn test_overflow_is_an_error() {
        let mut huge = output(ETH_TOKEN, 0);
        huge.amount = U256::MAX;

        assert_eq!(
            PaymentStateTransitionVerifier.verify(&[huge.clone(), huge], &[]),
            Err(ExitGameError::AmountOverflow)
        );
    }
}
