//! Markers that identify the transaction and output formats understood by the exit game.

use serde::{Deserialize, Serialize};

use crate::default::{PAYMENT_OUTPUT_TYPE, PAYMENT_TX_TYPE};

/// The maximum number of inputs a transaction may spend.
pub const MAX_INPUTS: usize = 4;

/// The maximum number of outputs a transaction may create.
pub const MAX_OUTPUTS: usize = 4;

/// Type markers carried inside encoded transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProtocolParams {
    /// The `tx_type` field of payment transactions.
    pub payment_tx_type: u64,

    /// The `output_type` field of payment outputs.
    pub payment_output_type: u64,
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            payment_tx_type: PAYMENT_TX_TYPE,
            payment_output_type: PAYMENT_OUTPUT_TYPE,
        }
    }
}
