//! The environment of a single call into the exit game.

use alloy_primitives::{Address, U256};
use plasma_primitives::types::Timestamp;

/// Who is calling, with how much value attached, and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    /// The account making the call.
    pub caller: Address,
    /// The native funds sent along with the call, taken as a bond.
    pub value: U256,
    /// The timestamp of the root chain block executing the call.
    pub timestamp: Timestamp,
}

impl CallContext {
    /// Creates a context for a call carrying no value.
    pub const fn new(caller: Address, timestamp: Timestamp) -> Self {
        Self {
            caller,
            value: U256::ZERO,
            timestamp,
        }
    }

    /// Attaches `value` to the call.
    pub const fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }
}
