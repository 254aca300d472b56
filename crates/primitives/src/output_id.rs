//! Unique fingerprints of child chain outputs.

use std::fmt;

use alloy_primitives::{Keccak256, B256, U256};
use serde::{Deserialize, Serialize};

use crate::utxo_pos::UtxoPos;

/// Identifies an output independently of where it is being referenced from.
///
/// Regular outputs are identified by the bytes of the transaction that created them and their
/// index, which keeps the id stable when an in-flight transaction later gets included in a block.
/// Deposit transactions can be byte-identical, so their position is mixed in as well.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct OutputId(B256);

impl OutputId {
    /// The id of an absent output.
    pub const ZERO: Self = Self(B256::ZERO);

    /// Computes the id of a non-deposit output.
    pub fn compute(tx_bytes: &[u8], output_index: u16) -> Self {
        let mut hasher = Keccak256::new();
        hasher.update(tx_bytes);
        hasher.update(output_index.to_be_bytes());

        Self(hasher.finalize())
    }

    /// Computes the id of an output created by a deposit transaction.
    pub fn compute_deposit(tx_bytes: &[u8], output_index: u16, utxo_pos: UtxoPos) -> Self {
        let mut hasher = Keccak256::new();
        hasher.update(tx_bytes);
        hasher.update(output_index.to_be_bytes());
        hasher.update(U256::from(utxo_pos.to_raw()).to_be_bytes::<32>());

        Self(hasher.finalize())
    }

    /// Computes the id of the output at `utxo_pos`, choosing the deposit form when the position
    /// falls in a deposit block.
    pub fn at_position(tx_bytes: &[u8], utxo_pos: UtxoPos, child_block_interval: u64) -> Self {
        if utxo_pos.is_deposit(child_block_interval) {
            Self::compute_deposit(tx_bytes, utxo_pos.output_index(), utxo_pos)
        } else {
            Self::compute(tx_bytes, utxo_pos.output_index())
        }
    }

    /// Whether this is the id of an absent output.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns the underlying hash.
    pub const fn as_b256(&self) -> &B256 {
        &self.0
    }
}

impl From<B256> for OutputId {
    fn from(value: B256) -> Self {
        Self(value)
    }
}

impl From<OutputId> for B256 {
    fn from(value: OutputId) -> Self {
        value.0
    }
}

impl fmt::Display for OutputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposit_ids_depend_on_position() {
        let tx = b"same deposit bytes";
        let first = UtxoPos::new(1, 0, 0).unwrap();
        let second = UtxoPos::new(2, 0, 0).unwrap();

        assert_ne!(
            OutputId::at_position(tx, first, 1000),
            OutputId::at_position(tx, second, 1000)
        );
    }

    #[test]
    fn regular_ids_do_not_depend_on_position() {
        let tx = b"payment bytes";
        let first = UtxoPos::new(1000, 0, 1).unwrap();
        let second = UtxoPos::new(2000, 5, 1).unwrap();

        assert_eq!(
            OutputId::at_position(tx, first, 1000),
            OutputId::at_position(tx, second, 1000)
        );
        assert_eq!(
            OutputId::at_position(tx, first, 1000),
            OutputId::compute(tx, 1)
        );
    }

    #[test]
    fn output_index_is_part_of_the_id() {
        assert_ne!(OutputId::compute(b"tx", 0), OutputId::compute(b"tx", 1));
        assert!(!OutputId::compute(b"tx", 0).is_zero());
        assert!(OutputId::ZERO.is_zero());
    }
}
