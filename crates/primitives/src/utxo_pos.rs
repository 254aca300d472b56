//! The position of an output on the child chain.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    constants::{BLOCK_OFFSET, MAX_TX_INDEX, TX_OFFSET},
    errors::{PrimitivesError, PrimitivesResult},
    types::BlockNumber,
};

/// A packed `(block number, transaction index, output index)` triple.
///
/// The packing is `blknum * BLOCK_OFFSET + tx_index * TX_OFFSET + output_index`, so comparing two
/// positions numerically compares them by age: older blocks first, then earlier transactions.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct UtxoPos(u64);

impl UtxoPos {
    /// Builds a position from its components.
    pub fn new(blknum: BlockNumber, tx_index: u64, output_index: u16) -> PrimitivesResult<Self> {
        if tx_index >= MAX_TX_INDEX {
            return Err(PrimitivesError::InvalidUtxoPos(format!(
                "tx index {tx_index} exceeds {MAX_TX_INDEX}"
            )));
        }
        if u64::from(output_index) >= TX_OFFSET {
            return Err(PrimitivesError::InvalidUtxoPos(format!(
                "output index {output_index} exceeds {TX_OFFSET}"
            )));
        }

        blknum
            .checked_mul(BLOCK_OFFSET)
            .and_then(|pos| pos.checked_add(tx_index * TX_OFFSET + u64::from(output_index)))
            .map(Self)
            .ok_or_else(|| {
                PrimitivesError::InvalidUtxoPos(format!("block number {blknum} is too large"))
            })
    }

    /// Wraps an already packed position.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the packed position.
    pub const fn to_raw(&self) -> u64 {
        self.0
    }

    /// Returns the block number.
    pub const fn blknum(&self) -> BlockNumber {
        self.0 / BLOCK_OFFSET
    }

    /// Returns the index of the transaction inside its block.
    pub const fn tx_index(&self) -> u64 {
        (self.0 % BLOCK_OFFSET) / TX_OFFSET
    }

    /// Returns the index of the output inside its transaction.
    pub const fn output_index(&self) -> u16 {
        (self.0 % TX_OFFSET) as u16
    }

    /// Returns the position of the transaction, dropping the output index.
    ///
    /// This is the value used for exit priorities.
    pub const fn tx_pos(&self) -> u64 {
        self.0 / TX_OFFSET
    }

    /// Returns the position of the same transaction's `output_index`-th output.
    pub fn with_output_index(&self, output_index: u16) -> PrimitivesResult<Self> {
        Self::new(self.blknum(), self.tx_index(), output_index)
    }

    /// Whether the position belongs to a deposit block.
    ///
    /// Child blocks are numbered in multiples of `child_block_interval`; deposit blocks fill the
    /// gaps in between.
    pub const fn is_deposit(&self, child_block_interval: u64) -> bool {
        self.blknum() % child_block_interval != 0
    }
}

impl fmt::Display for UtxoPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.blknum(),
            self.tx_index(),
            self.output_index()
        )
    }
}
