//! Ordering keys of the exit queue.

use std::fmt;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::{
    errors::{PrimitivesError, PrimitivesResult},
    exit_id::ExitId,
    types::Timestamp,
};

/// Number of bits reserved for the exitable timestamp in the packed priority.
const EXITABLE_AT_BITS: u32 = 42;

/// Number of bits reserved for the transaction position in the packed priority.
const TX_POS_BITS: u32 = 54;

/// Number of bits taken by the exit id in the packed priority.
const EXIT_ID_BITS: usize = 160;

/// The key that orders exits in the queue.
///
/// Exits are ordered by the time they become processable, then by the age of the transaction they
/// refer to, and finally by exit id, so two distinct exits never compare equal. The field order of
/// this struct is load-bearing: the derived [`Ord`] is identical to the order of the packed
/// 256-bit representation returned by [`ExitPriority::to_u256`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExitPriority {
    exitable_at: Timestamp,
    tx_pos: u64,
    exit_id: ExitId,
}

impl ExitPriority {
    /// Builds a priority, checking that every component fits its bit budget.
    pub fn new(exitable_at: Timestamp, tx_pos: u64, exit_id: ExitId) -> PrimitivesResult<Self> {
        check_bits("exitable_at", exitable_at, EXITABLE_AT_BITS)?;
        check_bits("tx_pos", tx_pos, TX_POS_BITS)?;

        Ok(Self {
            exitable_at,
            tx_pos,
            exit_id,
        })
    }

    /// Returns the time at which the exit becomes processable.
    pub const fn exitable_at(&self) -> Timestamp {
        self.exitable_at
    }

    /// Returns the position of the transaction the exit refers to.
    pub const fn tx_pos(&self) -> u64 {
        self.tx_pos
    }

    /// Returns the id of the exit.
    pub const fn exit_id(&self) -> ExitId {
        self.exit_id
    }

    /// Packs the priority as `exitable_at << 214 | tx_pos << 160 | exit_id`.
    pub fn to_u256(&self) -> U256 {
        (U256::from(self.exitable_at) << (EXIT_ID_BITS + TX_POS_BITS as usize))
            | (U256::from(self.tx_pos) << EXIT_ID_BITS)
            | self.exit_id.to_u256()
    }

    /// Unpacks a priority produced by [`ExitPriority::to_u256`].
    pub fn from_u256(packed: U256) -> Self {
        let tx_pos_mask = (U256::from(1u64) << TX_POS_BITS as usize) - U256::from(1u64);
        let exitable_at = packed >> (EXIT_ID_BITS + TX_POS_BITS as usize);
        let tx_pos = (packed >> EXIT_ID_BITS) & tx_pos_mask;

        let bytes = packed.to_be_bytes::<32>();
        let mut exit_id = [0u8; 20];
        exit_id.copy_from_slice(&bytes[12..]);

        Self {
            exitable_at: exitable_at.to::<u64>(),
            tx_pos: tx_pos.to::<u64>(),
            exit_id: ExitId::from(exit_id),
        }
    }
}

impl fmt::Display for ExitPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "exitable_at: {}, tx_pos: {}, exit_id: {}",
            self.exitable_at, self.tx_pos, self.exit_id
        )
    }
}

const fn check_bits(field: &'static str, value: u64, bits: u32) -> PrimitivesResult<()> {
    if value >> bits != 0 {
        return Err(PrimitivesError::PriorityFieldOverflow { field, value, bits });
    }

    Ok(())
}
