//! Identifiers of exit claims.

use std::fmt;

use alloy_primitives::{keccak256, FixedBytes, U256};
use serde::{Deserialize, Serialize};

use crate::output_id::OutputId;

/// Bit (inside the most significant byte) that tags in-flight exit ids.
const IN_FLIGHT_TAG: u8 = 0x80;

/// The two flavours of exit claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExitKind {
    /// An exit of a single output that was included in a block.
    Standard,
    /// An exit of a transaction that may not have been included in a block.
    InFlight,
}

impl fmt::Display for ExitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitKind::Standard => write!(f, "standard"),
            ExitKind::InFlight => write!(f, "in-flight"),
        }
    }
}

/// A 160-bit exit identifier whose top bit tells standard and in-flight exits apart.
///
/// The byte-wise ordering of the id equals its numeric ordering, which is relied upon when the id
/// is used as the final tie-breaker of an exit priority.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ExitId(FixedBytes<20>);

impl ExitId {
    /// Derives the id of the standard exit of `output_id`.
    pub fn standard(output_id: &OutputId) -> Self {
        let mut bytes = low_160_bits(output_id.as_b256().as_slice());
        bytes[0] &= !IN_FLIGHT_TAG;

        Self(bytes.into())
    }

    /// Derives the id of the in-flight exit of the transaction encoded as `tx_bytes`.
    pub fn in_flight(tx_bytes: &[u8]) -> Self {
        let mut bytes = low_160_bits(keccak256(tx_bytes).as_slice());
        bytes[0] |= IN_FLIGHT_TAG;

        Self(bytes.into())
    }

    /// Returns which kind of exit this id belongs to.
    pub const fn kind(&self) -> ExitKind {
        if self.0 .0[0] & IN_FLIGHT_TAG == 0 {
            ExitKind::Standard
        } else {
            ExitKind::InFlight
        }
    }

    /// Returns the raw bytes of the id.
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0 .0
    }

    /// Returns the numeric value of the id.
    pub fn to_u256(&self) -> U256 {
        U256::from_be_slice(self.0.as_slice())
    }
}

impl From<[u8; 20]> for ExitId {
    fn from(value: [u8; 20]) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for ExitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn low_160_bits(hash: &[u8]) -> [u8; 20] {
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash[hash.len() - 20..]);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_tagged_by_kind() {
        let output_id = OutputId::compute(b"tx", 0);

        assert_eq!(ExitId::standard(&output_id).kind(), ExitKind::Standard);
        assert_eq!(ExitId::in_flight(b"tx").kind(), ExitKind::InFlight);
    }

    #[test]
    fn standard_id_is_deterministic() {
        let output_id = OutputId::compute(b"tx", 3);

        assert_eq!(ExitId::standard(&output_id), ExitId::standard(&output_id));
        assert_ne!(
            ExitId::standard(&output_id),
            ExitId::standard(&OutputId::compute(b"tx", 2))
        );
    }

    #[test]
    fn numeric_value_matches_bytes() {
        let id = ExitId::from([0x01; 20]);
        assert_eq!(id.to_u256().to_be_bytes::<32>()[12..], [0x01; 20]);
    }
}
