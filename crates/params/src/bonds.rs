//! This module contains the parameters that govern the bonds escrowed by exit claims.

use serde::{Deserialize, Serialize};

use crate::{
    default::{
        IN_FLIGHT_EXIT_BOND, LOWER_BOUND_DIVISOR, PIGGYBACK_BOND, PIGGYBACK_BOUNTY,
        STANDARD_EXIT_BOND, UPPER_BOUND_MULTIPLIER,
    },
    errors::{ParamsError, ParamsResult},
};

/// The initial bond sizes and the bounds that every later bond update must respect.
///
/// All amounts are denominated in wei.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BondParams {
    /// The bond required to start a standard exit.
    pub standard_exit_bond: u64,

    /// The bond required to start an in-flight exit.
    pub in_flight_exit_bond: u64,

    /// The bond required to piggyback a single input or output of an in-flight exit.
    pub piggyback_bond: u64,

    /// The part of the piggyback bond that is paid to the initiator of exit processing.
    pub piggyback_bounty: u64,

    /// A scheduled bond must be at least `current / lower_bound_divisor`.
    #[serde(default = "default_lower_bound_divisor")]
    pub lower_bound_divisor: u16,

    /// A scheduled bond must be at most `current * upper_bound_multiplier`.
    #[serde(default = "default_upper_bound_multiplier")]
    pub upper_bound_multiplier: u16,
}

const fn default_lower_bound_divisor() -> u16 {
    LOWER_BOUND_DIVISOR
}

const fn default_upper_bound_multiplier() -> u16 {
    UPPER_BOUND_MULTIPLIER
}

impl Default for BondParams {
    fn default() -> Self {
        Self {
            standard_exit_bond: STANDARD_EXIT_BOND,
            in_flight_exit_bond: IN_FLIGHT_EXIT_BOND,
            piggyback_bond: PIGGYBACK_BOND,
            piggyback_bounty: PIGGYBACK_BOUNTY,
            lower_bound_divisor: LOWER_BOUND_DIVISOR,
            upper_bound_multiplier: UPPER_BOUND_MULTIPLIER,
        }
    }
}

impl BondParams {
    /// Checks that every bond is usable.
    pub fn validate(&self) -> ParamsResult<()> {
        if self.standard_exit_bond == 0 {
            return Err(ParamsError::ZeroBond("standard exit bond"));
        }
        if self.in_flight_exit_bond == 0 {
            return Err(ParamsError::ZeroBond("in-flight exit bond"));
        }
        if self.piggyback_bond == 0 {
            return Err(ParamsError::ZeroBond("piggyback bond"));
        }
        if self.piggyback_bounty > self.piggyback_bond {
            return Err(ParamsError::BountyExceedsBond {
                bond: self.piggyback_bond,
                bounty: self.piggyback_bounty,
            });
        }
        if self.lower_bound_divisor == 0 || self.upper_bound_multiplier == 0 {
            return Err(ParamsError::InvalidBoundFactor);
        }

        Ok(())
    }
}
