//! This module contains the top-level parameters of the exit game.

use serde::{Deserialize, Serialize};

use crate::{
    bonds::BondParams,
    default::{CHILD_BLOCK_INTERVAL, MIN_EXIT_PERIOD},
    errors::{ParamsError, ParamsResult},
    protocol::ProtocolParams,
};

/// The consensus-critical parameters of the exit game.
///
/// Differences in these values between two observers of the root chain lead them to disagree on
/// which exits are processable and in which order, so they must be shared by everyone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitGameParams {
    /// The minimum time (in seconds) an exit stays in the queue before it can be processed.
    ///
    /// The first half of this period is the first phase of an in-flight exit.
    pub min_exit_period: u64,

    /// The distance between two consecutive child chain block numbers.
    pub child_block_interval: u64,

    /// The delay (in seconds) before a scheduled bond update takes effect.
    ///
    /// Defaults to twice the minimum exit period when omitted.
    #[serde(default)]
    pub bond_update_waiting_period: Option<u64>,

    /// The initial bond sizes.
    #[serde(default)]
    pub bonds: BondParams,

    /// The transaction and output type markers.
    #[serde(default)]
    pub protocol: ProtocolParams,
}

impl Default for ExitGameParams {
    fn default() -> Self {
        Self {
            min_exit_period: MIN_EXIT_PERIOD,
            child_block_interval: CHILD_BLOCK_INTERVAL,
            bond_update_waiting_period: None,
            bonds: BondParams::default(),
            protocol: ProtocolParams::default(),
        }
    }
}

impl ExitGameParams {
    /// Returns the effective bond update waiting period.
    pub fn bond_update_waiting_period(&self) -> u64 {
        self.bond_update_waiting_period
            .unwrap_or_else(|| self.min_exit_period.saturating_mul(2))
    }

    /// Checks that the parameters describe a usable exit game.
    pub fn validate(&self) -> ParamsResult<()> {
        if self.min_exit_period < 2 {
            return Err(ParamsError::MinExitPeriodTooShort(self.min_exit_period));
        }
        if self.child_block_interval == 0 {
            return Err(ParamsError::ZeroChildBlockInterval);
        }

        self.bonds.validate()
    }
}
