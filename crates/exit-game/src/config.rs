//! Configuration shared by every operation of the exit game.

use plasma_exit_params::prelude::{ExitGameParams, ParamsResult, ProtocolParams};
use plasma_primitives::types::Timestamp;

/// Exit-game-wide configuration derived from [`ExitGameParams`].
///
/// These values are fixed for the lifetime of the exit game; only the bond sizes change over time
/// and those live in the [`BondRegistry`](crate::bonds::BondRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExitGameCfg {
    /// The minimum time an exit waits in the queue before it can be processed.
    pub min_exit_period: u64,
    /// The distance between two consecutive child chain block numbers.
    pub child_block_interval: u64,
    /// The delay before a scheduled bond update takes effect.
    pub bond_update_waiting_period: u64,
    /// A new bond may not be smaller than the current one divided by this.
    pub lower_bound_divisor: u16,
    /// A new bond may not be larger than the current one multiplied by this.
    pub upper_bound_multiplier: u16,
    /// The transaction and output type markers.
    pub protocol: ProtocolParams,
}

impl ExitGameCfg {
    /// Validates `params` and derives the configuration from them.
    pub fn from_params(params: &ExitGameParams) -> ParamsResult<Self> {
        params.validate()?;

        Ok(Self {
            min_exit_period: params.min_exit_period,
            child_block_interval: params.child_block_interval,
            bond_update_waiting_period: params.bond_update_waiting_period(),
            lower_bound_divisor: params.bonds.lower_bound_divisor,
            upper_bound_multiplier: params.bonds.upper_bound_multiplier,
            protocol: params.protocol,
        })
    }

    /// Returns the minimum exit period.
    pub const fn min_exit_period(&self) -> u64 {
        self.min_exit_period
    }

    /// Returns the child block interval.
    pub const fn child_block_interval(&self) -> u64 {
        self.child_block_interval
    }

    /// Returns the bond update waiting period.
    pub const fn bond_update_waiting_period(&self) -> u64 {
        self.bond_update_waiting_period
    }

    /// Returns the lower bound divisor for bond updates.
    pub const fn lower_bound_divisor(&self) -> u16 {
        self.lower_bound_divisor
    }

    /// Returns the upper bound multiplier for bond updates.
    pub const fn upper_bound_multiplier(&self) -> u16 {
        self.upper_bound_multiplier
    }

    /// Returns the protocol markers.
    pub const fn protocol(&self) -> &ProtocolParams {
        &self.protocol
    }

    /// Returns the earliest time an exit started at `now` can be processed.
    pub const fn exitable_at(&self, now: Timestamp) -> Timestamp {
        now.saturating_add(self.min_exit_period)
    }

    /// Returns the time at which the first phase of an in-flight exit started at `started_at`
    /// ends.
    pub const fn first_phase_end(&self, started_at: Timestamp) -> Timestamp {
        started_at.saturating_add(self.min_exit_period / 2)
    }
}
