//! Bond and bounty sizes with delayed updates.
//!
//! A bond update only takes effect after a waiting period, so that nobody can be surprised by a
//! bond change between submitting a call and having it executed.

use std::fmt;

use alloy_primitives::U256;
use plasma_exit_params::prelude::BondParams;
use plasma_primitives::types::Timestamp;
use serde::{Deserialize, Serialize};

use crate::errors::BondError;

/// The bonds managed by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BondKind {
    /// The bond of a standard exit.
    StandardExit,
    /// The bond of an in-flight exit.
    InFlightExit,
    /// The bond (and bounty) of a piggyback.
    Piggyback,
}

impl fmt::Display for BondKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BondKind::StandardExit => write!(f, "standard exit bond"),
            BondKind::InFlightExit => write!(f, "in-flight exit bond"),
            BondKind::Piggyback => write!(f, "piggyback bond"),
        }
    }
}

/// A value that has been scheduled to replace the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingValue {
    /// The scheduled value.
    pub value: U256,
    /// The time from which the scheduled value applies.
    pub effective_at: Timestamp,
}

/// A value with at most one scheduled replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayedValue {
    current: U256,
    pending: Option<PendingValue>,
}

impl DelayedValue {
    /// Creates a value with nothing scheduled.
    pub const fn new(value: U256) -> Self {
        Self {
            current: value,
            pending: None,
        }
    }

    /// Returns the value in effect at `now`.
    pub fn value_at(&self, now: Timestamp) -> U256 {
        match self.pending {
            Some(pending) if now >= pending.effective_at => pending.value,
            _ => self.current,
        }
    }

    /// Returns the scheduled replacement, if any.
    pub const fn pending(&self) -> Option<PendingValue> {
        self.pending
    }

    /// Schedules `value` to take effect at `effective_at`.
    ///
    /// A replacement that already took effect becomes the current value first; one that did not
    /// is discarded.
    pub fn schedule(&mut self, value: U256, now: Timestamp, effective_at: Timestamp) {
        self.current = self.value_at(now);
        self.pending = Some(PendingValue {
            value,
            effective_at,
        });
    }
}

/// The bond sizes of an exit game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BondRegistry {
    standard_exit: DelayedValue,
    in_flight_exit: DelayedValue,
    piggyback: DelayedValue,
    piggyback_bounty: DelayedValue,
    lower_bound_divisor: u16,
    upper_bound_multiplier: u16,
}

impl BondRegistry {
    /// Creates a registry holding the initial sizes from `params`.
    pub fn new(params: &BondParams) -> Self {
        Self {
            standard_exit: DelayedValue::new(U256::from(params.standard_exit_bond)),
            in_flight_exit: DelayedValue::new(U256::from(params.in_flight_exit_bond)),
            piggyback: DelayedValue::new(U256::from(params.piggyback_bond)),
            piggyback_bounty: DelayedValue::new(U256::from(params.piggyback_bounty)),
            lower_bound_divisor: params.lower_bound_divisor,
            upper_bound_multiplier: params.upper_bound_multiplier,
        }
    }

    /// Returns the standard exit bond at `now`.
    pub fn standard_exit_bond(&self, now: Timestamp) -> U256 {
        self.standard_exit.value_at(now)
    }

    /// Returns the in-flight exit bond at `now`.
    pub fn in_flight_exit_bond(&self, now: Timestamp) -> U256 {
        self.in_flight_exit.value_at(now)
    }

    /// Returns the piggyback bond at `now`.
    pub fn piggyback_bond(&self, now: Timestamp) -> U256 {
        self.piggyback.value_at(now)
    }

    /// Returns the bounty taken out of a piggyback bond at `now`.
    pub fn piggyback_bounty(&self, now: Timestamp) -> U256 {
        self.piggyback_bounty.value_at(now)
    }

    /// Returns the delayed value backing `kind`.
    pub const fn delayed(&self, kind: BondKind) -> &DelayedValue {
        match kind {
            BondKind::StandardExit => &self.standard_exit,
            BondKind::InFlightExit => &self.in_flight_exit,
            BondKind::Piggyback => &self.piggyback,
        }
    }

    /// Schedules a new standard exit or in-flight exit bond.
    ///
    /// Piggyback bonds go through [`Self::schedule_piggyback`] since their bounty changes along
    /// with them.
    pub fn schedule(
        &mut self,
        kind: BondKind,
        value: U256,
        now: Timestamp,
        effective_at: Timestamp,
    ) -> Result<(), BondError> {
        let bond = match kind {
            BondKind::StandardExit => &mut self.standard_exit,
            BondKind::InFlightExit => &mut self.in_flight_exit,
            BondKind::Piggyback => {
                let bounty = self.piggyback_bounty(now);
                return self.schedule_piggyback(value, bounty, now, effective_at);
            }
        };

        check_bounds(
            bond.value_at(now),
            value,
            self.lower_bound_divisor,
            self.upper_bound_multiplier,
        )?;
        bond.schedule(value, now, effective_at);

        Ok(())
    }

    /// Schedules a new piggyback bond together with the bounty paid out of it.
    pub fn schedule_piggyback(
        &mut self,
        bond: U256,
        bounty: U256,
        now: Timestamp,
        effective_at: Timestamp,
    ) -> Result<(), BondError> {
        check_bounds(
            self.piggyback.value_at(now),
            bond,
            self.lower_bound_divisor,
            self.upper_bound_multiplier,
        )?;
        if bounty > bond {
            return Err(BondError::BountyExceedsBond { bond, bounty });
        }

        self.piggyback.schedule(bond, now, effective_at);
        self.piggyback_bounty.schedule(bounty, now, effective_at);

        Ok(())
    }
}

fn check_bounds(
    current: U256,
    proposed: U256,
    lower_bound_divisor: u16,
    upper_bound_multiplier: u16,
) -> Result<(), BondError> {
    if proposed.is_zero() {
        return Err(BondError::ZeroBond);
    }

    let lower = current / U256::from(lower_bound_divisor.max(1));
    let upper = current.saturating_mul(U256::from(upper_bound_multiplier));
    if proposed < lower || proposed > upper {
        return Err(BondError::OutOfBounds {
            proposed,
            lower,
            upper,
        });
    }

    Ok(())
}
