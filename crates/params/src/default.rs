//! Default values for the exit game parameters.

/// Default minimum exit period: 7 days worth of seconds.
pub(crate) const MIN_EXIT_PERIOD: u64 = 7 * 24 * 60 * 60;

/// Default distance between two consecutive child chain blocks.
///
/// Block numbers that are not a multiple of this value are deposit blocks.
pub(crate) const CHILD_BLOCK_INTERVAL: u64 = 1000;

/// Default bond required to start a standard exit, in wei.
pub(crate) const STANDARD_EXIT_BOND: u64 = 14_000_000_000_000_000;

/// Default bond required to start an in-flight exit, in wei.
pub(crate) const IN_FLIGHT_EXIT_BOND: u64 = 37_000_000_000_000_000;

/// Default bond required to piggyback an input or output of an in-flight exit, in wei.
pub(crate) const PIGGYBACK_BOND: u64 = 28_000_000_000_000_000;

/// Default portion of the piggyback bond paid to whoever processes the exit, in wei.
pub(crate) const PIGGYBACK_BOUNTY: u64 = 10_700_000_000_000_000;

/// A new bond must be at least `current / LOWER_BOUND_DIVISOR`.
pub(crate) const LOWER_BOUND_DIVISOR: u16 = 2;

/// A new bond must be at most `current * UPPER_BOUND_MULTIPLIER`.
pub(crate) const UPPER_BOUND_MULTIPLIER: u16 = 2;

/// Transaction type marker of payment transactions.
pub(crate) const PAYMENT_TX_TYPE: u64 = 1;

/// Output type marker of payment outputs.
pub(crate) const PAYMENT_OUTPUT_TYPE: u64 = 1;
