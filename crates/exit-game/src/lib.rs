//! This crate implements the exit game of a Plasma chain.
//!
//! Users whose funds were last recorded on the child chain claim them back on the root chain by
//! starting exits. Exits wait in a priority queue for a challenge period during which anybody can
//! prove them invalid and collect the exit bond. The crate is organized as follows:
//!
//! - [`framework`] holds what is shared by every exit game: submitted block roots, the exit queues,
//!   the record of finalized outputs and the vaults.
//! - [`game`] holds the payment exit game, whose operations are split between [`standard_exit`]
//!   and [`in_flight_exit`].
//! - [`framework::PlasmaFramework::process_exits`] drains a queue and settles due exits through
//!   the [`framework::ExitProcessor`] seam.
//!
//! Every operation either fails without touching any state or succeeds and returns the
//! [`events::ExitGameEvent`]s it produced. Fund transfers made while settling never fail an
//! operation; they are reported as events instead.

pub mod bonds;
pub mod config;
pub mod context;
pub mod errors;
pub mod events;
pub mod framework;
pub mod game;
pub mod in_flight_exit;
pub mod priority_queue;
pub mod spend_tracker;
pub mod standard_exit;
pub mod transfer;
pub mod verifiers;

#[cfg(test)]
pub(crate) mod testing;
