//! Pluggable checks the exit game delegates to.
//!
//! - [`spending_condition`] decides whether a transaction is allowed to spend an output.
//! - [`state_transition`] decides whether an in-flight transaction preserves value.

pub mod spending_condition;
pub mod state_transition;
