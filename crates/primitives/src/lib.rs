//! This crate contains general types and pure functions that need to be shared across multiple
//! crates: child chain positions, output and exit identifiers, exit priorities and the Merkle
//! inclusion check used against submitted block roots.
//!
//! This crate lies at the bottom of the crate-hierarchy in this workspace i.e., it does not depend
//! on any other crate in this workspace.

pub mod constants;
pub mod errors;
pub mod exit_id;
pub mod merkle;
pub mod output_id;
pub mod priority;
pub mod types;
pub mod utxo_pos;
