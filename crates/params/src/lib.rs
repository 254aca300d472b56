//! This crate contains the consensus-critical parameters that dictate the behavior of the exit
//! game, so that every party watching the root chain agrees on when an exit becomes processable
//! and how much must be escrowed to make a claim.

pub(crate) mod default;
pub mod bonds;
pub mod errors;
pub mod exit_game;
pub mod prelude;
pub mod protocol;
