//! Re-exports of the most commonly used parameter types.

pub use crate::{
    bonds::BondParams,
    errors::{ParamsError, ParamsResult},
    exit_game::ExitGameParams,
    protocol::{ProtocolParams, MAX_INPUTS, MAX_OUTPUTS},
};
