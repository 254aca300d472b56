//! Utilities shared by every process embedding the exit game, currently the initialization of
//! structured logging.

pub mod logging;
