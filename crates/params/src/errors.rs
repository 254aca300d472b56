//! Errors for the exit game parameters.

use thiserror::Error;

/// Error while validating a set of exit game parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    /// The minimum exit period must be long enough to be split into two phases.
    #[error("min exit period must be at least 2 seconds, got {0}")]
    MinExitPeriodTooShort(u64),

    /// Child block interval of zero makes every block a deposit block.
    #[error("child block interval must be non-zero")]
    ZeroChildBlockInterval,

    /// A bond size of zero.
    #[error("{0} must be non-zero")]
    ZeroBond(&'static str),

    /// The bounty paid out of a bond cannot be larger than the bond itself.
    #[error("piggyback bounty {bounty} exceeds piggyback bond {bond}")]
    BountyExceedsBond {
        /// The configured bond.
        bond: u64,
        /// The configured bounty.
        bounty: u64,
    },

    /// Bond update bound factors must be at least one.
    #[error("bond update bound factors must be at least 1")]
    InvalidBoundFactor,
}

/// The result type for parameter validation.
pub type ParamsResult<T> = Result<T, ParamsError>;
