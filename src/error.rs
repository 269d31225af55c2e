//! Error types for the miner, split into small enums by subsystem.
//!
//! Search outcomes (`Exhausted`, `Cancelled`) are deliberately *not* errors;
//! they are ordinary [`crate::mine::MineOutcome`] variants. Everything here is
//! an input-validation failure that aborts an operation before it starts.

use thiserror::Error;

/// Errors raised when assembling CREATE2 inputs from untyped bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("{field} must be exactly {expected} bytes, got {actual}")]
    InvalidInputLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Errors raised when resolving hook permission names.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlagError {
    #[error("unknown hook flag name: {0:?}")]
    UnknownFlagName(String),
}

/// Errors raised while building an address pattern.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("{0:?} is not a hex digit")]
    InvalidHexDigit(char),

    #[error("suffix is empty")]
    EmptySuffix,

    #[error("suffix of {0} hex characters exceeds the 40 characters of an address")]
    SuffixTooLong(usize),

    #[error("required bits {required:#x} fall outside the mask {mask:#x}; the pattern could never match")]
    RequiredOutsideMask { mask: u64, required: u64 },
}

/// Errors from the tick price math.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TickError {
    #[error(
        "tick {0} is outside the valid range [{min}, {max}]",
        min = crate::tick_math::MIN_TICK,
        max = crate::tick_math::MAX_TICK
    )]
    OutOfRange(i32),
}
