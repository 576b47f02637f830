//! Error types for the lockdrop engine.
//!
//! [`ParamsError`] marks configuration or caller bugs and aborts a call.
//! Business-rule outcomes are not errors; they travel in
//! [`AllocationResult::error_reason`](crate::types::AllocationResult).
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("invalid parameters: hard cap must be positive")] ZeroHardCap,
    #[error("invalid parameters: total reward pool must be positive")] ZeroRewardPool,
    #[error("invalid parameters: max duration must be positive")] ZeroMaxDuration,
    #[error("invalid parameters: no allowed durations")] EmptyDurations,
    #[error("invalid parameters: allowed duration {months} outside 1..={max}")] DurationOutOfRange { months: u32, max: u32 },
    #[error("invalid parameters: unsupported duration {0} months")] UnsupportedDuration(u32),
    #[error("invalid parameters: locked amount {0} has no duration")] LockWithoutDuration(u64),
    #[error("invalid parameters: {0} decimals exceeds maximum")] DecimalsTooLarge(u8),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitsError {
    #[error("empty amount")] Empty,
    #[error("invalid character: {0:?}")] InvalidCharacter(char),
    #[error("too many decimal places (max {max})")] TooManyDecimals { max: u8 },
    #[error("amount overflow")] Overflow,
    #[error("{0} decimals exceeds maximum")] DecimalsTooLarge(u8),
}

#[derive(Error, Debug)]
pub enum LockdropError {
    #[error(transparent)] Params(#[from] ParamsError),
    #[error(transparent)] Units(#[from] UnitsError),
}
