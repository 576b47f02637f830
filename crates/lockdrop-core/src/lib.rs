//! # lockdrop-core
//! Allocation and validation engine for the LDY lockdrop.
//!
//! All amounts are fixed-point integers in the smallest unit of their token.
//! The only floating-point value is the display percentage in
//! [`AllocationResult`](types::AllocationResult).

pub mod allocation;
pub mod constants;
pub mod deposit;
pub mod error;
pub mod lock;
pub mod progress;
pub mod types;
pub mod units;
pub mod wide;

pub use allocation::{AllocationCalculator, evaluate, max_weight};
pub use error::{LockdropError, ParamsError, UnitsError};
pub use types::{AllocationResult, LockPosition, LockProgramParams, LockViolation};
