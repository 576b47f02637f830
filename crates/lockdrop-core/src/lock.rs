//! Lock update helpers: what a proposal changes relative to the committed
//! lock, the form's default proposal, and which durations can be picked.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PROPOSAL_UNITS;
use crate::types::{LockPosition, LockProgramParams};

/// Difference between a proposal and the committed lock.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LockDelta {
    /// Underlying the lock transaction must transfer. Zero when the proposal
    /// does not add to the lock.
    pub additional_amount: u64,
    /// Months added to the lock duration. Zero when not extended.
    pub duration_extension: u32,
    /// True when submitting would change nothing.
    pub is_noop: bool,
}

/// Whether the account holds a lock. Duration alone does not count.
pub fn has_locked(current: &LockPosition) -> bool {
    current.amount != 0
}

/// What submitting `proposed` would change.
///
/// # Examples
///
/// ```
/// use lockdrop_core::lock::lock_delta;
/// use lockdrop_core::LockPosition;
/// let delta = lock_delta(&LockPosition::new(100, 3), &LockPosition::new(150, 6));
/// assert_eq!(delta.additional_amount, 50);
/// assert_eq!(delta.duration_extension, 3);
/// assert!(!delta.is_noop);
/// ```
pub fn lock_delta(current: &LockPosition, proposed: &LockPosition) -> LockDelta {
    let additional_amount = proposed.amount.saturating_sub(current.amount);
    let duration_extension = proposed
        .duration_months
        .saturating_sub(current.duration_months);
    LockDelta {
        additional_amount,
        duration_extension,
        is_noop: additional_amount == 0 && proposed.duration_months == current.duration_months,
    }
}

/// Proposal the form starts from: the committed lock when there is one,
/// otherwise 100 whole units for the longest allowed duration.
pub fn default_proposal(params: &LockProgramParams, current: &LockPosition) -> LockPosition {
    if has_locked(current) {
        return *current;
    }
    let unit = 10u64.checked_pow(params.underlying_decimals() as u32).unwrap_or(u64::MAX);
    LockPosition::new(
        DEFAULT_PROPOSAL_UNITS.saturating_mul(unit),
        params.longest_duration(),
    )
}

/// One entry of the duration picker.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DurationOption {
    pub months: u32,
    /// Weight multiplier applied to the amount (shown as "x3", "x6", ...).
    pub multiplier: u32,
    /// False when picking it would shorten the committed lock.
    pub selectable: bool,
}

impl DurationOption {
    pub fn label(&self) -> String {
        if self.months % 12 == 0 {
            format!("{}Y", self.months / 12)
        } else {
            format!("{}M", self.months)
        }
    }
}

/// Every allowed duration, shortest first, flagged by selectability.
pub fn duration_options(params: &LockProgramParams, current: &LockPosition) -> Vec<DurationOption> {
    params
        .allowed_durations()
        .iter()
        .map(|&months| DurationOption {
            months,
            multiplier: months,
            selectable: months >= current.duration_months,
        })
        .collect()
}
