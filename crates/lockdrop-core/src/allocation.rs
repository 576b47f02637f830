//! Lockdrop allocation: weight, reward share and lock validation.
//!
//! A lock of `amount` for `duration_months` has weight `amount * months`.
//! The reward pool is split linearly by weight against the maximum weight
//! (full hard cap for the maximum duration):
//!
//! ```text
//! reward = floor(total_reward_pool * weight / max_weight)    (capped at the pool)
//! ```
//!
//! Truncation always favors the pool, so the sum of all allocations never
//! exceeds it.

use tracing::{debug, trace};

use crate::error::ParamsError;
use crate::types::{AllocationResult, LockPosition, LockProgramParams, LockViolation};
use crate::wide::mul_div_floor;

/// Fixed-point scale for the percentage before it is converted to `f64`.
pub const PERCENT_PRECISION: u128 = 1_000_000_000_000_000_000;

/// Weight of the full hard cap locked for the maximum duration.
///
/// # Examples
///
/// ```
/// use lockdrop_core::{max_weight, LockProgramParams};
/// assert_eq!(max_weight(&LockProgramParams::default()), 5_000_000_000_000 * 12);
/// ```
pub fn max_weight(params: &LockProgramParams) -> u128 {
    params.max_weight()
}

/// Reward owed for `weight`, capped at the pool.
///
/// Weights above the maximum (over-cap previews) saturate at
/// `total_reward_pool` instead of overflowing.
pub fn reward_for_weight(params: &LockProgramParams, weight: u128) -> u128 {
    let pool = params.total_reward_pool();
    // `None` only when the quotient exceeds u128, which is above the pool anyway.
    mul_div_floor(pool, weight, params.max_weight())
        .unwrap_or(pool)
        .min(pool)
}

/// Share of the pool that `reward` represents, in percent.
///
/// Exactly `100.0` when `reward` reaches the pool; never outside `[0, 100]`.
pub fn allocation_percent(params: &LockProgramParams, reward: u128) -> f64 {
    let pool = params.total_reward_pool();
    if reward >= pool {
        return 100.0;
    }
    let scaled = mul_div_floor(reward, 100 * PERCENT_PRECISION, pool).unwrap_or(0);
    let percent = scaled as f64 / PERCENT_PRECISION as f64;
    percent.clamp(0.0, 100.0)
}

/// Reject positions the engine cannot reason about.
fn check_positions(
    params: &LockProgramParams,
    current: &LockPosition,
    proposed: &LockPosition,
) -> Result<(), ParamsError> {
    if current.duration_months != 0 && !params.is_allowed_duration(current.duration_months) {
        return Err(ParamsError::UnsupportedDuration(current.duration_months));
    }
    if current.amount > 0 && current.duration_months == 0 {
        return Err(ParamsError::LockWithoutDuration(current.amount));
    }
    if !params.is_allowed_duration(proposed.duration_months) {
        return Err(ParamsError::UnsupportedDuration(proposed.duration_months));
    }
    Ok(())
}

/// First business rule the proposal breaks, in precedence order.
pub fn check_lock_rules(
    params: &LockProgramParams,
    current: &LockPosition,
    proposed: &LockPosition,
) -> Option<LockViolation> {
    if proposed.amount < current.amount {
        Some(LockViolation::AmountDecreased)
    } else if proposed.duration_months < current.duration_months {
        Some(LockViolation::DurationDecreased)
    } else if proposed.amount > params.hard_cap_amount() {
        Some(LockViolation::ExceedsHardCap)
    } else {
        None
    }
}

/// Evaluate a proposed lock against the account's current lock.
///
/// `current` is [`LockPosition::NONE`] for an account without a lock.
/// Business-rule violations do not fail the call: the preview is computed
/// from the raw proposal and the reason is reported in the result.
///
/// # Errors
///
/// [`ParamsError`] when `params` are malformed or a duration is outside the
/// program's allowed set.
///
/// # Examples
///
/// ```
/// use lockdrop_core::{evaluate, LockPosition, LockProgramParams};
/// let params = LockProgramParams::default();
/// let proposed = LockPosition::new(100_000_000_000, 12); // 100,000 USDC, 1 year
/// let result = evaluate(&params, &LockPosition::NONE, &proposed).unwrap();
/// assert_eq!(result.reward_amount, 30_000 * 10u128.pow(18));
/// assert_eq!(result.allocation_percent, 2.0);
/// assert!(result.is_valid);
/// ```
pub fn evaluate(
    params: &LockProgramParams,
    current: &LockPosition,
    proposed: &LockPosition,
) -> Result<AllocationResult, ParamsError> {
    params.validate()?;
    check_positions(params, current, proposed)?;

    let weight = proposed.weight();
    let reward_amount = reward_for_weight(params, weight);
    let allocation_percent = allocation_percent(params, reward_amount);
    let error_reason = check_lock_rules(params, current, proposed);

    trace!(
        amount = proposed.amount,
        duration = proposed.duration_months,
        %weight,
        %reward_amount,
        "evaluated lock"
    );
    if let Some(reason) = error_reason {
        debug!(
            current_amount = current.amount,
            current_duration = current.duration_months,
            proposed_amount = proposed.amount,
            proposed_duration = proposed.duration_months,
            %reason,
            "lock proposal rejected"
        );
    }

    Ok(AllocationResult {
        weight,
        reward_amount,
        allocation_percent,
        is_valid: error_reason.is_none(),
        error_reason,
    })
}

/// Allocation calculator bound to one deployment's parameters.
#[derive(Debug, Clone, Default)]
pub struct AllocationCalculator {
    params: LockProgramParams,
}

impl AllocationCalculator {
    pub fn new(params: LockProgramParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &LockProgramParams {
        &self.params
    }

    pub fn max_weight(&self) -> u128 {
        self.params.max_weight()
    }

    /// See [`evaluate`].
    pub fn evaluate(
        &self,
        current: &LockPosition,
        proposed: &LockPosition,
    ) -> Result<AllocationResult, ParamsError> {
        evaluate(&self.params, current, proposed)
    }
}
