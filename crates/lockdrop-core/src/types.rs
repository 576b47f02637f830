//! Value types for the lockdrop: program parameters, lock positions and
//! computed allocations.
//!
//! Underlying amounts are `u64` smallest units, reward amounts `u128`
//! smallest units, durations whole months.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    ALLOWED_DURATIONS, HARD_CAP_AMOUNT, MAX_DECIMALS, MAX_DURATION_MONTHS, REWARD_DECIMALS,
    TOTAL_REWARD_POOL, UNDERLYING_DECIMALS,
};
use crate::error::{LockdropError, ParamsError};
use crate::units::{parse_amount, parse_units};

/// Constants of one lockdrop deployment.
///
/// Only constructible through [`LockProgramParams::new`] (or deserialization,
/// which runs the same checks), so a value in hand always has non-zero
/// divisors and a usable duration set.
///
/// # Examples
///
/// ```
/// use lockdrop_core::LockProgramParams;
/// let params = LockProgramParams::default();
/// assert_eq!(params.max_weight(), 60_000_000_000_000);
/// assert_eq!(params.allowed_durations(), &[3, 6, 12]);
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(try_from = "RawProgramParams", into = "RawProgramParams")]
pub struct LockProgramParams {
    hard_cap_amount: u64,
    max_duration_months: u32,
    total_reward_pool: u128,
    allowed_durations: Vec<u32>,
    underlying_decimals: u8,
    reward_decimals: u8,
}

impl LockProgramParams {
    /// Validate and build program parameters.
    ///
    /// `allowed_durations` is sorted and deduplicated; every entry must lie in
    /// `1..=max_duration_months`. Decimals default to 6 (underlying) and 18
    /// (reward); see [`with_decimals`](Self::with_decimals).
    pub fn new(
        hard_cap_amount: u64,
        max_duration_months: u32,
        total_reward_pool: u128,
        allowed_durations: impl Into<Vec<u32>>,
    ) -> Result<Self, ParamsError> {
        let mut allowed_durations = allowed_durations.into();
        allowed_durations.sort_unstable();
        allowed_durations.dedup();

        let params = Self {
            hard_cap_amount,
            max_duration_months,
            total_reward_pool,
            allowed_durations,
            underlying_decimals: UNDERLYING_DECIMALS,
            reward_decimals: REWARD_DECIMALS,
        };
        params.validate()?;
        tracing::debug!(
            hard_cap = params.hard_cap_amount,
            max_duration = params.max_duration_months,
            pool = %params.total_reward_pool,
            "lockdrop params validated"
        );
        Ok(params)
    }

    /// Build from amounts written in whole tokens, e.g. `"5000000"` USDC and
    /// `"1500000"` LDY, scaled by the given decimals.
    pub fn from_whole_tokens(
        hard_cap: &str,
        max_duration_months: u32,
        total_reward_pool: &str,
        allowed_durations: impl Into<Vec<u32>>,
        underlying_decimals: u8,
        reward_decimals: u8,
    ) -> Result<Self, LockdropError> {
        let hard_cap_amount = parse_amount(hard_cap, underlying_decimals)?;
        let total_reward_pool = parse_units(total_reward_pool, reward_decimals)?;
        let params = Self::new(
            hard_cap_amount,
            max_duration_months,
            total_reward_pool,
            allowed_durations,
        )?
        .with_decimals(underlying_decimals, reward_decimals)?;
        Ok(params)
    }

    /// Override the fixed-point precisions of the two tokens.
    pub fn with_decimals(mut self, underlying: u8, reward: u8) -> Result<Self, ParamsError> {
        self.underlying_decimals = underlying;
        self.reward_decimals = reward;
        self.validate()?;
        Ok(self)
    }

    /// Re-check every construction invariant.
    ///
    /// Always `Ok` for values built through [`new`](Self::new).
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.hard_cap_amount == 0 {
            return Err(ParamsError::ZeroHardCap);
        }
        if self.total_reward_pool == 0 {
            return Err(ParamsError::ZeroRewardPool);
        }
        if self.max_duration_months == 0 {
            return Err(ParamsError::ZeroMaxDuration);
        }
        if self.allowed_durations.is_empty() {
            return Err(ParamsError::EmptyDurations);
        }
        if let Some(&months) = self
            .allowed_durations
            .iter()
            .find(|&&m| m == 0 || m > self.max_duration_months)
        {
            return Err(ParamsError::DurationOutOfRange {
                months,
                max: self.max_duration_months,
            });
        }
        for decimals in [self.underlying_decimals, self.reward_decimals] {
            if decimals > MAX_DECIMALS {
                return Err(ParamsError::DecimalsTooLarge(decimals));
            }
        }
        Ok(())
    }

    pub fn hard_cap_amount(&self) -> u64 {
        self.hard_cap_amount
    }

    pub fn max_duration_months(&self) -> u32 {
        self.max_duration_months
    }

    pub fn total_reward_pool(&self) -> u128 {
        self.total_reward_pool
    }

    /// Sorted, deduplicated durations a lock may use.
    pub fn allowed_durations(&self) -> &[u32] {
        &self.allowed_durations
    }

    pub fn underlying_decimals(&self) -> u8 {
        self.underlying_decimals
    }

    pub fn reward_decimals(&self) -> u8 {
        self.reward_decimals
    }

    /// Weight of the full hard cap locked for the maximum duration.
    pub fn max_weight(&self) -> u128 {
        self.hard_cap_amount as u128 * self.max_duration_months as u128
    }

    /// Longest allowed duration.
    pub fn longest_duration(&self) -> u32 {
        // Non-empty by construction.
        self.allowed_durations.last().copied().unwrap_or(self.max_duration_months)
    }

    pub fn is_allowed_duration(&self, months: u32) -> bool {
        self.allowed_durations.binary_search(&months).is_ok()
    }
}

impl Default for LockProgramParams {
    /// The Arbitrum USDC lockdrop: 5M USDC cap, 12 months, 1.5M LDY.
    fn default() -> Self {
        Self {
            hard_cap_amount: HARD_CAP_AMOUNT,
            max_duration_months: MAX_DURATION_MONTHS,
            total_reward_pool: TOTAL_REWARD_POOL,
            allowed_durations: ALLOWED_DURATIONS.to_vec(),
            underlying_decimals: UNDERLYING_DECIMALS,
            reward_decimals: REWARD_DECIMALS,
        }
    }
}

/// Serialized shape of [`LockProgramParams`].
#[derive(Serialize, Deserialize, Clone, Debug)]
struct RawProgramParams {
    hard_cap_amount: u64,
    max_duration_months: u32,
    total_reward_pool: u128,
    allowed_durations: Vec<u32>,
    #[serde(default = "default_underlying_decimals")]
    underlying_decimals: u8,
    #[serde(default = "default_reward_decimals")]
    reward_decimals: u8,
}

fn default_underlying_decimals() -> u8 {
    UNDERLYING_DECIMALS
}

fn default_reward_decimals() -> u8 {
    REWARD_DECIMALS
}

impl TryFrom<RawProgramParams> for LockProgramParams {
    type Error = ParamsError;

    fn try_from(raw: RawProgramParams) -> Result<Self, Self::Error> {
        LockProgramParams::new(
            raw.hard_cap_amount,
            raw.max_duration_months,
            raw.total_reward_pool,
            raw.allowed_durations,
        )?
        .with_decimals(raw.underlying_decimals, raw.reward_decimals)
    }
}

impl From<LockProgramParams> for RawProgramParams {
    fn from(p: LockProgramParams) -> Self {
        Self {
            hard_cap_amount: p.hard_cap_amount,
            max_duration_months: p.max_duration_months,
            total_reward_pool: p.total_reward_pool,
            allowed_durations: p.allowed_durations,
            underlying_decimals: p.underlying_decimals,
            reward_decimals: p.reward_decimals,
        }
    }
}

/// A lock, either held on-chain or proposed by the user.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct LockPosition {
    /// Locked underlying, in smallest units.
    pub amount: u64,
    /// Lock duration in months; 0 only for "no lock".
    pub duration_months: u32,
}

impl LockPosition {
    /// The position of an account that has never locked.
    pub const NONE: Self = Self {
        amount: 0,
        duration_months: 0,
    };

    pub fn new(amount: u64, duration_months: u32) -> Self {
        Self {
            amount,
            duration_months,
        }
    }

    /// `amount * duration_months`. Cannot overflow: `u64 * u32 < 2^96`.
    pub fn weight(&self) -> u128 {
        self.amount as u128 * self.duration_months as u128
    }
}

/// Business rule a proposed lock breaks.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LockViolation {
    /// Proposed amount is below the committed amount.
    AmountDecreased,
    /// Proposed duration is shorter than the committed duration.
    DurationDecreased,
    /// Proposed amount is above the program hard cap.
    ExceedsHardCap,
}

impl LockViolation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AmountDecreased => "amount cannot decrease",
            Self::DurationDecreased => "duration cannot decrease",
            Self::ExceedsHardCap => "exceeds program hard cap",
        }
    }
}

impl fmt::Display for LockViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of evaluating a proposed lock.
///
/// Computed in full even when `is_valid` is false so callers can show a
/// preview next to the blocking reason.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AllocationResult {
    /// `amount * duration_months` of the proposal.
    pub weight: u128,
    /// Reward owed, in reward-token smallest units, at most the pool.
    pub reward_amount: u128,
    /// Share of the pool in percent, in `[0, 100]`. Display only.
    pub allocation_percent: f64,
    pub is_valid: bool,
    pub error_reason: Option<LockViolation>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UnitsError;

    #[test]
    fn default_params_are_valid() {
        assert_eq!(LockProgramParams::default().validate(), Ok(()));
    }

    #[test]
    fn default_matches_new() {
        let built = LockProgramParams::new(
            HARD_CAP_AMOUNT,
            MAX_DURATION_MONTHS,
            TOTAL_REWARD_POOL,
            ALLOWED_DURATIONS,
        )
        .unwrap();
        assert_eq!(built, LockProgramParams::default());
    }

    #[test]
    fn zero_hard_cap_rejected() {
        let err = LockProgramParams::new(0, 12, 1, [12]).unwrap_err();
        assert_eq!(err, ParamsError::ZeroHardCap);
    }

    #[test]
    fn zero_pool_rejected() {
        let err = LockProgramParams::new(1, 12, 0, [12]).unwrap_err();
        assert_eq!(err, ParamsError::ZeroRewardPool);
    }

    #[test]
    fn zero_max_duration_rejected() {
        let err = LockProgramParams::new(1, 0, 1, [12]).unwrap_err();
        assert_eq!(err, ParamsError::ZeroMaxDuration);
    }

    #[test]
    fn empty_durations_rejected() {
        let err = LockProgramParams::new(1, 12, 1, Vec::<u32>::new()).unwrap_err();
        assert_eq!(err, ParamsError::EmptyDurations);
    }

    #[test]
    fn duration_above_max_rejected() {
        let err = LockProgramParams::new(1, 12, 1, [3, 24]).unwrap_err();
        assert_eq!(err, ParamsError::DurationOutOfRange { months: 24, max: 12 });
    }

    #[test]
    fn zero_duration_in_set_rejected() {
        let err = LockProgramParams::new(1, 12, 1, [0, 12]).unwrap_err();
        assert_eq!(err, ParamsError::DurationOutOfRange { months: 0, max: 12 });
    }

    #[test]
    fn durations_sorted_and_deduped() {
        let p = LockProgramParams::new(1, 12, 1, [12, 3, 6, 3]).unwrap();
        assert_eq!(p.allowed_durations(), &[3, 6, 12]);
        assert!(p.is_allowed_duration(6));
        assert!(!p.is_allowed_duration(5));
        assert_eq!(p.longest_duration(), 12);
    }

    #[test]
    fn decimals_too_large_rejected() {
        let err = LockProgramParams::default().with_decimals(6, 39).unwrap_err();
        assert_eq!(err, ParamsError::DecimalsTooLarge(39));
    }

    #[test]
    fn from_whole_tokens_scales() {
        let p = LockProgramParams::from_whole_tokens("5000000", 12, "1500000", [3, 6, 12], 6, 18)
            .unwrap();
        assert_eq!(p, LockProgramParams::default());
    }

    #[test]
    fn from_whole_tokens_reports_both_error_kinds() {
        let err = LockProgramParams::from_whole_tokens("5M", 12, "1", [12], 6, 18).unwrap_err();
        assert!(matches!(err, LockdropError::Units(UnitsError::InvalidCharacter('M'))));
        let err = LockProgramParams::from_whole_tokens("0", 12, "1", [12], 6, 18).unwrap_err();
        assert!(matches!(err, LockdropError::Params(ParamsError::ZeroHardCap)));
    }

    #[test]
    fn max_weight_is_cap_times_duration() {
        let p = LockProgramParams::default();
        assert_eq!(p.max_weight(), HARD_CAP_AMOUNT as u128 * 12);
    }

    #[test]
    fn max_weight_does_not_overflow() {
        let p = LockProgramParams::new(u64::MAX, u32::MAX, 1, [u32::MAX]).unwrap();
        assert_eq!(p.max_weight(), u64::MAX as u128 * u32::MAX as u128);
    }

    #[test]
    fn params_json_roundtrip_validates() {
        let p = LockProgramParams::default();
        let json = serde_json::to_string(&p).unwrap();
        let back: LockProgramParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);

        let bad = json.replace("\"hard_cap_amount\":5000000000000", "\"hard_cap_amount\":0");
        assert!(serde_json::from_str::<LockProgramParams>(&bad).is_err());
    }

    #[test]
    fn position_weight() {
        assert_eq!(LockPosition::new(100, 6).weight(), 600);
        assert_eq!(LockPosition::NONE.weight(), 0);
        assert_eq!(
            LockPosition::new(u64::MAX, u32::MAX).weight(),
            u64::MAX as u128 * u32::MAX as u128
        );
    }

    #[test]
    fn violation_messages() {
        assert_eq!(LockViolation::AmountDecreased.to_string(), "amount cannot decrease");
        assert_eq!(LockViolation::DurationDecreased.to_string(), "duration cannot decrease");
        assert_eq!(LockViolation::ExceedsHardCap.to_string(), "exceeds program hard cap");
    }
}
