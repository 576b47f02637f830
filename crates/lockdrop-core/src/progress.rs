//! Program-wide fill progress: total locked by all participants against the
//! hard cap.

use serde::{Deserialize, Serialize};

use crate::constants::BPS_PRECISION;
use crate::error::ParamsError;
use crate::types::LockProgramParams;

/// Fill of the program in basis points, rounded down, at most 10_000.
///
/// # Errors
///
/// [`ParamsError::ZeroHardCap`] when `hard_cap` is zero.
pub fn fill_ratio_bps(total_locked: u64, hard_cap: u64) -> Result<u32, ParamsError> {
    if hard_cap == 0 {
        return Err(ParamsError::ZeroHardCap);
    }
    let bps = total_locked as u128 * BPS_PRECISION as u128 / hard_cap as u128;
    Ok(bps.min(BPS_PRECISION as u128) as u32)
}

/// Underlying still accepted before the hard cap is reached.
pub fn remaining_capacity(total_locked: u64, hard_cap: u64) -> u64 {
    hard_cap.saturating_sub(total_locked)
}

/// Snapshot of program fill for display.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgramProgress {
    pub total_locked: u64,
    pub hard_cap: u64,
    pub fill_bps: u32,
    pub remaining: u64,
}

impl ProgramProgress {
    pub fn new(params: &LockProgramParams, total_locked: u64) -> Result<Self, ParamsError> {
        let hard_cap = params.hard_cap_amount();
        Ok(Self {
            total_locked,
            hard_cap,
            fill_bps: fill_ratio_bps(total_locked, hard_cap)?,
            remaining: remaining_capacity(total_locked, hard_cap),
        })
    }

    /// Fill in percent, `[0, 100]`.
    pub fn fill_percent(&self) -> f64 {
        self.fill_bps as f64 / 100.0
    }

    pub fn is_full(&self) -> bool {
        self.remaining == 0
    }
}
