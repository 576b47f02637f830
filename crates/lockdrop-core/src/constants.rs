//! Lockdrop constants. Underlying amounts are in micro-USDC (1 USDC = 10^6),
//! reward amounts in wei-LDY (1 LDY = 10^18).

/// Decimals of the underlying asset (USDC).
pub const UNDERLYING_DECIMALS: u8 = 6;

/// Decimals of the reward token (LDY).
pub const REWARD_DECIMALS: u8 = 18;

/// One whole underlying token in smallest units.
pub const UNDERLYING_UNIT: u64 = 10u64.pow(UNDERLYING_DECIMALS as u32);

/// One whole reward token in smallest units.
pub const REWARD_UNIT: u128 = 10u128.pow(REWARD_DECIMALS as u32);

/// Maximum total underlying the program accepts: 5M USDC.
pub const HARD_CAP_AMOUNT: u64 = 5_000_000 * UNDERLYING_UNIT;

/// Lock duration (months) that earns full weight.
pub const MAX_DURATION_MONTHS: u32 = 12;

/// Total LDY distributed across all participants: 1.5M LDY.
pub const TOTAL_REWARD_POOL: u128 = 1_500_000 * REWARD_UNIT;

/// Durations a lock may be created or extended to.
pub const ALLOWED_DURATIONS: [u32; 3] = [3, 6, 12];

/// Whole underlying tokens pre-filled in the form when no lock exists yet.
pub const DEFAULT_PROPOSAL_UNITS: u64 = 100;

/// Largest decimals value a fixed-point amount may use (`10^38` still fits in `u128`).
pub const MAX_DECIMALS: u8 = 38;

pub const BPS_PRECISION: u32 = 10_000;
