//! Program configuration: built-in defaults, an optional TOML file, then
//! `LOCKDROP_*` environment variables (highest precedence).
//!
//! Amounts are written in whole tokens (`hard_cap = "5000000"`) and converted
//! with the configured decimals. Environment values reach the config as raw
//! strings so amounts keep every digit until `parse_units` sees them.

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use lockdrop_core::LockProgramParams;
use lockdrop_core::constants::{
    ALLOWED_DURATIONS, HARD_CAP_AMOUNT, MAX_DURATION_MONTHS, REWARD_DECIMALS, TOTAL_REWARD_POOL,
    UNDERLYING_DECIMALS,
};
use lockdrop_core::units::format_units;
use serde::{Deserialize, Deserializer};

/// Prefix of environment overrides, e.g. `LOCKDROP_HARD_CAP=1000000`.
pub const ENV_PREFIX: &str = "LOCKDROP";

#[derive(Clone, Debug, Deserialize)]
pub struct ProgramConfig {
    /// Hard cap in whole underlying tokens.
    pub hard_cap: String,
    pub max_duration_months: u32,
    /// Reward pool in whole reward tokens.
    pub total_reward_pool: String,
    /// A list, a single month count, or comma-separated text (`"3,6,12"`).
    #[serde(deserialize_with = "duration_list")]
    pub allowed_durations: Vec<u32>,
    pub underlying_decimals: u8,
    pub reward_decimals: u8,
}

impl ProgramConfig {
    /// Load from defaults, `path` (if given) and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, environment())
    }

    /// Same as [`load`](Self::load) with an explicit environment source.
    pub fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default(
                "hard_cap",
                format_units(HARD_CAP_AMOUNT as u128, UNDERLYING_DECIMALS),
            )?
            .set_default("max_duration_months", MAX_DURATION_MONTHS as i64)?
            .set_default(
                "total_reward_pool",
                format_units(TOTAL_REWARD_POOL, REWARD_DECIMALS),
            )?
            .set_default(
                "allowed_durations",
                ALLOWED_DURATIONS.iter().map(|&m| m as i64).collect::<Vec<_>>(),
            )?
            .set_default("underlying_decimals", UNDERLYING_DECIMALS as i64)?
            .set_default("reward_decimals", REWARD_DECIMALS as i64)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings = builder
            .add_source(env)
            .build()
            .context("failed to read lockdrop configuration")?;
        settings
            .try_deserialize()
            .context("invalid lockdrop configuration")
    }

    /// Convert whole-token amounts and validate into program parameters.
    pub fn into_params(self) -> Result<LockProgramParams> {
        LockProgramParams::from_whole_tokens(
            &self.hard_cap,
            self.max_duration_months,
            &self.total_reward_pool,
            self.allowed_durations,
            self.underlying_decimals,
            self.reward_decimals,
        )
        .context("invalid program parameters")
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DurationList {
    List(Vec<u32>),
    One(u32),
    Text(String),
}

fn duration_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u32>, D::Error> {
    match DurationList::deserialize(deserializer)? {
        DurationList::List(months) => Ok(months),
        DurationList::One(months) => Ok(vec![months]),
        DurationList::Text(text) => text
            .split(',')
            .map(|part| {
                part.trim().parse::<u32>().map_err(|_| {
                    <D::Error as serde::de::Error>::custom(format!(
                        "invalid duration {part:?} in {text:?}"
                    ))
                })
            })
            .collect(),
    }
}
