//! lockdrop-cli: preview lockdrop allocations from the command line.
//!
//! Loads program parameters from configuration, evaluates a proposed lock
//! against the current one and prints the allocation preview. No chain access:
//! the current lock and program totals are passed in as arguments.

mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use lockdrop_core::deposit::deposit_quote;
use lockdrop_core::lock::{DurationOption, LockDelta, duration_options, lock_delta};
use lockdrop_core::progress::ProgramProgress;
use lockdrop_core::units::{format_percent, format_units, parse_amount};
use lockdrop_core::{AllocationCalculator, AllocationResult, LockPosition, LockProgramParams};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::ProgramConfig;

/// LDY lockdrop allocation previewer.
#[derive(Parser)]
#[command(name = "lockdrop-cli")]
#[command(version, about = "Preview LDY lockdrop allocations")]
struct Cli {
    /// TOML file with program parameters (overridden by LOCKDROP_* env vars).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a proposed lock and show the reward preview.
    Evaluate(EvaluateArgs),
    /// Show the effective program parameters.
    Params(OutputArgs),
    /// Show how full the program is.
    Progress(ProgressArgs),
    /// Quote a 1:1 deposit into the wrapper token.
    Deposit(DepositArgs),
}

#[derive(Args)]
struct OutputArgs {
    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct EvaluateArgs {
    /// Proposed total lock amount, in whole underlying tokens (e.g. 1500.25).
    #[arg(short, long)]
    amount: String,

    /// Proposed lock duration in months.
    #[arg(short, long)]
    duration: u32,

    /// Currently locked amount, in whole underlying tokens.
    #[arg(long, default_value = "0")]
    current_amount: String,

    /// Current lock duration in months (0 when there is no lock).
    #[arg(long, default_value_t = 0)]
    current_duration: u32,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct ProgressArgs {
    /// Total locked by all participants, in whole underlying tokens.
    #[arg(short, long)]
    total_locked: String,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct DepositArgs {
    /// Amount to deposit, in whole underlying tokens.
    #[arg(short, long)]
    amount: String,

    #[command(flatten)]
    output: OutputArgs,
}

/// Everything the lock form shows for one proposal.
#[derive(Serialize)]
struct Preview {
    current: LockPosition,
    proposed: LockPosition,
    result: AllocationResult,
    delta: LockDelta,
    durations: Vec<DurationOption>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_format);

    let params = ProgramConfig::load(cli.config.as_deref())?.into_params()?;
    debug!(?params, "program parameters loaded");

    match cli.command {
        Commands::Evaluate(args) => cmd_evaluate(params, args),
        Commands::Params(args) => cmd_params(&params, args),
        Commands::Progress(args) => cmd_progress(&params, args),
        Commands::Deposit(args) => cmd_deposit(&params, args),
    }
}

fn cmd_evaluate(params: LockProgramParams, args: EvaluateArgs) -> Result<()> {
    let decimals = params.underlying_decimals();
    let current = LockPosition::new(
        parse_amount(&args.current_amount, decimals).context("invalid --current-amount")?,
        args.current_duration,
    );
    let proposed = LockPosition::new(
        parse_amount(&args.amount, decimals).context("invalid --amount")?,
        args.duration,
    );

    let calc = AllocationCalculator::new(params)?;
    let result = calc.evaluate(&current, &proposed)?;
    info!(valid = result.is_valid, "lock evaluated");

    let preview = Preview {
        current,
        proposed,
        delta: lock_delta(&current, &proposed),
        durations: duration_options(calc.params(), &current),
        result,
    };

    if args.output.json {
        println!("{}", serde_json::to_string_pretty(&preview)?);
        return Ok(());
    }

    let p = calc.params();
    let underlying = |v: u64| format_units(v as u128, p.underlying_decimals());
    println!(
        "Lock:        {} for {} months",
        underlying(proposed.amount),
        proposed.duration_months
    );
    if current.amount != 0 {
        println!(
            "Current:     {} for {} months",
            underlying(current.amount),
            current.duration_months
        );
    }
    println!("Transfer:    {}", underlying(preview.delta.additional_amount));
    println!("Weight:      {}", preview.result.weight);
    println!(
        "Reward:      {}",
        format_units(preview.result.reward_amount, p.reward_decimals())
    );
    println!(
        "Allocation:  {}",
        format_percent(preview.result.allocation_percent, 4)
    );
    let durations: Vec<String> = preview
        .durations
        .iter()
        .map(|o| {
            if o.selectable {
                format!("{} (x{})", o.label(), o.multiplier)
            } else {
                format!("{} (locked out)", o.label())
            }
        })
        .collect();
    println!("Durations:   {}", durations.join(", "));
    match preview.result.error_reason {
        Some(reason) => println!("Status:      invalid: {reason}"),
        None if preview.delta.is_noop => println!("Status:      valid (nothing to update)"),
        None => println!("Status:      valid"),
    }
    Ok(())
}

fn cmd_params(params: &LockProgramParams, args: OutputArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(params)?);
        return Ok(());
    }
    println!(
        "Hard cap:      {}",
        format_units(params.hard_cap_amount() as u128, params.underlying_decimals())
    );
    println!("Max duration:  {} months", params.max_duration_months());
    println!(
        "Reward pool:   {}",
        format_units(params.total_reward_pool(), params.reward_decimals())
    );
    println!("Max weight:    {}", params.max_weight());
    println!("Durations:     {:?}", params.allowed_durations());
    println!(
        "Decimals:      underlying {}, reward {}",
        params.underlying_decimals(),
        params.reward_decimals()
    );
    Ok(())
}

fn cmd_progress(params: &LockProgramParams, args: ProgressArgs) -> Result<()> {
    let total = parse_amount(&args.total_locked, params.underlying_decimals())
        .context("invalid --total-locked")?;
    let progress = ProgramProgress::new(params, total)?;

    if args.output.json {
        println!("{}", serde_json::to_string_pretty(&progress)?);
        return Ok(());
    }
    let decimals = params.underlying_decimals();
    println!(
        "Locked:     {} / {}",
        format_units(progress.total_locked as u128, decimals),
        format_units(progress.hard_cap as u128, decimals)
    );
    println!("Filled:     {}", format_percent(progress.fill_percent(), 0));
    println!(
        "Remaining:  {}",
        format_units(progress.remaining as u128, decimals)
    );
    Ok(())
}

fn cmd_deposit(params: &LockProgramParams, args: DepositArgs) -> Result<()> {
    let decimals = params.underlying_decimals();
    let amount = parse_amount(&args.amount, decimals).context("invalid --amount")?;
    let quote = deposit_quote(amount);

    if args.output.json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
        return Ok(());
    }
    println!("Deposit:  {}", format_units(quote.deposited as u128, decimals));
    println!("Receive:  {} (1:1)", format_units(quote.minted as u128, decimals));
    Ok(())
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// Logs go to stderr so `--json` output on stdout stays machine-readable.
fn init_logging(level_str: &str, format: LogFormat) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init(),
    }
}
