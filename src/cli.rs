//! CLI definition and dispatch.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::adapters::csv_price_adapter::CsvPriceAdapter;
use crate::adapters::file_config_adapter::{FileConfigAdapter, DEFAULT_CONFIG_TEMPLATE};
use crate::adapters::jsonl_audit_adapter::JsonlAuditAdapter;
use crate::adapters::tracing_log_adapter::TracingReviewLog;
use crate::domain::config::RetirementConfig;
use crate::domain::config_validation::build_retirement_config;
use crate::domain::error::DrawdownError;
use crate::domain::momentum;
use crate::domain::portfolio::{advance_inflation, PortfolioState};
use crate::domain::quarter::QuarterLabel;
use crate::domain::review::{momentum_signal, run_quarterly_review, ReviewOutcome};
use crate::domain::signal::{decide_source, Signal};
use crate::ports::audit_port::AuditPort;
use crate::ports::price_port::PricePort;
use crate::ports::review_log_port::ReviewLogPort;

/// Total-return and price-only variants of the same index.
pub const DEFAULT_SYMBOLS: &str = "SP500TR,GSPC";

/// Trailing window for the SMA table printed by `momentum`.
pub const SMA_DISPLAY_MONTHS: usize = 10;

#[derive(Parser, Debug)]
#[command(name = "drawdown", about = "Quarterly retirement withdrawal review")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one quarterly review and append it to the audit log
    Review {
        #[arg(short, long)]
        config: PathBuf,
        /// Current equity value, e.g. 850000, 850,000 or $850,000
        #[arg(long)]
        equity: String,
        /// Current bond/cash value
        #[arg(long)]
        bonds: String,
        /// Quarter label, e.g. 2026-Q1
        #[arg(long)]
        quarter: String,
        /// Current annual withdrawal if the rules have already adjusted it
        #[arg(long)]
        annual_withdrawal: Option<String>,
        /// Compounded inflation factor since retirement start
        #[arg(long, default_value_t = 1.0)]
        cumulative_inflation: f64,
        /// Directory of <SYMBOL>.csv monthly price files
        #[arg(short, long)]
        prices: Option<PathBuf>,
        /// Comma-separated symbols scored together as one asset class
        #[arg(long, default_value = DEFAULT_SYMBOLS)]
        symbols: String,
        /// Use this momentum score (0-1) instead of price history
        #[arg(long)]
        score: Option<f64>,
        /// Treat this date as today (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<NaiveDate>,
        /// Skip writing the audit record
        #[arg(long)]
        no_audit: bool,
    },
    /// Score momentum from price history without touching the portfolio
    Momentum {
        #[arg(short, long)]
        prices: PathBuf,
        #[arg(long, default_value = DEFAULT_SYMBOLS)]
        symbols: String,
        #[arg(long)]
        as_of: Option<NaiveDate>,
        /// Plan config, used for the neutral score and strength threshold
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate a plan configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Write a configuration file holding the default plan
    InitConfig {
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long)]
        force: bool,
    },
}

/// Portfolio inputs for one review, already parsed.
#[derive(Debug, Clone)]
pub struct ReviewRequest {
    pub equity: f64,
    pub bonds: f64,
    pub quarter: QuarterLabel,
    pub annual_withdrawal: Option<f64>,
    pub cumulative_inflation: f64,
    pub score: Option<f64>,
    pub symbols: Vec<String>,
    pub as_of: NaiveDate,
}

pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Review {
            config,
            equity,
            bonds,
            quarter,
            annual_withdrawal,
            cumulative_inflation,
            prices,
            symbols,
            score,
            as_of,
            no_audit,
        } => parse_review_request(
            &equity,
            &bonds,
            &quarter,
            annual_withdrawal.as_deref(),
            cumulative_inflation,
            score,
            &symbols,
            as_of,
        )
        .and_then(|request| run_review(&config, &request, prices.as_deref(), no_audit)),
        Command::Momentum {
            prices,
            symbols,
            as_of,
            config,
        } => run_momentum(&prices, &symbols, as_of, config.as_deref()),
        Command::Validate { config } => run_validate(&config),
        Command::InitConfig { output, force } => run_init_config(&output, force),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<RetirementConfig, DrawdownError> {
    let adapter = FileConfigAdapter::from_file(path).map_err(|e| DrawdownError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })?;
    build_retirement_config(&adapter)
}

/// Accepts `850000`, `850,000` and `$850,000`.
pub fn parse_dollars(field: &str, raw: &str) -> Result<f64, DrawdownError> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(DrawdownError::invalid_input(
            field,
            format!("'{raw}' is not a dollar amount"),
        )),
    }
}

pub fn parse_symbols(raw: &str) -> Result<Vec<String>, DrawdownError> {
    let symbols: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect();
    if symbols.is_empty() {
        return Err(DrawdownError::invalid_input("symbols", "no symbols given"));
    }
    Ok(symbols)
}

#[allow(clippy::too_many_arguments)]
pub fn parse_review_request(
    equity: &str,
    bonds: &str,
    quarter: &str,
    annual_withdrawal: Option<&str>,
    cumulative_inflation: f64,
    score: Option<f64>,
    symbols: &str,
    as_of: Option<NaiveDate>,
) -> Result<ReviewRequest, DrawdownError> {
    if !(cumulative_inflation.is_finite() && cumulative_inflation > 0.0) {
        return Err(DrawdownError::invalid_input(
            "cumulative inflation",
            format!("{cumulative_inflation} must be positive"),
        ));
    }
    if let Some(s) = score {
        if !(0.0..=1.0).contains(&s) {
            return Err(DrawdownError::invalid_input(
                "score",
                format!("{s} must be between 0 and 1"),
            ));
        }
    }
    Ok(ReviewRequest {
        equity: parse_dollars("equity", equity)?,
        bonds: parse_dollars("bonds", bonds)?,
        quarter: quarter.parse()?,
        annual_withdrawal: annual_withdrawal
            .map(|raw| parse_dollars("annual withdrawal", raw))
            .transpose()?,
        cumulative_inflation,
        score,
        symbols: parse_symbols(symbols)?,
        as_of: as_of.unwrap_or_else(|| Local::now().date_naive()),
    })
}

/// Advance inflation, run the review and append the decision.
///
/// With a `score` in the request the price port is not consulted.
pub fn execute_review(
    request: &ReviewRequest,
    config: &RetirementConfig,
    prices: Option<&dyn PricePort>,
    audit: Option<&dyn AuditPort>,
    log: &dyn ReviewLogPort,
) -> Result<ReviewOutcome, DrawdownError> {
    let mut portfolio = PortfolioState::new(request.equity, request.bonds, request.quarter.to_string())
        .with_cumulative_inflation(request.cumulative_inflation);
    let annual_withdrawal = request
        .annual_withdrawal
        .unwrap_or_else(|| config.initial_annual_withdrawal());

    advance_inflation(&mut portfolio, config.inflation_rate);

    let signal_source = || -> Result<Signal, DrawdownError> {
        if let Some(score) = request.score {
            return Ok(Signal::from_score(score));
        }
        let prices = prices.ok_or_else(|| DrawdownError::SignalUnavailable {
            reason: "no price directory or score given".to_string(),
        })?;
        let (signal, tally) = momentum_signal(prices, &request.symbols, request.as_of, config)?;
        info!(%tally, symbols = ?request.symbols, "momentum tally");
        Ok(signal)
    };

    let outcome = run_quarterly_review(&portfolio, annual_withdrawal, config, signal_source, log)?;

    if let Some(audit) = audit {
        audit.append(&outcome.decision)?;
    }
    Ok(outcome)
}

fn run_review(
    config_path: &Path,
    request: &ReviewRequest,
    prices_dir: Option<&Path>,
    no_audit: bool,
) -> Result<(), DrawdownError> {
    info!(path = %config_path.display(), "loading config");
    let config = load_config(config_path)?;

    let price_adapter = prices_dir.map(|dir| CsvPriceAdapter::new(dir.to_path_buf()));
    let audit_adapter = JsonlAuditAdapter::new(config.audit_log_path.clone());

    let outcome = execute_review(
        request,
        &config,
        price_adapter.as_ref().map(|a| a as &dyn PricePort),
        if no_audit {
            None
        } else {
            Some(&audit_adapter as &dyn AuditPort)
        },
        &TracingReviewLog,
    )?;

    print_review(&outcome, request);
    if !no_audit {
        println!("  Audit log updated -> {}", audit_adapter.path().display());
    }
    Ok(())
}

fn print_review(outcome: &ReviewOutcome, request: &ReviewRequest) {
    let d = &outcome.decision;
    let p = &outcome.portfolio;

    println!();
    println!("-- Quarterly Decision ---------------------------------");
    println!("  Quarter            : {}", d.quarter);
    println!(
        "  Momentum signal    : {:+.3}  (strength: {:.3})",
        d.momentum_signal, d.signal_strength
    );
    println!("  Withdrawal source  : {}", d.withdrawal_source);
    println!("  Withdrawal amount  : ${:.2}  (this quarter)", d.withdrawal_amount);
    println!("  GK rule triggered  : {}", d.gk_rule_triggered);
    println!("  Annual going fwd   : ${:.2}", outcome.annual_withdrawal);
    println!();
    println!("-- Portfolio After Withdrawal -------------------------");
    println!("  Total:  ${:.2}", p.total_value());
    println!("  Equity: ${:.2}  ({:.1}%)", p.equity_value, p.equity_pct() * 100.0);
    println!("  Bonds:  ${:.2}  ({:.1}%)", p.bond_value, p.bond_pct() * 100.0);
    println!();
    println!(
        "  Next review: {} --annual-withdrawal {:.2} --cumulative-inflation {:.6}",
        request.quarter.next(),
        outcome.annual_withdrawal,
        p.cumulative_inflation
    );
}

fn run_momentum(
    prices_dir: &Path,
    symbols: &str,
    as_of: Option<NaiveDate>,
    config_path: Option<&Path>,
) -> Result<(), DrawdownError> {
    let config = match config_path {
        Some(path) => load_config(path)?,
        None => RetirementConfig::default(),
    };
    let symbols = parse_symbols(symbols)?;
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
    let adapter = CsvPriceAdapter::new(prices_dir.to_path_buf());

    let series = symbols
        .iter()
        .map(|s| adapter.monthly_series(s, as_of))
        .collect::<Result<Vec<_>, _>>()?;
    let tally = momentum::score(&series)?;
    let signal = Signal::from_tally(&tally, config.neutral_score);
    let source = decide_source(signal.direction, signal.strength, &config);

    println!();
    println!("-- Momentum ({}) ---------------------------------", symbols.join(" + "));
    for s in &series {
        for reading in momentum::evaluate(s) {
            println!(
                "  {:<10} {} {:>2}m  latest {:>12.2}  ref {:>12.2}  {}",
                reading.series,
                reading.method,
                reading.horizon,
                reading.latest,
                reading.reference,
                if reading.bullish { "bullish" } else { "bearish" }
            );
        }
    }
    println!();
    println!("  Bullish signals : {tally}");
    println!(
        "  Signal          : {:+.3}  (strength: {:.3})",
        signal.direction, signal.strength
    );
    println!("  Source          : {source}");

    if let Some(first) = series.first() {
        println!();
        println!("  {} vs {}-month SMA", first.name(), SMA_DISPLAY_MONTHS);
        for snap in momentum::sma_snapshots(first, SMA_DISPLAY_MONTHS, 3) {
            println!(
                "  {}  close {:>12.2}  sma {:>12.2}  {:+.2}%",
                snap.date.format("%b %Y"),
                snap.price,
                snap.sma,
                snap.pct_from_sma
            );
        }
    }
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), DrawdownError> {
    let config = load_config(config_path)?;
    println!("Configuration valid: {}", config_path.display());
    println!(
        "  initial ${:.2}, base rate {:.2}%, floor {:.2}%, ceiling {:.2}%",
        config.initial_portfolio_value,
        config.base_withdrawal_rate * 100.0,
        config.min_withdrawal_rate * 100.0,
        config.max_withdrawal_rate * 100.0
    );
    println!("  audit log {}", config.audit_log_path.display());
    Ok(())
}

fn run_init_config(output: &Path, force: bool) -> Result<(), DrawdownError> {
    if output.exists() && !force {
        return Err(DrawdownError::invalid_input(
            "output",
            format!("{} already exists (use --force to overwrite)", output.display()),
        ));
    }
    fs::write(output, DEFAULT_CONFIG_TEMPLATE)?;
    println!("Wrote default plan to {}", output.display());
    Ok(())
}
