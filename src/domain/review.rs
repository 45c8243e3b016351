//! Quarterly review: signal, source, Guyton-Klinger plan, withdrawal, decision.
//!
//! The review never mutates the caller's portfolio. It works on a copy and hands the
//! updated state back only when every step succeeded, so a failed review leaves
//! nothing half-applied.

use chrono::NaiveDate;

use crate::domain::config::RetirementConfig;
use crate::domain::decision::QuarterlyDecision;
use crate::domain::error::DrawdownError;
use crate::domain::executor::execute_withdrawal;
use crate::domain::guyton_klinger::compute_withdrawal;
use crate::domain::momentum::{self, MomentumTally};
use crate::domain::portfolio::PortfolioState;
use crate::domain::signal::{decide_source, Signal};
use crate::ports::price_port::PricePort;
use crate::ports::review_log_port::ReviewLogPort;

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewOutcome {
    pub decision: QuarterlyDecision,
    pub portfolio: PortfolioState,
    pub annual_withdrawal: f64,
}

pub fn run_quarterly_review<F>(
    portfolio: &PortfolioState,
    current_annual_withdrawal: f64,
    config: &RetirementConfig,
    signal_source: F,
    log: &dyn ReviewLogPort,
) -> Result<ReviewOutcome, DrawdownError>
where
    F: FnOnce() -> Result<Signal, DrawdownError>,
{
    if !current_annual_withdrawal.is_finite() || current_annual_withdrawal < 0.0 {
        return Err(DrawdownError::invalid_input(
            "annual withdrawal",
            format!("{current_annual_withdrawal} must be a non-negative amount"),
        ));
    }
    log.review_started(portfolio, current_annual_withdrawal);

    let signal = signal_source()?;
    if !signal.direction.is_finite() || !signal.strength.is_finite() {
        return Err(DrawdownError::SignalUnavailable {
            reason: format!(
                "non-finite signal (direction {}, strength {})",
                signal.direction, signal.strength
            ),
        });
    }
    log.signal_received(&signal);

    let source = decide_source(signal.direction, signal.strength, config);
    log.source_decided(source);

    let plan = compute_withdrawal(portfolio, current_annual_withdrawal, config);
    log.withdrawal_planned(&plan);

    let mut updated = portfolio.clone();
    let report = execute_withdrawal(&mut updated, plan.quarterly_amount, source);
    if report.overflow > 0.0 {
        log.withdrawal_overflowed(source, report.overflow);
    }
    log.withdrawal_applied(&updated);

    let decision = QuarterlyDecision::record(signal, source, &plan, &updated);
    Ok(ReviewOutcome {
        decision,
        portfolio: updated,
        annual_withdrawal: plan.annual_withdrawal,
    })
}

/// Score the given symbols as one asset class and map the tally onto a signal.
pub fn momentum_signal(
    prices: &dyn PricePort,
    symbols: &[String],
    as_of: NaiveDate,
    config: &RetirementConfig,
) -> Result<(Signal, MomentumTally), DrawdownError> {
    let series = symbols
        .iter()
        .map(|symbol| prices.monthly_series(symbol, as_of))
        .collect::<Result<Vec<_>, _>>()?;
    let tally = momentum::score(&series)?;
    Ok((Signal::from_tally(&tally, config.neutral_score), tally))
}
