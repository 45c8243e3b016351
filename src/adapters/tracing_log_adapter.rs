//! `ReviewLogPort` that emits structured `tracing` events.

use tracing::{info, warn};

use crate::domain::guyton_klinger::WithdrawalPlan;
use crate::domain::portfolio::PortfolioState;
use crate::domain::signal::{Signal, WithdrawalSource};
use crate::ports::review_log_port::ReviewLogPort;

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReviewLog;

impl ReviewLogPort for TracingReviewLog {
    fn review_started(&self, portfolio: &PortfolioState, annual_withdrawal: f64) {
        info!(
            quarter = %portfolio.quarter,
            total = portfolio.total_value(),
            equity_pct = portfolio.equity_pct(),
            bond_pct = portfolio.bond_pct(),
            cumulative_inflation = portfolio.cumulative_inflation,
            annual_withdrawal,
            "quarterly review started"
        );
    }

    fn signal_received(&self, signal: &Signal) {
        info!(
            direction = signal.direction,
            strength = signal.strength,
            "momentum signal"
        );
    }

    fn source_decided(&self, source: WithdrawalSource) {
        info!(%source, "withdrawal source");
    }

    fn withdrawal_planned(&self, plan: &WithdrawalPlan) {
        info!(
            rule = %plan.rule,
            baseline = plan.baseline,
            quarterly = plan.quarterly_amount,
            annual = plan.annual_withdrawal,
            "guyton-klinger plan"
        );
    }

    fn withdrawal_overflowed(&self, source: WithdrawalSource, overflow: f64) {
        warn!(
            %source,
            overflow,
            "withdrawal exceeds source value, remainder taken from the other asset"
        );
    }

    fn withdrawal_applied(&self, portfolio: &PortfolioState) {
        info!(
            total = portfolio.total_value(),
            equity = portfolio.equity_value,
            bond = portfolio.bond_value,
            "post-withdrawal portfolio"
        );
    }
}
