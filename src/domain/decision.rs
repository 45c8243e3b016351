//! Record of everything decided in one quarterly review.

use serde::Serialize;

use crate::domain::guyton_klinger::{GkRule, WithdrawalPlan};
use crate::domain::portfolio::PortfolioState;
use crate::domain::signal::{Signal, WithdrawalSource};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuarterlyDecision {
    pub quarter: String,
    pub momentum_signal: f64,
    pub signal_strength: f64,
    pub withdrawal_amount: f64,
    pub withdrawal_source: WithdrawalSource,
    pub gk_rule_triggered: GkRule,
    pub equity_value_after: f64,
    pub bond_value_after: f64,
    pub annual_withdrawal: f64,
}

impl QuarterlyDecision {
    /// Snapshot the review once the withdrawal has been applied to `after`.
    pub fn record(
        signal: Signal,
        source: WithdrawalSource,
        plan: &WithdrawalPlan,
        after: &PortfolioState,
    ) -> Self {
        QuarterlyDecision {
            quarter: after.quarter.clone(),
            momentum_signal: signal.direction,
            signal_strength: signal.strength,
            withdrawal_amount: plan.quarterly_amount,
            withdrawal_source: source,
            gk_rule_triggered: plan.rule,
            equity_value_after: after.equity_value,
            bond_value_after: after.bond_value,
            annual_withdrawal: plan.annual_withdrawal,
        }
    }
}
