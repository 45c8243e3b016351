//! Retirement plan configuration.
//!
//! All rates are annual; the engine converts to quarterly internally.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct RetirementConfig {
    /// Portfolio value at retirement start.
    pub initial_portfolio_value: f64,
    /// Informational only; the engine never rebalances.
    pub equity_target: f64,
    /// Informational only; the engine never rebalances.
    pub bond_target: f64,
    pub base_withdrawal_rate: f64,
    pub inflation_rate: f64,
    pub prosperity_threshold: f64,
    pub prosperity_increase: f64,
    pub capital_preservation_threshold: f64,
    pub capital_preservation_decrease: f64,
    pub max_withdrawal_rate: f64,
    pub min_withdrawal_rate: f64,
    /// Below this strength the withdrawal is split proportionally.
    pub signal_strength_threshold: f64,
    /// Score assumed when no momentum signal could be evaluated.
    pub neutral_score: f64,
    pub audit_log_path: PathBuf,
}

impl Default for RetirementConfig {
    fn default() -> Self {
        RetirementConfig {
            initial_portfolio_value: 1_000_000.0,
            equity_target: 0.85,
            bond_target: 0.15,
            base_withdrawal_rate: 0.05,
            inflation_rate: 0.03,
            prosperity_threshold: 1.20,
            prosperity_increase: 0.10,
            capital_preservation_threshold: 0.80,
            capital_preservation_decrease: 0.10,
            max_withdrawal_rate: 0.07,
            min_withdrawal_rate: 0.03,
            signal_strength_threshold: 0.30,
            neutral_score: 0.5,
            audit_log_path: PathBuf::from("retirement_audit.jsonl"),
        }
    }
}

impl RetirementConfig {
    /// Annual withdrawal at retirement start, before any rule has adjusted it.
    pub fn initial_annual_withdrawal(&self) -> f64 {
        self.initial_portfolio_value * self.base_withdrawal_rate
    }
}
