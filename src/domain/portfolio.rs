//! Two-asset portfolio state carried across quarters, and the inflation tracker.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioState {
    pub equity_value: f64,
    /// May go negative after an overflowing equity withdrawal.
    pub bond_value: f64,
    pub quarter: String,
    /// Compounded inflation factor since retirement start.
    pub cumulative_inflation: f64,
}

impl PortfolioState {
    pub fn new(equity_value: f64, bond_value: f64, quarter: impl Into<String>) -> Self {
        PortfolioState {
            equity_value,
            bond_value,
            quarter: quarter.into(),
            cumulative_inflation: 1.0,
        }
    }

    pub fn with_cumulative_inflation(mut self, factor: f64) -> Self {
        self.cumulative_inflation = factor;
        self
    }

    pub fn total_value(&self) -> f64 {
        self.equity_value + self.bond_value
    }

    /// 0 when the portfolio is empty.
    pub fn equity_pct(&self) -> f64 {
        let total = self.total_value();
        if total == 0.0 {
            0.0
        } else {
            self.equity_value / total
        }
    }

    /// 0 when the portfolio is empty.
    pub fn bond_pct(&self) -> f64 {
        let total = self.total_value();
        if total == 0.0 {
            0.0
        } else {
            self.bond_value / total
        }
    }
}

/// (1 + annual)^(1/4) - 1
pub fn quarterly_inflation_rate(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).powf(0.25) - 1.0
}

/// Compound one quarter of inflation into the portfolio's cumulative factor.
///
/// Call exactly once per quarter, before the rule engine reads the baseline.
pub fn advance_inflation(portfolio: &mut PortfolioState, annual_rate: f64) {
    portfolio.cumulative_inflation *= 1.0 + quarterly_inflation_rate(annual_rate);
}
