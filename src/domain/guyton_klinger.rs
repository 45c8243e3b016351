//! Guyton-Klinger withdrawal rules.
//!
//! Rules are evaluated in priority order against the inflation-adjusted baseline
//! `initial_portfolio_value * cumulative_inflation`:
//!
//! 1. Prosperity: total above `baseline * prosperity_threshold` raises the annual
//!    withdrawal by `prosperity_increase`, unless the raised rate would exceed
//!    `max_withdrawal_rate`, in which case nothing changes.
//! 2. Capital preservation (only if 1 did not fire): total below
//!    `baseline * capital_preservation_threshold` cuts the withdrawal by
//!    `capital_preservation_decrease`. A cut landing under `min_withdrawal_rate`
//!    is replaced by the floor itself.
//! 3. Ceiling (always checked): a rate above `max_withdrawal_rate` is clamped to it
//!    and overrides whatever label 1-2 produced.

use serde::Serialize;
use std::fmt;

use crate::domain::config::RetirementConfig;
use crate::domain::portfolio::PortfolioState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GkRule {
    None,
    Prosperity,
    CapitalPreservation,
    Ceiling,
    Floor,
}

impl fmt::Display for GkRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GkRule::None => write!(f, "none"),
            GkRule::Prosperity => write!(f, "prosperity"),
            GkRule::CapitalPreservation => write!(f, "capital_preservation"),
            GkRule::Ceiling => write!(f, "ceiling"),
            GkRule::Floor => write!(f, "floor"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WithdrawalPlan {
    pub quarterly_amount: f64,
    /// Annual withdrawal carried into the next quarter.
    pub annual_withdrawal: f64,
    pub rule: GkRule,
    pub baseline: f64,
}

/// Annual withdrawal as a fraction of portfolio value; 0 for an empty or negative portfolio.
pub fn withdrawal_rate(annual_withdrawal: f64, total_value: f64) -> f64 {
    if total_value <= 0.0 {
        0.0
    } else {
        annual_withdrawal / total_value
    }
}

/// The floor is taken on `max(total, 0)` so a negative portfolio never yields a
/// negative withdrawal.
pub fn compute_withdrawal(
    portfolio: &PortfolioState,
    current_annual_withdrawal: f64,
    config: &RetirementConfig,
) -> WithdrawalPlan {
    let total = portfolio.total_value();
    let baseline = config.initial_portfolio_value * portfolio.cumulative_inflation;

    let mut annual = current_annual_withdrawal;
    let mut rule = GkRule::None;

    if total > baseline * config.prosperity_threshold {
        let raised = annual * (1.0 + config.prosperity_increase);
        if withdrawal_rate(raised, total) <= config.max_withdrawal_rate {
            annual = raised;
            rule = GkRule::Prosperity;
        }
    } else if total < baseline * config.capital_preservation_threshold {
        let cut = annual * (1.0 - config.capital_preservation_decrease);
        if withdrawal_rate(cut, total) >= config.min_withdrawal_rate {
            annual = cut;
            rule = GkRule::CapitalPreservation;
        } else {
            annual = total.max(0.0) * config.min_withdrawal_rate;
            rule = GkRule::Floor;
        }
    }

    if withdrawal_rate(annual, total) > config.max_withdrawal_rate {
        annual = total * config.max_withdrawal_rate;
        rule = GkRule::Ceiling;
    }

    WithdrawalPlan {
        quarterly_amount: annual / 4.0,
        annual_withdrawal: annual,
        rule,
        baseline,
    }
}
