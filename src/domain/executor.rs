//! Applies a quarterly withdrawal to the portfolio.

use crate::domain::portfolio::PortfolioState;
use crate::domain::signal::WithdrawalSource;

/// What the executor did beyond the plain deduction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExecutionReport {
    /// Amount that spilled into the other asset because the chosen one ran out.
    pub overflow: f64,
}

/// Deduct `amount` from the chosen source.
///
/// A directed withdrawal larger than its source empties that source and takes the
/// remainder from the other asset, which is allowed to go negative. Proportional
/// withdrawals split by the pre-withdrawal weights.
pub fn execute_withdrawal(
    portfolio: &mut PortfolioState,
    amount: f64,
    source: WithdrawalSource,
) -> ExecutionReport {
    match source {
        WithdrawalSource::Equity => {
            if amount > portfolio.equity_value {
                let overflow = amount - portfolio.equity_value;
                portfolio.equity_value = 0.0;
                portfolio.bond_value -= overflow;
                ExecutionReport { overflow }
            } else {
                portfolio.equity_value -= amount;
                ExecutionReport::default()
            }
        }
        WithdrawalSource::Bond => {
            if amount > portfolio.bond_value {
                let overflow = amount - portfolio.bond_value;
                portfolio.bond_value = 0.0;
                portfolio.equity_value -= overflow;
                ExecutionReport { overflow }
            } else {
                portfolio.bond_value -= amount;
                ExecutionReport::default()
            }
        }
        WithdrawalSource::Proportional => {
            let equity_pct = portfolio.equity_pct();
            let bond_pct = portfolio.bond_pct();
            portfolio.equity_value -= amount * equity_pct;
            portfolio.bond_value -= amount * bond_pct;
            ExecutionReport::default()
        }
    }
}
