//! Structured log points of a quarterly review.
//!
//! Passed explicitly into the review so the engine holds no process-wide logger.

use crate::domain::guyton_klinger::WithdrawalPlan;
use crate::domain::portfolio::PortfolioState;
use crate::domain::signal::{Signal, WithdrawalSource};

pub trait ReviewLogPort {
    fn review_started(&self, portfolio: &PortfolioState, annual_withdrawal: f64);
    fn signal_received(&self, signal: &Signal);
    fn source_decided(&self, source: WithdrawalSource);
    fn withdrawal_planned(&self, plan: &WithdrawalPlan);
    fn withdrawal_overflowed(&self, source: WithdrawalSource, overflow: f64);
    fn withdrawal_applied(&self, portfolio: &PortfolioState);
}
