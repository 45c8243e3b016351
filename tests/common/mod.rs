#![allow(dead_code)]

use chrono::{Datelike, NaiveDate};
use drawdown::domain::decision::QuarterlyDecision;
use drawdown::domain::error::DrawdownError;
use drawdown::domain::guyton_klinger::WithdrawalPlan;
use drawdown::domain::portfolio::PortfolioState;
use drawdown::domain::price_series::{PricePoint, PriceSeries};
use drawdown::domain::signal::{Signal, WithdrawalSource};
use drawdown::ports::audit_port::AuditPort;
use drawdown::ports::price_port::PricePort;
use drawdown::ports::review_log_port::ReviewLogPort;
use std::cell::RefCell;
use std::collections::HashMap;

pub struct MockPricePort {
    pub data: HashMap<String, PriceSeries>,
    pub errors: HashMap<String, String>,
    pub requests: RefCell<Vec<(String, NaiveDate)>>,
}

impl MockPricePort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.data.insert(series.name().to_string(), series);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl PricePort for MockPricePort {
    fn monthly_series(&self, symbol: &str, as_of: NaiveDate) -> Result<PriceSeries, DrawdownError> {
        self.requests.borrow_mut().push((symbol.to_string(), as_of));
        if let Some(reason) = self.errors.get(symbol) {
            return Err(DrawdownError::PriceData {
                reason: reason.clone(),
            });
        }
        self.data
            .get(symbol)
            .cloned()
            .ok_or_else(|| DrawdownError::PriceData {
                reason: format!("no data for {symbol}"),
            })
    }
}

/// Keeps every appended decision in memory.
#[derive(Default)]
pub struct MemoryAudit {
    pub records: RefCell<Vec<QuarterlyDecision>>,
}

impl AuditPort for MemoryAudit {
    fn append(&self, decision: &QuarterlyDecision) -> Result<(), DrawdownError> {
        self.records.borrow_mut().push(decision.clone());
        Ok(())
    }
}

pub struct FailingAudit;

impl AuditPort for FailingAudit {
    fn append(&self, _decision: &QuarterlyDecision) -> Result<(), DrawdownError> {
        Err(DrawdownError::Audit {
            path: "memory".into(),
            reason: "disk full".into(),
        })
    }
}

#[derive(Default)]
pub struct RecordingLog {
    pub events: RefCell<Vec<String>>,
}

impl RecordingLog {
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    fn push(&self, event: String) {
        self.events.borrow_mut().push(event);
    }
}

impl ReviewLogPort for RecordingLog {
    fn review_started(&self, portfolio: &PortfolioState, _annual_withdrawal: f64) {
        self.push(format!("started {}", portfolio.quarter));
    }

    fn signal_received(&self, _signal: &Signal) {
        self.push("signal".into());
    }

    fn source_decided(&self, source: WithdrawalSource) {
        self.push(format!("source {source}"));
    }

    fn withdrawal_planned(&self, plan: &WithdrawalPlan) {
        self.push(format!("plan {}", plan.rule));
    }

    fn withdrawal_overflowed(&self, source: WithdrawalSource, _overflow: f64) {
        self.push(format!("overflow {source}"));
    }

    fn withdrawal_applied(&self, _portfolio: &PortfolioState) {
        self.push("applied".into());
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// First-of-month dates beginning with the month of `start`.
pub fn monthly_dates(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    (0..count)
        .map(|i| {
            let months = start.month0() as usize + i;
            date(start.year() + (months / 12) as i32, (months % 12) as u32 + 1, 1)
        })
        .collect()
}

pub fn monthly_series(name: &str, start: NaiveDate, prices: &[f64]) -> PriceSeries {
    let points = monthly_dates(start, prices.len())
        .into_iter()
        .zip(prices)
        .map(|(date, &price)| PricePoint { date, price })
        .collect();
    PriceSeries::new(name, points).unwrap()
}

/// Steadily rising prices: every momentum check is bullish.
pub fn rising(name: &str, count: usize) -> PriceSeries {
    let prices: Vec<f64> = (0..count).map(|i| 100.0 + i as f64 * 2.0).collect();
    monthly_series(name, date(2024, 1, 1), &prices)
}

/// Steadily falling prices: every momentum check is bearish.
pub fn falling(name: &str, count: usize) -> PriceSeries {
    let prices: Vec<f64> = (0..count).map(|i| 300.0 - i as f64 * 2.0).collect();
    monthly_series(name, date(2024, 1, 1), &prices)
}

pub fn symbols(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
