//! Momentum scorer.
//!
//! Each series is tested at horizons of 8, 9 and 10 months with two methods:
//! - SMA crossover: latest close above the trailing n-month SMA (needs n observations)
//! - Point in time: latest close above the close n months earlier (needs n + 1 observations)
//!
//! A signal without enough history is skipped and does not count toward the total.
//! Two series per asset class and three horizons give 12 signals when fully populated.

use chrono::NaiveDate;
use std::fmt;

use crate::domain::error::DrawdownError;
use crate::domain::price_series::PriceSeries;

pub const HORIZONS: [usize; 3] = [8, 9, 10];

/// Fewest observations a series must carry before it may be scored.
pub const MIN_HISTORY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MomentumMethod {
    SmaCrossover,
    PointInTime,
}

impl fmt::Display for MomentumMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MomentumMethod::SmaCrossover => write!(f, "SMA"),
            MomentumMethod::PointInTime => write!(f, "PIT"),
        }
    }
}

/// One evaluated signal: the latest close compared against a reference level.
#[derive(Debug, Clone, PartialEq)]
pub struct MomentumReading {
    pub series: String,
    pub method: MomentumMethod,
    pub horizon: usize,
    pub latest: f64,
    pub reference: f64,
    pub bullish: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MomentumTally {
    pub bullish: usize,
    pub total: usize,
}

impl MomentumTally {
    pub fn record(&mut self, bullish: bool) {
        self.total += 1;
        if bullish {
            self.bullish += 1;
        }
    }

    pub fn merge(self, other: MomentumTally) -> MomentumTally {
        MomentumTally {
            bullish: self.bullish + other.bullish,
            total: self.total + other.total,
        }
    }

    /// bullish / total, or `None` when no signal could be evaluated.
    pub fn score(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.bullish as f64 / self.total as f64)
        }
    }
}

impl fmt::Display for MomentumTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bullish, self.total)
    }
}

/// Simple moving average of the last `window` prices, inclusive of the latest.
pub fn trailing_sma(prices: &[f64], window: usize) -> Option<f64> {
    if window == 0 || prices.len() < window {
        return None;
    }
    let slice = &prices[prices.len() - window..];
    Some(slice.iter().sum::<f64>() / window as f64)
}

/// The price exactly `horizon` periods before the latest.
pub fn point_in_time_reference(prices: &[f64], horizon: usize) -> Option<f64> {
    if prices.len() <= horizon {
        return None;
    }
    Some(prices[prices.len() - 1 - horizon])
}

/// Every valid signal for one series, in horizon order, SMA before point-in-time.
pub fn evaluate(series: &PriceSeries) -> Vec<MomentumReading> {
    let prices = series.prices();
    let Some(&latest) = prices.last() else {
        return Vec::new();
    };

    let mut readings = Vec::with_capacity(HORIZONS.len() * 2);
    for horizon in HORIZONS {
        if let Some(sma) = trailing_sma(&prices, horizon) {
            readings.push(MomentumReading {
                series: series.name().to_string(),
                method: MomentumMethod::SmaCrossover,
                horizon,
                latest,
                reference: sma,
                bullish: latest > sma,
            });
        }
        if let Some(past) = point_in_time_reference(&prices, horizon) {
            readings.push(MomentumReading {
                series: series.name().to_string(),
                method: MomentumMethod::PointInTime,
                horizon,
                latest,
                reference: past,
                bullish: latest > past,
            });
        }
    }
    readings
}

pub fn tally(readings: &[MomentumReading]) -> MomentumTally {
    let mut tally = MomentumTally::default();
    for reading in readings {
        tally.record(reading.bullish);
    }
    tally
}

/// Score a set of series describing the same asset class.
///
/// Any series shorter than [`MIN_HISTORY`] fails the whole score. An empty list
/// yields a valid 0/0 tally.
pub fn score(series_list: &[PriceSeries]) -> Result<MomentumTally, DrawdownError> {
    if let Some(short) = series_list.iter().find(|s| s.len() < MIN_HISTORY) {
        return Err(DrawdownError::InsufficientHistory {
            series: short.name().to_string(),
            observations: short.len(),
            minimum: MIN_HISTORY,
        });
    }

    Ok(series_list
        .iter()
        .map(|s| tally(&evaluate(s)))
        .fold(MomentumTally::default(), MomentumTally::merge))
}

/// Latest close against its trailing SMA for one month.
#[derive(Debug, Clone, PartialEq)]
pub struct SmaSnapshot {
    pub date: NaiveDate,
    pub price: f64,
    pub sma: f64,
    pub pct_from_sma: f64,
}

/// Rolling SMA snapshots for the most recent `count` months that have a full window.
pub fn sma_snapshots(series: &PriceSeries, window: usize, count: usize) -> Vec<SmaSnapshot> {
    let points = series.points();
    if window == 0 || points.len() < window {
        return Vec::new();
    }

    let mut snapshots = Vec::new();
    let mut window_sum: f64 = points[..window - 1].iter().map(|p| p.price).sum();
    for i in (window - 1)..points.len() {
        window_sum += points[i].price;
        let sma = window_sum / window as f64;
        let pct_from_sma = if sma == 0.0 {
            0.0
        } else {
            (points[i].price - sma) / sma * 100.0
        };
        snapshots.push(SmaSnapshot {
            date: points[i].date,
            price: points[i].price,
            sma,
            pct_from_sma,
        });
        window_sum -= points[i + 1 - window].price;
    }

    let start = snapshots.len().saturating_sub(count);
    snapshots.split_off(start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn monthly(name: &str, prices: &[f64]) -> PriceSeries {
        PriceSeries::from_observations(
            name,
            prices.iter().enumerate().map(|(i, &p)| {
                let year = 2020 + (i / 12) as i32;
                let month = (i % 12) as u32 + 1;
                (NaiveDate::from_ymd_opt(year, month, 1).unwrap(), Some(p))
            }),
            None,
        )
        .unwrap()
    }

    fn rising(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64).collect()
    }

    #[test]
    fn trailing_sma_uses_last_window() {
        let prices = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(trailing_sma(&prices, 3).unwrap(), 4.0);
        assert_relative_eq!(trailing_sma(&prices, 5).unwrap(), 3.0);
        assert!(trailing_sma(&prices, 6).is_none());
        assert!(trailing_sma(&prices, 0).is_none());
    }

    #[test]
    fn point_in_time_needs_more_than_horizon() {
        let prices = [10.0, 20.0, 30.0];
        assert_eq!(point_in_time_reference(&prices, 2), Some(10.0));
        assert_eq!(point_in_time_reference(&prices, 3), None);
    }

    #[test]
    fn full_history_gives_six_signals_per_series() {
        let series = monthly("SP500TR", &rising(15));
        let readings = evaluate(&series);
        assert_eq!(readings.len(), 6);
        assert!(readings.iter().all(|r| r.bullish));
        assert_eq!(readings[0].method, MomentumMethod::SmaCrossover);
        assert_eq!(readings[0].horizon, 8);
        assert_eq!(readings[1].method, MomentumMethod::PointInTime);
    }

    #[test]
    fn two_series_fully_populated_give_twelve() {
        let tr = monthly("SP500TR", &rising(15));
        let px = monthly("GSPC", &rising(15));
        let tally = score(&[tr, px]).unwrap();
        assert_eq!(tally, MomentumTally { bullish: 12, total: 12 });
        assert_eq!(tally.score(), Some(1.0));
    }

    #[test]
    fn exactly_ten_observations_skips_ten_month_point_in_time() {
        let series = monthly("SP500TR", &rising(10));
        let readings = evaluate(&series);
        // SMA 8/9/10 valid, PIT 8/9 valid, PIT 10 needs 11 observations
        assert_eq!(readings.len(), 5);
        assert!(!readings
            .iter()
            .any(|r| r.method == MomentumMethod::PointInTime && r.horizon == 10));
    }

    #[test]
    fn falling_prices_are_bearish() {
        let prices: Vec<f64> = (0..12).map(|i| 200.0 - i as f64).collect();
        let tally = score(&[monthly("SP500TR", &prices)]).unwrap();
        assert_eq!(tally.bullish, 0);
        assert_eq!(tally.total, 6);
        assert_eq!(tally.score(), Some(0.0));
    }

    #[test]
    fn equal_price_is_not_bullish() {
        let prices = vec![100.0; 12];
        let tally = score(&[monthly("FLAT", &prices)]).unwrap();
        assert_eq!(tally.bullish, 0);
        assert_eq!(tally.total, 6);
    }

    #[test]
    fn short_series_is_fatal_and_named() {
        let long = monthly("SP500TR", &rising(12));
        let short = monthly("GSPC", &rising(9));
        let err = score(&[long, short]).unwrap_err();
        assert!(matches!(
            err,
            DrawdownError::InsufficientHistory { ref series, observations: 9, minimum: 10 }
                if series == "GSPC"
        ));
    }

    #[test]
    fn empty_list_is_a_valid_zero_tally() {
        let tally = score(&[]).unwrap();
        assert_eq!(tally, MomentumTally::default());
        assert_eq!(tally.score(), None);
    }

    #[test]
    fn evaluate_short_series_skips_silently() {
        let readings = evaluate(&monthly("NEW", &rising(8)));
        // only the 8-month SMA has enough history
        assert_eq!(readings.len(), 1);
        assert!(evaluate(&monthly("EMPTY", &[])).is_empty());
    }

    #[test]
    fn tally_display() {
        assert_eq!(MomentumTally { bullish: 7, total: 12 }.to_string(), "7/12");
    }

    #[test]
    fn sma_snapshots_last_three() {
        let series = monthly("SP500TR", &rising(15));
        let snaps = sma_snapshots(&series, 10, 3);
        assert_eq!(snaps.len(), 3);
        // last window is 105..=114, mean 109.5
        let last = snaps.last().unwrap();
        assert_relative_eq!(last.price, 114.0);
        assert_relative_eq!(last.sma, 109.5, epsilon = 1e-9);
        assert_relative_eq!(last.pct_from_sma, (114.0 - 109.5) / 109.5 * 100.0, epsilon = 1e-9);
        assert_relative_eq!(snaps[0].sma, 107.5, epsilon = 1e-9);
    }

    #[test]
    fn sma_snapshots_short_series_is_empty() {
        let series = monthly("SP500TR", &rising(5));
        assert!(sma_snapshots(&series, 10, 3).is_empty());
    }

    proptest! {
        #[test]
        fn tally_bounds_hold(
            a in prop::collection::vec(1.0f64..1000.0, 10..30),
            b in prop::collection::vec(1.0f64..1000.0, 10..30),
        ) {
            let tally = score(&[monthly("A", &a), monthly("B", &b)]).unwrap();
            prop_assert!(tally.bullish <= tally.total);
            prop_assert!(tally.total <= 12);
            let s = tally.score().unwrap();
            prop_assert!((0.0..=1.0).contains(&s));
        }
    }
}
