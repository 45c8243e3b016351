//! Monthly price history for one instrument.
//!
//! A `PriceSeries` is ordered by date with strictly increasing timestamps and one
//! observation per month. Gaps are dropped, never interpolated.

use chrono::{Datelike, NaiveDate};

use crate::domain::error::DrawdownError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    name: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series from points that are already ordered.
    ///
    /// Fails if any price is not finite, if dates are not strictly increasing, or if
    /// two points fall in the same month.
    pub fn new(name: impl Into<String>, points: Vec<PricePoint>) -> Result<Self, DrawdownError> {
        let name = name.into();
        for (i, point) in points.iter().enumerate() {
            if !point.price.is_finite() {
                return Err(DrawdownError::InvalidSeries {
                    series: name,
                    reason: format!("non-finite price on {}", point.date),
                });
            }
            if i > 0 && point.date <= points[i - 1].date {
                return Err(DrawdownError::InvalidSeries {
                    series: name,
                    reason: format!(
                        "dates must be strictly increasing ({} follows {})",
                        point.date,
                        points[i - 1].date
                    ),
                });
            }
            if i > 0 && same_month(points[i - 1].date, point.date) {
                return Err(DrawdownError::InvalidSeries {
                    series: name,
                    reason: format!(
                        "{} and {} fall in the same month",
                        points[i - 1].date,
                        point.date
                    ),
                });
            }
        }
        Ok(Self { name, points })
    }

    /// Normalize raw observations into a monthly series.
    ///
    /// Missing, non-finite and non-positive prices are dropped. Observations are
    /// sorted by date, and when a month has several the latest one wins. If
    /// `as_of` is given, the month containing it is still in progress and is
    /// excluded along with anything after it.
    pub fn from_observations(
        name: impl Into<String>,
        observations: impl IntoIterator<Item = (NaiveDate, Option<f64>)>,
        as_of: Option<NaiveDate>,
    ) -> Result<Self, DrawdownError> {
        let mut raw: Vec<PricePoint> = observations
            .into_iter()
            .filter_map(|(date, price)| match price {
                Some(p) if p.is_finite() && p > 0.0 => Some(PricePoint { date, price: p }),
                _ => None,
            })
            .collect();
        raw.sort_by_key(|p| p.date);

        if let Some(today) = as_of {
            let month_start = first_of_month(today);
            raw.retain(|p| p.date < month_start);
        }

        let mut points: Vec<PricePoint> = Vec::with_capacity(raw.len());
        for point in raw {
            match points.last_mut() {
                Some(last) if same_month(last.date, point.date) => *last = point,
                _ => points.push(point),
            }
        }

        Self::new(name, points)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}
