//! Price history port trait.

use crate::domain::error::DrawdownError;
use crate::domain::price_series::PriceSeries;
use chrono::NaiveDate;

pub trait PricePort {
    /// Completed monthly observations for `symbol`, one per month, with the month
    /// containing `as_of` excluded.
    fn monthly_series(&self, symbol: &str, as_of: NaiveDate) -> Result<PriceSeries, DrawdownError>;
}
