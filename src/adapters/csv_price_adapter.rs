//! CSV price history adapter.
//!
//! Reads `<base_path>/<SYMBOL>.csv` with a header row. The `date` column holds
//! `YYYY-MM-DD` (anything after the first ten characters is ignored); prices come
//! from `adjclose` when present, otherwise `close`. Blank or `NaN` prices are gaps.

use crate::domain::error::DrawdownError;
use crate::domain::price_series::PriceSeries;
use crate::ports::price_port::PricePort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

pub struct CsvPriceAdapter {
    base_path: PathBuf,
}

impl CsvPriceAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path
            .join(format!("{}.csv", symbol.trim_start_matches('^')))
    }
}

impl PricePort for CsvPriceAdapter {
    fn monthly_series(&self, symbol: &str, as_of: NaiveDate) -> Result<PriceSeries, DrawdownError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| DrawdownError::PriceData {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| DrawdownError::PriceData {
                reason: format!("CSV header error in {}: {}", path.display(), e),
            })?
            .clone();

        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let date_col = column("date").ok_or_else(|| DrawdownError::PriceData {
            reason: format!("missing date column in {}", path.display()),
        })?;
        let price_col = column("adjclose")
            .or_else(|| column("adj_close"))
            .or_else(|| column("close"))
            .ok_or_else(|| DrawdownError::PriceData {
                reason: format!("missing close column in {}", path.display()),
            })?;

        let mut observations = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| DrawdownError::PriceData {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(date_col).unwrap_or("").trim();
            let date = NaiveDate::parse_from_str(date_str.get(..10).unwrap_or(date_str), "%Y-%m-%d")
                .map_err(|e| DrawdownError::PriceData {
                    reason: format!("invalid date '{}': {}", date_str, e),
                })?;

            let price = match record.get(price_col).map(str::trim) {
                None | Some("") => None,
                Some(raw) => Some(raw.parse::<f64>().map_err(|e| DrawdownError::PriceData {
                    reason: format!("invalid price '{}' on {}: {}", raw, date, e),
                })?),
            };
            observations.push((date, price));
        }

        let raw_rows = observations.len();
        let series = PriceSeries::from_observations(symbol, observations, Some(as_of))?;
        debug!(
            symbol,
            raw_rows,
            months = series.len(),
            "loaded monthly price history"
        );
        Ok(series)
    }
}
