//! Calendar quarter labels of the form `2026-Q1`.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::DrawdownError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuarterLabel {
    pub year: i32,
    pub quarter: u8,
}

impl QuarterLabel {
    pub fn next(self) -> Self {
        if self.quarter == 4 {
            QuarterLabel {
                year: self.year + 1,
                quarter: 1,
            }
        } else {
            QuarterLabel {
                year: self.year,
                quarter: self.quarter + 1,
            }
        }
    }
}

impl FromStr for QuarterLabel {
    type Err = DrawdownError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DrawdownError::invalid_input("quarter", format!("'{s}', expected YYYY-Qn"));
        let (year, quarter) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let quarter: u8 = quarter
            .strip_prefix(['Q', 'q'])
            .and_then(|q| q.parse().ok())
            .ok_or_else(invalid)?;
        if !(1..=4).contains(&quarter) {
            return Err(invalid());
        }
        Ok(QuarterLabel { year, quarter })
    }
}

impl fmt::Display for QuarterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-Q{}", self.year, self.quarter)
    }
}
