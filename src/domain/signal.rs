//! Directional signal derived from a momentum tally, and the withdrawal source it selects.

use serde::Serialize;
use std::fmt;

use crate::domain::config::RetirementConfig;
use crate::domain::momentum::MomentumTally;

/// `direction` lies in [-0.5, 0.5], positive meaning risk-on.
/// `strength` lies in [0, 1], 0 meaning perfectly neutral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signal {
    pub direction: f64,
    pub strength: f64,
}

impl Signal {
    pub const NEUTRAL: Signal = Signal {
        direction: 0.0,
        strength: 0.0,
    };

    /// direction = score - 0.5, strength = |direction| * 2
    pub fn from_score(score: f64) -> Signal {
        let direction = score - 0.5;
        Signal {
            direction,
            strength: direction.abs() * 2.0,
        }
    }

    /// Map a tally onto a signal. A 0/0 tally takes `neutral_score`.
    pub fn from_tally(tally: &MomentumTally, neutral_score: f64) -> Signal {
        Signal::from_score(tally.score().unwrap_or(neutral_score))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WithdrawalSource {
    Equity,
    Bond,
    Proportional,
}

impl fmt::Display for WithdrawalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WithdrawalSource::Equity => write!(f, "equity"),
            WithdrawalSource::Bond => write!(f, "bond"),
            WithdrawalSource::Proportional => write!(f, "proportional"),
        }
    }
}

/// Weak signals split the withdrawal; strong ones pick a side.
/// A direction of exactly zero with sufficient strength maps to bonds.
pub fn decide_source(direction: f64, strength: f64, config: &RetirementConfig) -> WithdrawalSource {
    if strength < config.signal_strength_threshold {
        WithdrawalSource::Proportional
    } else if direction > 0.0 {
        WithdrawalSource::Equity
    } else {
        WithdrawalSource::Bond
    }
}
