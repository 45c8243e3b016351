//! Core domain types and logic.

pub mod config;
pub mod config_validation;
pub mod decision;
pub mod error;
pub mod executor;
pub mod guyton_klinger;
pub mod momentum;
pub mod portfolio;
pub mod price_series;
pub mod quarter;
pub mod review;
pub mod signal;
