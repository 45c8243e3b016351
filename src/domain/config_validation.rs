//! Builds a `RetirementConfig` from a config port and validates it once at load time.
//!
//! Every field is required in the file. `neutral_score` is the only optional key.

use std::path::PathBuf;

use crate::domain::config::RetirementConfig;
use crate::domain::error::DrawdownError;
use crate::ports::config_port::ConfigPort;

pub fn build_retirement_config(config: &dyn ConfigPort) -> Result<RetirementConfig, DrawdownError> {
    let defaults = RetirementConfig::default();
    let retirement = RetirementConfig {
        initial_portfolio_value: require_f64(config, "portfolio", "initial_portfolio_value")?,
        equity_target: require_f64(config, "portfolio", "equity_target")?,
        bond_target: require_f64(config, "portfolio", "bond_target")?,
        base_withdrawal_rate: require_f64(config, "withdrawal", "base_withdrawal_rate")?,
        inflation_rate: require_f64(config, "withdrawal", "inflation_rate")?,
        max_withdrawal_rate: require_f64(config, "withdrawal", "max_withdrawal_rate")?,
        min_withdrawal_rate: require_f64(config, "withdrawal", "min_withdrawal_rate")?,
        prosperity_threshold: require_f64(config, "guyton_klinger", "prosperity_threshold")?,
        prosperity_increase: require_f64(config, "guyton_klinger", "prosperity_increase")?,
        capital_preservation_threshold: require_f64(
            config,
            "guyton_klinger",
            "capital_preservation_threshold",
        )?,
        capital_preservation_decrease: require_f64(
            config,
            "guyton_klinger",
            "capital_preservation_decrease",
        )?,
        signal_strength_threshold: require_f64(config, "signal", "signal_strength_threshold")?,
        neutral_score: optional_f64(config, "signal", "neutral_score", defaults.neutral_score)?,
        audit_log_path: PathBuf::from(require_string(config, "audit", "audit_log_path")?),
    };
    validate_retirement_config(&retirement)?;
    Ok(retirement)
}

pub fn validate_retirement_config(config: &RetirementConfig) -> Result<(), DrawdownError> {
    if !(config.initial_portfolio_value > 0.0) {
        return Err(invalid(
            "portfolio",
            "initial_portfolio_value",
            "initial_portfolio_value must be positive",
        ));
    }
    check_fraction("portfolio", "equity_target", config.equity_target)?;
    check_fraction("portfolio", "bond_target", config.bond_target)?;
    check_fraction("withdrawal", "base_withdrawal_rate", config.base_withdrawal_rate)?;
    check_fraction("withdrawal", "max_withdrawal_rate", config.max_withdrawal_rate)?;
    check_fraction("withdrawal", "min_withdrawal_rate", config.min_withdrawal_rate)?;
    if !(config.inflation_rate > -1.0 && config.inflation_rate < 1.0) {
        return Err(invalid(
            "withdrawal",
            "inflation_rate",
            "inflation_rate must be between -1 and 1",
        ));
    }
    if config.min_withdrawal_rate > config.max_withdrawal_rate {
        return Err(invalid(
            "withdrawal",
            "min_withdrawal_rate",
            "min_withdrawal_rate must not exceed max_withdrawal_rate",
        ));
    }

    check_fraction("guyton_klinger", "prosperity_increase", config.prosperity_increase)?;
    check_fraction(
        "guyton_klinger",
        "capital_preservation_decrease",
        config.capital_preservation_decrease,
    )?;
    if !(config.capital_preservation_threshold > 0.0) {
        return Err(invalid(
            "guyton_klinger",
            "capital_preservation_threshold",
            "capital_preservation_threshold must be positive",
        ));
    }
    if !(config.prosperity_threshold > config.capital_preservation_threshold) {
        return Err(invalid(
            "guyton_klinger",
            "prosperity_threshold",
            "prosperity_threshold must be above capital_preservation_threshold",
        ));
    }

    check_fraction("signal", "signal_strength_threshold", config.signal_strength_threshold)?;
    check_fraction("signal", "neutral_score", config.neutral_score)?;

    if config.audit_log_path.as_os_str().is_empty() {
        return Err(DrawdownError::ConfigMissing {
            section: "audit".to_string(),
            key: "audit_log_path".to_string(),
        });
    }
    Ok(())
}

fn require_string(config: &dyn ConfigPort, section: &str, key: &str) -> Result<String, DrawdownError> {
    match config.get_string(section, key) {
        Some(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(DrawdownError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }),
    }
}

fn require_f64(config: &dyn ConfigPort, section: &str, key: &str) -> Result<f64, DrawdownError> {
    let raw = require_string(config, section, key)?;
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(invalid(section, key, &format!("'{raw}' is not a number"))),
    }
}

fn optional_f64(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: f64,
) -> Result<f64, DrawdownError> {
    match config.get_string(section, key) {
        None => Ok(default),
        Some(_) => require_f64(config, section, key),
    }
}

fn check_fraction(section: &str, key: &str, value: f64) -> Result<(), DrawdownError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(invalid(section, key, &format!("{key} must be between 0 and 1")));
    }
    Ok(())
}

fn invalid(section: &str, key: &str, reason: &str) -> DrawdownError {
    DrawdownError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
