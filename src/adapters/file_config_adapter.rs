//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }
}

/// Template written by `init-config`, holding the default plan.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"; drawdown retirement plan. All rates are annual fractions.

[portfolio]
initial_portfolio_value = 1000000
; informational only, the engine never rebalances
equity_target = 0.85
bond_target = 0.15

[withdrawal]
base_withdrawal_rate = 0.05
inflation_rate = 0.03
max_withdrawal_rate = 0.07
min_withdrawal_rate = 0.03

[guyton_klinger]
prosperity_threshold = 1.20
prosperity_increase = 0.10
capital_preservation_threshold = 0.80
capital_preservation_decrease = 0.10

[signal]
; below this strength the withdrawal is split proportionally
signal_strength_threshold = 0.30
; score assumed when no momentum signal can be evaluated
neutral_score = 0.5

[audit]
audit_log_path = retirement_audit.jsonl
"#;
