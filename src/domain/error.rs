//! Domain error types.

/// Top-level error type for drawdown.
#[derive(Debug, thiserror::Error)]
pub enum DrawdownError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid price series {series}: {reason}")]
    InvalidSeries { series: String, reason: String },

    #[error("insufficient history for {series}: have {observations} periods, need {minimum}")]
    InsufficientHistory {
        series: String,
        observations: usize,
        minimum: usize,
    },

    #[error("price data error: {reason}")]
    PriceData { reason: String },

    #[error("momentum signal unavailable: {reason}")]
    SignalUnavailable { reason: String },

    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("audit log error at {path}: {reason}")]
    Audit { path: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DrawdownError {
    pub fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        DrawdownError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&DrawdownError> for std::process::ExitCode {
    fn from(err: &DrawdownError) -> Self {
        let code: u8 = match err {
            DrawdownError::Io(_) => 1,
            DrawdownError::ConfigParse { .. }
            | DrawdownError::ConfigMissing { .. }
            | DrawdownError::ConfigInvalid { .. } => 2,
            DrawdownError::InvalidSeries { .. }
            | DrawdownError::InsufficientHistory { .. }
            | DrawdownError::PriceData { .. } => 3,
            DrawdownError::SignalUnavailable { .. } => 4,
            DrawdownError::InvalidInput { .. } => 5,
            DrawdownError::Audit { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}
