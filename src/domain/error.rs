//! Domain error types.

/// Top-level error type for stockdash.
#[derive(Debug, thiserror::Error)]
pub enum DashError {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("unknown symbol {symbol}")]
    UnknownSymbol { symbol: String },

    #[error("market data error: {reason}")]
    DataSource { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DashError {
    pub fn data_source(reason: impl Into<String>) -> Self {
        Self::DataSource {
            reason: reason.into(),
        }
    }

    pub fn config_invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&DashError> for std::process::ExitCode {
    fn from(err: &DashError) -> Self {
        let code: u8 = match err {
            DashError::Io(_) => 1,
            DashError::ConfigParse { .. } | DashError::ConfigInvalid { .. } => 2,
            DashError::DataSource { .. } => 3,
            DashError::InvalidArgument { .. } => 4,
            DashError::UnknownSymbol { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
