//! Configuration errors — fatal at startup, propagated (§7).

use super::TrustDebtErrorCode;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required configuration field: {field}")]
    Missing { field: &'static str },

    #[error("failed to read config file {path}: {message}")]
    Io { path: String, message: String },

    #[error("unsupported config file extension: {extension:?}")]
    UnsupportedFormat { extension: String },

    #[error("failed to parse {format} config: {message}")]
    Parse { format: &'static str, message: String },
}

impl TrustDebtErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "CONFIG_MISSING_FIELD",
            Self::Io { .. } => "CONFIG_IO_ERROR",
            Self::UnsupportedFormat { .. } => "CONFIG_UNSUPPORTED_FORMAT",
            Self::Parse { .. } => "CONFIG_PARSE_ERROR",
        }
    }
}
