//! Permission-engine errors — the deny log and requirement catalog (§4.3).

use super::TrustDebtErrorCode;

#[derive(Debug, thiserror::Error)]
pub enum FimError {
    #[error("deny log I/O error at {path}: {message}")]
    DenyLogIo { path: String, message: String },

    #[error("deny-log entry malformed: {message}")]
    MalformedEntry { message: String },

    #[error("unknown tool in requirement catalog: {tool_name}")]
    UnknownTool { tool_name: String },
}

impl TrustDebtErrorCode for FimError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DenyLogIo { .. } => "FIM_DENY_LOG_IO_ERROR",
            Self::MalformedEntry { .. } => "FIM_DENY_LOG_MALFORMED_ENTRY",
            Self::UnknownTool { .. } => "FIM_UNKNOWN_TOOL",
        }
    }
}
