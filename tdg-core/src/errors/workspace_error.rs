//! Workspace/run-directory and locking errors.

use super::TrustDebtErrorCode;

#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("I/O error at {path}: {message}")]
    Io { path: String, message: String },

    #[error("{operation} lock unavailable: {message}")]
    Locked { operation: String, message: String },

    #[error("lock file at {path} is corrupt: {message}")]
    CorruptLock { path: String, message: String },
}

impl From<std::io::Error> for WorkspaceError {
    fn from(e: std::io::Error) -> Self {
        Self::Io {
            path: String::new(),
            message: e.to_string(),
        }
    }
}

impl TrustDebtErrorCode for WorkspaceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "WORKSPACE_IO_ERROR",
            Self::Locked { .. } => "WORKSPACE_LOCKED",
            Self::CorruptLock { .. } => "WORKSPACE_LOCK_CORRUPT",
        }
    }
}
