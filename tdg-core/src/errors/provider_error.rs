//! Upstream collaborator failures (LLM, git, HTTP, subprocess) — soft-fail
//! for the enclosing operation (§6, §7).

use super::TrustDebtErrorCode;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider `{provider}` call timed out after {timeout_ms}ms")]
    Timeout { provider: &'static str, timeout_ms: u64 },

    #[error("provider `{provider}` unreachable: {message}")]
    Unreachable { provider: &'static str, message: String },

    #[error("provider `{provider}` returned an error: {message}")]
    Rejected { provider: &'static str, message: String },
}

impl TrustDebtErrorCode for ProviderError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "PROVIDER_TIMEOUT",
            Self::Unreachable { .. } => "PROVIDER_UNREACHABLE",
            Self::Rejected { .. } => "PROVIDER_REJECTED",
        }
    }
}
