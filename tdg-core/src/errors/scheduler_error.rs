//! Proactive-scheduler errors (§4.4).

use super::TrustDebtErrorCode;

#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("scheduler already running")]
    AlreadyRunning,

    #[error("scheduler is not running")]
    NotRunning,

    #[error("idleness provider failed: {message}")]
    IdlenessProviderFailed { message: String },

    #[error("sovereignty provider failed: {message}")]
    SovereigntyProviderFailed { message: String },

    #[error("execution substrate rejected injection for task {task_name}: {message}")]
    InjectionFailed { task_name: String, message: String },
}

impl TrustDebtErrorCode for SchedulerError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyRunning => "SCHEDULER_ALREADY_RUNNING",
            Self::NotRunning => "SCHEDULER_NOT_RUNNING",
            Self::IdlenessProviderFailed { .. } => "SCHEDULER_IDLENESS_PROVIDER_FAILED",
            Self::SovereigntyProviderFailed { .. } => "SCHEDULER_SOVEREIGNTY_PROVIDER_FAILED",
            Self::InjectionFailed { .. } => "SCHEDULER_INJECTION_FAILED",
        }
    }
}
