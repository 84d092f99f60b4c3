//! Error taxonomy (§7 "Error Handling Design").
//!
//! Each fallible concern gets its own `thiserror::Error` enum (mirroring
//! the corpus's one-enum-per-concern convention), and every enum
//! implements `TrustDebtErrorCode` so callers can serialize a stable,
//! machine-readable code regardless of the human-readable message.

mod config_error;
mod fim_error;
mod provider_error;
mod scheduler_error;
mod step_error;
mod storage_error;
mod validation_error;
mod workspace_error;

pub use config_error::ConfigError;
pub use fim_error::FimError;
pub use provider_error::ProviderError;
pub use scheduler_error::SchedulerError;
pub use step_error::StepError;
pub use storage_error::StorageError;
pub use validation_error::{Severity, ValidationError};
pub use workspace_error::WorkspaceError;

/// Maps any error variant to a stable string code, independent of the
/// (potentially parameterized, locale-agnostic) display message.
pub trait TrustDebtErrorCode {
    fn error_code(&self) -> &'static str;
}
