//! Pipeline step errors — recorded in `pipeline-summary.json`, never
//! aborting the run (§4.2 "Failure semantics", §7).

use super::TrustDebtErrorCode;

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("step {step} ({name}) timed out after {timeout_ms}ms")]
    Timeout {
        step: usize,
        name: &'static str,
        timeout_ms: u64,
    },

    #[error("step {step} ({name}) failed: {message}")]
    Failed {
        step: usize,
        name: &'static str,
        message: String,
    },

    #[error("step {step} ({name}) could not read a prerequisite artifact: {message}")]
    MissingPrerequisite {
        step: usize,
        name: &'static str,
        message: String,
    },

    #[error("could not create run directory: {message}")]
    RunDirCreation { message: String },
}

impl TrustDebtErrorCode for StepError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "STEP_TIMEOUT",
            Self::Failed { .. } => "STEP_FAILED",
            Self::MissingPrerequisite { .. } => "STEP_MISSING_PREREQUISITE",
            Self::RunDirCreation { .. } => "STEP_RUN_DIR_CREATION_FAILED",
        }
    }
}

impl StepError {
    /// Per §4.2/§7: run-directory creation failure is the *only* fatal
    /// pipeline condition; everything else is soft-failed and recorded.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::RunDirCreation { .. })
    }
}
