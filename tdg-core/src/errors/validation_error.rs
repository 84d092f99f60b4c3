//! Artifact validation errors — recorded with a severity, never abort the
//! pipeline (§7).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, thiserror::Error, Serialize, Deserialize)]
#[error("[{severity:?}] step {step} artifact missing key `{key}`: {message}")]
pub struct ValidationError {
    pub step: usize,
    pub key: String,
    pub message: String,
    pub severity: Severity,
}

impl ValidationError {
    pub fn error(step: usize, key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            step,
            key: key.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn warning(step: usize, key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            step,
            key: key.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    pub fn info(step: usize, key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            step,
            key: key.into(),
            message: message.into(),
            severity: Severity::Info,
        }
    }
}
