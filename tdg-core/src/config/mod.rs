//! Runtime configuration (§6 "Configuration").
//!
//! Mirrors the corpus's `ScanConfig` convention: every field is `Option<T>`
//! with `#[serde(default)]` so a partial TOML/JSON document is always
//! valid, and `effective_*()` accessors supply the documented defaults.

mod categories;
mod fim;
mod goals;
mod scheduler;

pub use categories::CategoryOverrides;
pub use fim::FimConfig;
pub use goals::GoalConfig;
pub use scheduler::SchedulerConfig;

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// `{dataDir, pipelineIntervalMs, scheduler{...}, fim{...}, categories{...}}` (§6).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TrustDebtConfig {
    pub data_dir: Option<PathBuf>,
    pub pipeline_interval_ms: Option<u64>,
    pub scheduler: SchedulerConfig,
    pub fim: FimConfig,
    pub categories: Option<CategoryOverrides>,
    pub goals: Option<Vec<GoalConfig>>,
}

impl TrustDebtConfig {
    /// Effective data directory, defaulting to `./trust-debt-data`.
    pub fn effective_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("./trust-debt-data"))
    }

    /// Effective pipeline re-run interval, defaulting to 1 hour.
    pub fn effective_pipeline_interval_ms(&self) -> u64 {
        self.pipeline_interval_ms.unwrap_or(3_600_000)
    }

    /// Parse from a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse {
            format: "toml",
            message: e.to_string(),
        })
    }

    /// Parse from a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|e| ConfigError::Parse {
            format: "json",
            message: e.to_string(),
        })
    }

    /// Load from a file path, dispatching on extension (`.toml` or
    /// `.json`); any other extension is a `ConfigError::UnsupportedFormat`.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            other => Err(ConfigError::UnsupportedFormat {
                extension: other.unwrap_or("").to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_all_defaults() {
        let cfg = TrustDebtConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.effective_data_dir(), PathBuf::from("./trust-debt-data"));
        assert_eq!(cfg.fim.effective_threshold(), crate::constants::DEFAULT_THRESHOLD);
    }

    #[test]
    fn partial_toml_overrides_only_given_fields() {
        let cfg = TrustDebtConfig::from_toml_str(
            r#"
            data_dir = "/var/lib/trust-debt"

            [fim]
            threshold = 0.6
            "#,
        )
        .unwrap();
        assert_eq!(cfg.effective_data_dir(), PathBuf::from("/var/lib/trust-debt"));
        assert_eq!(cfg.fim.effective_threshold(), 0.6);
        assert_eq!(cfg.fim.effective_k_e(), crate::constants::DEFAULT_K_E);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let tmp = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        let err = TrustDebtConfig::load_from_path(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
    }
}
