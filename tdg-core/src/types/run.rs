//! On-disk layout of a pipeline run (§3 "Pipeline Run"), content-addressed
//! by a timestamped `runId`:
//!
//! ```text
//! <data>/pipeline-runs/<runId>/
//!   0-raw-materials/0-raw-materials.json
//!   1-document-processing/1-document-processing.json
//!   …
//!   7-final-report/{7-final-report.json, 7-final-report.html, 7-audit-log.json}
//!   pipeline-summary.json
//! ```
//!
//! Ownership & lifecycle: each step's JSON is exclusively produced by that
//! step and read-only thereafter (§3). `RunLayout` only computes paths; it
//! performs no I/O itself (see `workspace::run_dir` for the atomic
//! create/write helpers that do).

use std::path::PathBuf;

/// Stable step-name stems, in pipeline order. Index == step number.
pub const STEP_NAMES: [&str; 8] = [
    "0-raw-materials",
    "1-document-processing",
    "2-categories-balanced",
    "3-shortlex-validation",
    "4-grades-statistics",
    "5-goal-alignment",
    "6-analysis-narratives",
    "7-final-report",
];

/// Path calculator for a single pipeline run.
#[derive(Debug, Clone)]
pub struct RunLayout {
    data_dir: PathBuf,
    run_id: String,
}

impl RunLayout {
    pub fn new(data_dir: impl Into<PathBuf>, run_id: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            run_id: run_id.into(),
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn run_dir(&self) -> PathBuf {
        self.data_dir.join("pipeline-runs").join(&self.run_id)
    }

    /// Directory for step `n` (0-7).
    pub fn step_dir(&self, step: usize) -> PathBuf {
        self.run_dir().join(STEP_NAMES[step])
    }

    /// Primary JSON artifact path for step `n`.
    pub fn step_artifact(&self, step: usize) -> PathBuf {
        self.step_dir(step).join(format!("{}.json", STEP_NAMES[step]))
    }

    pub fn final_report_html(&self) -> PathBuf {
        self.step_dir(7).join("7-final-report.html")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.step_dir(7).join("7-audit-log.json")
    }

    pub fn summary(&self) -> PathBuf {
        self.run_dir().join("pipeline-summary.json")
    }

    /// The convenience pointer at `<data>/identity-vector.json` (§6).
    pub fn identity_pointer(&self) -> PathBuf {
        self.data_dir.join("identity-vector.json")
    }

    /// The append-only drift log at `<data>/fim-deny-log.jsonl` (§6).
    pub fn drift_log(&self) -> PathBuf {
        self.data_dir.join("fim-deny-log.jsonl")
    }
}

/// Generates a deterministic-within-a-process, monotonically sortable
/// `runId` from a timestamp, e.g. `20260728T214512Z`. Callers that need
/// collision resistance within the same second append a short suffix.
pub fn run_id_for(ts: chrono::DateTime<chrono::Utc>) -> String {
    ts.format("%Y%m%dT%H%M%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_nests_under_pipeline_runs() {
        let layout = RunLayout::new("/data", "20260101T000000Z");
        assert_eq!(
            layout.run_dir(),
            PathBuf::from("/data/pipeline-runs/20260101T000000Z")
        );
        assert_eq!(
            layout.step_artifact(0),
            PathBuf::from("/data/pipeline-runs/20260101T000000Z/0-raw-materials/0-raw-materials.json")
        );
        assert_eq!(
            layout.final_report_html(),
            PathBuf::from("/data/pipeline-runs/20260101T000000Z/7-final-report/7-final-report.html")
        );
    }
}
