use std::sync::Arc;

use chrono::Utc;
use tdg_core::config::TrustDebtConfig;
use tdg_core::types::document::{DocumentType, RawDocument};
use tdg_pipeline::{run_pipeline, CorpusProvider};

struct SyntheticCorpus;

impl CorpusProvider for SyntheticCorpus {
    fn commits(&self, _window_days: u32, _timeout_ms: u64) -> Result<Vec<RawDocument>, String> {
        Ok(vec![RawDocument {
            id: RawDocument::deterministic_id(DocumentType::Commit, "abc123"),
            doc_type: DocumentType::Commit,
            title: "fix security vulnerability in auth".to_string(),
            content: "fix security vulnerability in auth module, improve encryption".to_string(),
            timestamp: Utc::now(),
            metadata: Default::default(),
        }])
    }

    fn blogs(&self) -> Result<Vec<RawDocument>, String> {
        Ok(vec![RawDocument {
            id: RawDocument::deterministic_id(DocumentType::Blog, "blog-1"),
            doc_type: DocumentType::Blog,
            title: "our testing philosophy".to_string(),
            content: "we rely on test coverage and regression suites".to_string(),
            timestamp: Utc::now(),
            metadata: Default::default(),
        }])
    }

    fn documents(&self) -> Result<Vec<RawDocument>, String> {
        Ok(Vec::new())
    }

    fn voice_memos(&self) -> Result<Vec<RawDocument>, String> {
        Ok(Vec::new())
    }
}

#[test]
fn full_pipeline_run_produces_a_final_report() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = TrustDebtConfig::default();
    config.data_dir = Some(dir.path().to_path_buf());

    let result = run_pipeline(config, Arc::new(SyntheticCorpus), None, None).unwrap();

    assert_eq!(result.steps.len(), 8);
    // Step 0 (corpus ingestion from an in-memory stub) must succeed.
    assert!(result.steps[0].ok, "{:?}", result.steps[0].error);

    let layout = tdg_core::types::run::RunLayout::new(dir.path(), &result.run_id);
    assert!(layout.final_report_html().exists());
    assert!(layout.summary().exists());
}
