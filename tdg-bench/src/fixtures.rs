//! Synthetic corpus generation for benchmarking the pipeline end-to-end
//! without a real repository on disk — mirrors the shape of the teacher's
//! fixture generator, scaled here to document counts instead of file trees.

use chrono::Utc;

use tdg_core::types::document::{DocumentType, RawDocument};
use tdg_pipeline::CorpusProvider;

#[derive(Debug, Clone, Copy)]
pub enum FixtureSize {
    Micro,
    Small,
    Medium,
}

impl FixtureSize {
    fn document_count(self) -> usize {
        match self {
            FixtureSize::Micro => 5,
            FixtureSize::Small => 50,
            FixtureSize::Medium => 500,
        }
    }
}

const SUBJECTS: &[&str] = &[
    "fix security vulnerability in auth module",
    "improve test coverage for payment flow",
    "refactor retry logic for reliability",
    "document the deployment runbook",
    "add input validation to the public API",
    "harden the rate limiter against abuse",
    "clean up dead code in the scheduler",
    "upgrade the encryption library",
];

/// An in-memory [`CorpusProvider`] generating a deterministic number of
/// commits and blog-style documents, scaled by [`FixtureSize`].
pub struct SyntheticCorpusProvider {
    size: FixtureSize,
}

impl SyntheticCorpusProvider {
    pub fn new(size: FixtureSize) -> Self {
        Self { size }
    }
}

impl CorpusProvider for SyntheticCorpusProvider {
    fn commits(&self, _window_days: u32, _timeout_ms: u64) -> Result<Vec<RawDocument>, String> {
        let now = Utc::now();
        Ok((0..self.size.document_count())
            .map(|i| {
                let subject = SUBJECTS[i % SUBJECTS.len()];
                RawDocument {
                    id: RawDocument::deterministic_id(DocumentType::Commit, &format!("commit-{i}")),
                    doc_type: DocumentType::Commit,
                    title: subject.to_string(),
                    content: format!("{subject}\n\nchanged files: src/module_{i}.rs"),
                    timestamp: now,
                    metadata: Default::default(),
                }
            })
            .collect())
    }

    fn blogs(&self) -> Result<Vec<RawDocument>, String> {
        let now = Utc::now();
        Ok((0..self.size.document_count() / 5)
            .map(|i| RawDocument {
                id: RawDocument::deterministic_id(DocumentType::Blog, &format!("blog-{i}")),
                doc_type: DocumentType::Blog,
                title: format!("engineering notes #{i}"),
                content: "we rely on test coverage, regression suites, and threat modeling"
                    .to_string(),
                timestamp: now,
                metadata: Default::default(),
            })
            .collect())
    }

    fn documents(&self) -> Result<Vec<RawDocument>, String> {
        Ok(Vec::new())
    }

    fn voice_memos(&self) -> Result<Vec<RawDocument>, String> {
        Ok(Vec::new())
    }
}
