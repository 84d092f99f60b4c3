//! Step 0 — Raw Materials (§4.2 step 0).
//!
//! Gathers commits, blogs, documents, and voice memos via the injected
//! `CorpusProvider`, assigns each a deterministic id, and records per-source
//! skip reasons rather than aborting when a source is unreadable.

use serde::{Deserialize, Serialize};
use tdg_core::errors::StepError;
use tdg_core::types::document::RawDocument;

use crate::context::RunContext;
use crate::steps::write_artifact;

pub const STEP: usize = 0;
pub const NAME: &str = "0-raw-materials";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RawMaterialsStats {
    pub commits: usize,
    pub blogs: usize,
    pub documents: usize,
    pub voice_memos: usize,
    pub total_bytes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RawMaterialsArtifact {
    pub documents: Vec<RawDocument>,
    pub stats: RawMaterialsStats,
    pub skipped: Vec<SkippedSource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedSource {
    pub source: &'static str,
    pub reason: String,
}

pub fn run(ctx: &RunContext) -> Result<(), StepError> {
    let window_days = tdg_core::constants::DEFAULT_COMMIT_WINDOW_DAYS as u32;

    let mut artifact = RawMaterialsArtifact::default();

    match ctx.corpus.commits(window_days, 10_000) {
        Ok(docs) => {
            artifact.stats.commits = docs.len();
            artifact.documents.extend(docs);
        }
        Err(reason) => artifact.skipped.push(SkippedSource { source: "commits", reason }),
    }
    match ctx.corpus.blogs() {
        Ok(docs) => {
            artifact.stats.blogs = docs.len();
            artifact.documents.extend(docs);
        }
        Err(reason) => artifact.skipped.push(SkippedSource { source: "blogs", reason }),
    }
    match ctx.corpus.documents() {
        Ok(docs) => {
            artifact.stats.documents = docs.len();
            artifact.documents.extend(docs);
        }
        Err(reason) => artifact.skipped.push(SkippedSource { source: "documents", reason }),
    }
    match ctx.corpus.voice_memos() {
        Ok(docs) => {
            artifact.stats.voice_memos = docs.len();
            artifact.documents.extend(docs);
        }
        Err(reason) => artifact.skipped.push(SkippedSource { source: "voice_memos", reason }),
    }

    artifact.stats.total_bytes = artifact
        .documents
        .iter()
        .map(|d| d.content.len() as u64)
        .sum();

    if !artifact.skipped.is_empty() {
        tracing::warn!(skipped = artifact.skipped.len(), "step 0: some corpus sources were unreadable");
    }

    write_artifact(ctx, STEP, NAME, &artifact)
}
