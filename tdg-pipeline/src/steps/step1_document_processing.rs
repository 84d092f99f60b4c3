//! Step 1 — Document Processing (§4.2 step 1).
//!
//! Normalizes and tokenizes each raw document into a `ProcessedDocument`,
//! and builds the corpus-wide keyword frequency histogram downstream steps
//! require. Also partitions documents into `intent` (documentation-derived)
//! and `reality` (commit-derived) buckets per the glossary's Intent vs.
//! Reality distinction — an optional enrichment step 3 consumes, not part
//! of the minimum downstream contract.

use std::collections::BTreeMap;

use regex::Regex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tdg_core::errors::StepError;
use tdg_core::types::document::{DocumentType, ProcessedDocument};

use crate::context::RunContext;
use crate::steps::step0_raw_materials::{RawMaterialsArtifact, STEP as STEP0};
use crate::steps::{read_artifact, write_artifact};

pub const STEP: usize = 1;
pub const NAME: &str = "1-document-processing";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DocumentProcessingArtifact {
    pub documents: Vec<ProcessedDocument>,
    pub keyword_frequency: BTreeMap<String, u64>,
    /// Document ids drawn from documentation roots (blogs, documents).
    pub intent_document_ids: Vec<String>,
    /// Document ids drawn from source/commit history.
    pub reality_document_ids: Vec<String>,
}

fn tokenize(re: &Regex, content: &str) -> Vec<String> {
    re.find_iter(&content.to_lowercase())
        .map(|m| m.as_str().to_string())
        .filter(|w| w.len() > 2)
        .collect()
}

fn split_sections(content: &str) -> Vec<String> {
    content
        .split("\n\n")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn run(ctx: &RunContext) -> Result<(), StepError> {
    let raw: RawMaterialsArtifact = read_artifact(ctx, STEP0, "0-raw-materials")?;
    let word_re = Regex::new(r"[a-zA-Z][a-zA-Z0-9_]*").map_err(|e| StepError::Failed {
        step: STEP,
        name: NAME,
        message: e.to_string(),
    })?;

    let mut artifact = DocumentProcessingArtifact::default();
    let mut histogram: FxHashMap<String, u64> = FxHashMap::default();

    for doc in raw.documents {
        let normalized_content = doc.content.to_lowercase();
        let keywords = tokenize(&word_re, &doc.content);
        for kw in &keywords {
            *histogram.entry(kw.clone()).or_insert(0) += 1;
        }
        let sections = split_sections(&doc.content);
        let word_count = doc.content.split_whitespace().count();

        match doc.doc_type {
            DocumentType::Blog | DocumentType::Document => {
                artifact.intent_document_ids.push(doc.id.clone())
            }
            DocumentType::Commit => artifact.reality_document_ids.push(doc.id.clone()),
            DocumentType::VoiceMemo => {}
        }

        artifact.documents.push(ProcessedDocument {
            raw: doc,
            normalized_content,
            sections,
            keywords,
            word_count,
        });
    }

    artifact.keyword_frequency = histogram.into_iter().collect();
    write_artifact(ctx, STEP, NAME, &artifact)
}
