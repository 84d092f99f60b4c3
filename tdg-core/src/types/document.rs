//! Raw and processed document shapes (§3).
//!
//! `RawDocument::doc_type` is modeled as a tagged union rather than a class
//! hierarchy (§9 "Cyclic/inheritance patterns → tagged variants"); step 0
//! of the pipeline dispatches on this tag via a small lookup table instead
//! of polymorphic method resolution.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// The four corpora the analysis pipeline ingests (§1, §4.2 step 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentType {
    Commit,
    Blog,
    Document,
    VoiceMemo,
}

impl DocumentType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Commit => "commit",
            Self::Blog => "blog",
            Self::Document => "document",
            Self::VoiceMemo => "voice-memo",
        }
    }
}

/// `{id, type, title, content, timestamp, metadata}` — §3.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDocument {
    pub id: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub title: String,
    pub content: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl RawDocument {
    /// Deterministic id: stable across runs for the same logical source.
    /// `source_key` should be the most stable natural key available for
    /// the document type (commit hash, file path + mtime-independent
    /// content hash, etc.) — callers in step 0 supply it.
    pub fn deterministic_id(doc_type: DocumentType, source_key: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(doc_type.as_str().as_bytes());
        hasher.update(b"\0");
        hasher.update(source_key.as_bytes());
        let digest = hasher.finalize();
        hex::encode(&digest[..12])
    }
}

/// Raw document plus `{normalizedContent, sections, keywords, wordCount}` (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedDocument {
    #[serde(flatten)]
    pub raw: RawDocument,
    pub normalized_content: String,
    pub sections: Vec<String>,
    pub keywords: Vec<String>,
    pub word_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_id_is_stable() {
        let a = RawDocument::deterministic_id(DocumentType::Commit, "abc123");
        let b = RawDocument::deterministic_id(DocumentType::Commit, "abc123");
        assert_eq!(a, b);
        let c = RawDocument::deterministic_id(DocumentType::Blog, "abc123");
        assert_ne!(a, c, "type participates in the id so cross-type collisions can't happen");
    }
}
