//! `CorpusProvider` — enumerates commits, documents, blogs, and voice
//! memos for step 0 (§4.2 step 0, §6 "Collaborator interfaces"). The core
//! only specifies the trait; concrete providers are external collaborators.
//! A filesystem-backed default is supplied for local/CI use.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::mpsc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tdg_core::types::document::{DocumentType, RawDocument};

/// Gathers the four document kinds step 0 ingests. Every method is
/// fallible per-source and must not panic; callers treat a source error as
/// a skip reason, not a pipeline abort (§4.2 "fails soft on unreadable
/// sources").
pub trait CorpusProvider: Send + Sync {
    /// Commit history within `window_days` of now, most recent first.
    fn commits(&self, window_days: u32, timeout_ms: u64) -> Result<Vec<RawDocument>, String>;
    /// Blog-style markdown from configured content roots.
    fn blogs(&self) -> Result<Vec<RawDocument>, String>;
    /// Tracked documents outside the blog roots.
    fn documents(&self) -> Result<Vec<RawDocument>, String>;
    /// Voice-memo transcripts from an attention-corpus directory of JSONL lines.
    fn voice_memos(&self) -> Result<Vec<RawDocument>, String>;
}

/// Reads commits via `git log` subprocess, and blogs/documents/voice-memos
/// from configured directories on disk.
pub struct FilesystemCorpusProvider {
    pub repo_root: PathBuf,
    pub blog_roots: Vec<PathBuf>,
    pub document_roots: Vec<PathBuf>,
    pub voice_memo_dir: Option<PathBuf>,
}

impl FilesystemCorpusProvider {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            blog_roots: Vec::new(),
            document_roots: Vec::new(),
            voice_memo_dir: None,
        }
    }

    fn walk_markdown(root: &Path, doc_type: DocumentType) -> Result<Vec<RawDocument>, String> {
        if !root.is_dir() {
            return Ok(Vec::new());
        }
        let mut out = Vec::new();
        for entry in ignore::Walk::new(root) {
            let entry = entry.map_err(|e| e.to_string())?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
            let title = content
                .lines()
                .find(|l| l.starts_with("# "))
                .map(|l| l.trim_start_matches("# ").to_string())
                .unwrap_or_else(|| path.display().to_string());
            let source_key = path.display().to_string();
            let metadata = fs::metadata(path).map_err(|e| e.to_string())?;
            let timestamp: DateTime<Utc> = metadata
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|_| Utc::now());
            out.push(RawDocument {
                id: RawDocument::deterministic_id(doc_type, &source_key),
                doc_type,
                title,
                content,
                timestamp,
                metadata: Default::default(),
            });
        }
        Ok(out)
    }
}

impl CorpusProvider for FilesystemCorpusProvider {
    fn commits(&self, window_days: u32, timeout_ms: u64) -> Result<Vec<RawDocument>, String> {
        let since = format!("--since={window_days}.days");
        let format = "--pretty=format:%H|%cI|%s|%b\x1e";
        let (tx, rx) = mpsc::channel();
        let repo_root = self.repo_root.clone();
        let since_owned = since.clone();
        std::thread::spawn(move || {
            let output = Command::new("git")
                .arg("-C")
                .arg(&repo_root)
                .arg("log")
                .arg(&since_owned)
                .arg(format)
                .output();
            let _ = tx.send(output);
        });
        let output = rx
            .recv_timeout(Duration::from_millis(timeout_ms))
            .map_err(|_| format!("git log timed out after {timeout_ms}ms"))?
            .map_err(|e| e.to_string())?;
        if !output.status.success() {
            return Err(String::from_utf8_lossy(&output.stderr).into_owned());
        }
        let text = String::from_utf8_lossy(&output.stdout);
        let mut out = Vec::new();
        for record in text.split('\u{1e}') {
            let record = record.trim();
            if record.is_empty() {
                continue;
            }
            let mut parts = record.splitn(4, '|');
            let (Some(hash), Some(iso_date), Some(subject), Some(body)) =
                (parts.next(), parts.next(), parts.next(), parts.next())
            else {
                continue;
            };
            let timestamp = DateTime::parse_from_rfc3339(iso_date)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now());
            out.push(RawDocument {
                id: RawDocument::deterministic_id(DocumentType::Commit, hash),
                doc_type: DocumentType::Commit,
                title: subject.to_string(),
                content: format!("{subject}\n\n{body}"),
                timestamp,
                metadata: Default::default(),
            });
        }
        Ok(out)
    }

    fn blogs(&self) -> Result<Vec<RawDocument>, String> {
        let mut out = Vec::new();
        for root in &self.blog_roots {
            out.extend(Self::walk_markdown(root, DocumentType::Blog)?);
        }
        Ok(out)
    }

    fn documents(&self) -> Result<Vec<RawDocument>, String> {
        let mut out = Vec::new();
        for root in &self.document_roots {
            out.extend(Self::walk_markdown(root, DocumentType::Document)?);
        }
        Ok(out)
    }

    fn voice_memos(&self) -> Result<Vec<RawDocument>, String> {
        let Some(dir) = &self.voice_memo_dir else {
            return Ok(Vec::new());
        };
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut out = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| e.to_string())? {
            let entry = entry.map_err(|e| e.to_string())?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("jsonl") {
                continue;
            }
            let content = fs::read_to_string(&path).map_err(|e| e.to_string())?;
            for (i, line) in content.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                let value: serde_json::Value =
                    serde_json::from_str(line).map_err(|e| e.to_string())?;
                let transcript = value
                    .get("transcript")
                    .and_then(|v| v.as_str())
                    .unwrap_or("")
                    .to_string();
                let source_key = format!("{}:{i}", path.display());
                out.push(RawDocument {
                    id: RawDocument::deterministic_id(DocumentType::VoiceMemo, &source_key),
                    doc_type: DocumentType::VoiceMemo,
                    title: format!("{} #{i}", path.file_stem().unwrap_or_default().to_string_lossy()),
                    content: transcript,
                    timestamp: Utc::now(),
                    metadata: Default::default(),
                });
            }
        }
        Ok(out)
    }
}
