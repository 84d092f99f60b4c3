//! The append-only drift-event log — `<data>/fim-deny-log.jsonl` (§4.3,
//! §6). One JSON line per denial. Re-running the pipeline recomputes
//! `sovereignty_raw`; only an explicit reset action truncates this file.

use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use tdg_core::errors::FimError;
use tdg_core::types::requirement::FailedCategory;

/// One line of the deny log: `{ts, tool, overlap, sovereignty, failedCategories}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenyLogEntry {
    pub ts: chrono::DateTime<chrono::Utc>,
    pub tool: String,
    pub overlap: f64,
    pub sovereignty: f64,
    #[serde(rename = "failedCategories")]
    pub failed_categories: Vec<FailedCategory>,
}

/// Appends one entry to the log, creating the file (and its parent
/// directory) if absent. Append-only: never truncates, never rewrites
/// earlier lines.
pub fn append(path: &Path, entry: &DenyLogEntry) -> Result<(), FimError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| FimError::DenyLogIo {
            path: path.display().to_string(),
            message: format!("creating parent directory: {e}"),
        })?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| FimError::DenyLogIo {
            path: path.display().to_string(),
            message: format!("opening: {e}"),
        })?;
    let line = serde_json::to_string(entry).map_err(|e| FimError::MalformedEntry {
        message: format!("serializing entry: {e}"),
    })?;
    writeln!(file, "{line}").map_err(|e| FimError::DenyLogIo {
        path: path.display().to_string(),
        message: format!("writing entry: {e}"),
    })?;
    tracing::warn!(tool = %entry.tool, overlap = entry.overlap, "permission denied, drift event recorded");
    Ok(())
}

/// The number of drift events recorded so far — `driftEvents` in the decay
/// formula (§4.3). `0` if the log does not yet exist.
pub fn count(path: &Path) -> Result<u64, FimError> {
    if !path.exists() {
        return Ok(0);
    }
    let file = std::fs::File::open(path).map_err(|e| FimError::DenyLogIo {
        path: path.display().to_string(),
        message: format!("opening: {e}"),
    })?;
    let count = BufReader::new(file)
        .lines()
        .filter(|line| line.as_ref().is_ok_and(|l| !l.trim().is_empty()))
        .count();
    Ok(count as u64)
}

/// Reads every entry in the log, in append order. Intended for audit
/// tooling and tests, not the hot permission-check path.
pub fn read_all(path: &Path) -> Result<Vec<DenyLogEntry>, FimError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let file = std::fs::File::open(path).map_err(|e| FimError::DenyLogIo {
        path: path.display().to_string(),
        message: format!("opening: {e}"),
    })?;
    BufReader::new(file)
        .lines()
        .filter(|line| line.as_ref().is_ok_and(|l| !l.trim().is_empty()))
        .map(|line| {
            let line = line.map_err(|e| FimError::DenyLogIo {
                path: path.display().to_string(),
                message: format!("reading line: {e}"),
            })?;
            serde_json::from_str(&line).map_err(|e| FimError::MalformedEntry {
                message: format!("parsing line: {e}"),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tdg_core::categories::Category;

    fn entry(tool: &str) -> DenyLogEntry {
        DenyLogEntry {
            ts: Utc::now(),
            tool: tool.to_string(),
            overlap: 0.5,
            sovereignty: 0.4,
            failed_categories: vec![FailedCategory {
                category: Category::Security,
                actual: 0.4,
                required: 0.6,
            }],
        }
    }

    #[test]
    fn appending_increments_count_and_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fim-deny-log.jsonl");

        assert_eq!(count(&path).unwrap(), 0);
        append(&path, &entry("shell_execute")).unwrap();
        append(&path, &entry("file_delete")).unwrap();
        assert_eq!(count(&path).unwrap(), 2);

        let all = read_all(&path).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].tool, "shell_execute");
        assert_eq!(all[1].tool, "file_delete");
    }

    #[test]
    fn missing_log_reads_as_zero_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.jsonl");
        assert_eq!(count(&path).unwrap(), 0);
        assert!(read_all(&path).unwrap().is_empty());
    }
}
