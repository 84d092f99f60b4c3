//! Run-directory creation and atomic artifact writes (§3, §5, §9).
//!
//! Creating the run directory is the only failure mode the pipeline treats
//! as fatal (`StepError::RunDirCreation`); every subsequent artifact write
//! is write-then-rename so a reader never observes a partially written
//! step JSON.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::errors::{StepError, WorkspaceError};
use crate::types::run::{RunLayout, STEP_NAMES};

/// Creates the full directory skeleton for a run: the run directory itself
/// and one subdirectory per step, so every step can write its artifact
/// without first checking whether its parent exists.
pub fn create_run_dir(layout: &RunLayout) -> Result<(), StepError> {
    fs::create_dir_all(layout.run_dir()).map_err(|e| StepError::RunDirCreation {
        message: format!("{}: {e}", layout.run_dir().display()),
    })?;
    for step in 0..STEP_NAMES.len() {
        fs::create_dir_all(layout.step_dir(step)).map_err(|e| StepError::RunDirCreation {
            message: format!("{}: {e}", layout.step_dir(step).display()),
        })?;
    }
    Ok(())
}

/// Serializes `value` to pretty JSON and writes it to `path` atomically by
/// writing to a sibling temp file and renaming over the destination.
pub fn atomic_write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), WorkspaceError> {
    let body = serde_json::to_vec_pretty(value).map_err(|e| WorkspaceError::Io {
        path: path.display().to_string(),
        message: format!("serialization failed: {e}"),
    })?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| WorkspaceError::Io {
            path: parent.display().to_string(),
            message: e.to_string(),
        })?;
    }
    let tmp_path = path.with_extension(match path.extension() {
        Some(ext) => format!("{}.tmp", ext.to_string_lossy()),
        None => "tmp".to_string(),
    });
    let mut tmp = File::create(&tmp_path).map_err(|e| WorkspaceError::Io {
        path: tmp_path.display().to_string(),
        message: e.to_string(),
    })?;
    tmp.write_all(&body).map_err(|e| WorkspaceError::Io {
        path: tmp_path.display().to_string(),
        message: e.to_string(),
    })?;
    tmp.sync_all().map_err(|e| WorkspaceError::Io {
        path: tmp_path.display().to_string(),
        message: e.to_string(),
    })?;
    fs::rename(&tmp_path, path).map_err(|e| WorkspaceError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_run_dir_makes_every_step_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        let layout = RunLayout::new(dir.path(), "20260101T000000Z");
        create_run_dir(&layout).unwrap();
        for step in 0..STEP_NAMES.len() {
            assert!(layout.step_dir(step).is_dir());
        }
    }

    #[test]
    fn atomic_write_json_leaves_no_tmp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("artifact.json");
        atomic_write_json(&path, &json!({"ok": true})).unwrap();
        assert!(path.exists());
        assert!(!dir.path().join("artifact.json.tmp").exists());
        let read_back: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read_back, json!({"ok": true}));
    }

    #[test]
    fn atomic_write_json_overwrites_existing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("artifact.json");
        atomic_write_json(&path, &json!({"version": 1})).unwrap();
        atomic_write_json(&path, &json!({"version": 2})).unwrap();
        let read_back: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read_back, json!({"version": 2}));
    }
}
