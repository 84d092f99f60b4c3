//! `TrustDebtStorageEngine` — single owner of the `DatabaseManager` and
//! `BatchWriter` pair. Nothing outside this module touches a raw
//! `&Connection` (corpus pattern: `drift-storage::engine::DriftStorageEngine`).

use std::path::Path;

use tdg_core::errors::StorageError;
use tdg_core::types::identity::IdentityVector;

use crate::batch::{BatchWriter, DriftEventRow as BatchDriftEventRow};
use crate::connection::DatabaseManager;
use crate::queries::{self, DriftEventRow, IdentitySnapshotRow, RunSummaryRow};

pub struct TrustDebtStorageEngine {
    db: DatabaseManager,
    batch: BatchWriter,
}

impl TrustDebtStorageEngine {
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let db = DatabaseManager::open(path)?;
        let batch_conn = db.open_batch_connection()?;
        Ok(Self {
            db,
            batch: BatchWriter::new(batch_conn),
        })
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let db = DatabaseManager::open_in_memory()?;
        let batch_conn = db.open_batch_connection()?;
        Ok(Self {
            db,
            batch: BatchWriter::new(batch_conn),
        })
    }

    /// Records a completed pipeline run's summary (one row per run, direct
    /// write — low frequency, no need for the batch path).
    pub fn record_run_summary(
        &self,
        run_id: &str,
        created_at: &str,
        exit_code: i64,
        summary_json: &str,
    ) -> Result<(), StorageError> {
        self.db.with_writer(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO pipeline_runs (run_id, created_at, exit_code, summary_json)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![run_id, created_at, exit_code, summary_json],
            )?;
            Ok(())
        })
    }

    /// Records step 4's materialized identity vector for a run.
    pub fn record_identity_snapshot(
        &self,
        run_id: &str,
        identity: &IdentityVector,
    ) -> Result<(), StorageError> {
        let category_scores_json =
            serde_json::to_string(&identity.category_scores).map_err(|e| StorageError::Serialization {
                message: e.to_string(),
            })?;
        self.db.with_writer(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO identity_snapshots
                 (run_id, user_id, last_updated, sovereignty_score, category_scores_json)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    run_id,
                    identity.user_id,
                    identity.last_updated.to_rfc3339(),
                    identity.sovereignty_score,
                    category_scores_json,
                ],
            )?;
            Ok(())
        })
    }

    /// Appends a drift-event row via the batch writer (fire-and-forget; the
    /// authoritative append-only record is `<data>/fim-deny-log.jsonl`,
    /// this index exists for queryable recovery-path / history lookups).
    pub fn append_drift_event(
        &self,
        ts: &str,
        tool: &str,
        overlap: f64,
        sovereignty: f64,
        failed_categories_json: &str,
    ) -> Result<(), StorageError> {
        self.batch.send_drift_event(BatchDriftEventRow {
            ts: ts.to_string(),
            tool: tool.to_string(),
            overlap,
            sovereignty,
            failed_categories_json: failed_categories_json.to_string(),
        })
    }

    pub fn flush_batch_sync(&self) -> Result<(), StorageError> {
        self.batch.flush_sync()
    }

    pub fn list_runs(&self, limit: u32) -> Result<Vec<RunSummaryRow>, StorageError> {
        self.db.with_reader(|conn| queries::list_runs(conn, limit))
    }

    pub fn latest_identity_for_user(
        &self,
        user_id: &str,
    ) -> Result<Option<IdentitySnapshotRow>, StorageError> {
        self.db
            .with_reader(|conn| queries::latest_identity_for_user(conn, user_id))
    }

    pub fn drift_events_page(
        &self,
        after_id: i64,
        page_size: u32,
    ) -> Result<Vec<DriftEventRow>, StorageError> {
        self.db
            .with_reader(|conn| queries::drift_events_page(conn, after_id, page_size))
    }

    pub fn count_drift_events(&self) -> Result<i64, StorageError> {
        self.db.with_reader(queries::count_drift_events)
    }

    pub fn checkpoint(&self) -> Result<(), StorageError> {
        self.db.checkpoint()
    }

    pub fn path(&self) -> Option<&Path> {
        self.db.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tdg_core::categories::Category;
    use tdg_core::types::collections::FxHashMap;

    #[test]
    fn run_round_trip() {
        let engine = TrustDebtStorageEngine::open_in_memory().unwrap();
        engine
            .record_run_summary("r1", "2026-01-01T00:00:00Z", 0, "{}")
            .unwrap();
        let runs = engine.list_runs(10).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].run_id, "r1");
    }

    #[test]
    fn identity_snapshot_round_trip() {
        let engine = TrustDebtStorageEngine::open_in_memory().unwrap();
        engine
            .record_run_summary("r1", "2026-01-01T00:00:00Z", 0, "{}")
            .unwrap();
        let mut scores = FxHashMap::default();
        scores.insert(Category::Security, 0.9);
        let identity = IdentityVector::new("u1", Utc::now(), scores);
        engine.record_identity_snapshot("r1", &identity).unwrap();
        let snapshot = engine.latest_identity_for_user("u1").unwrap().unwrap();
        assert_eq!(snapshot.run_id, "r1");
        assert!((snapshot.sovereignty_score - identity.sovereignty_score).abs() < 1e-9);
    }

    #[test]
    fn drift_events_are_queryable_after_flush() {
        let engine = TrustDebtStorageEngine::open_in_memory().unwrap();
        engine
            .append_drift_event("2026-01-01T00:00:00Z", "git_push", 0.5, 0.4, "[]")
            .unwrap();
        engine.flush_batch_sync().unwrap();
        assert_eq!(engine.count_drift_events().unwrap(), 1);
        let page = engine.drift_events_page(0, 10).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].tool, "git_push");
    }
}
