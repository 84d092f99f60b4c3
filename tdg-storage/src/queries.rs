//! Read queries against the secondary index.

use rusqlite::{params, Connection};
use tdg_core::errors::StorageError;

#[derive(Debug, Clone)]
pub struct RunSummaryRow {
    pub run_id: String,
    pub created_at: String,
    pub exit_code: i64,
    pub summary_json: String,
}

#[derive(Debug, Clone)]
pub struct IdentitySnapshotRow {
    pub run_id: String,
    pub user_id: String,
    pub last_updated: String,
    pub sovereignty_score: f64,
    pub category_scores_json: String,
}

#[derive(Debug, Clone)]
pub struct DriftEventRow {
    pub id: i64,
    pub ts: String,
    pub tool: String,
    pub overlap: f64,
    pub sovereignty: f64,
    pub failed_categories_json: String,
}

pub fn list_runs(conn: &Connection, limit: u32) -> Result<Vec<RunSummaryRow>, StorageError> {
    let mut stmt = conn.prepare(
        "SELECT run_id, created_at, exit_code, summary_json
         FROM pipeline_runs ORDER BY created_at DESC LIMIT ?1",
    )?;
    let rows = stmt
        .query_map(params![limit], |row| {
            Ok(RunSummaryRow {
                run_id: row.get(0)?,
                created_at: row.get(1)?,
                exit_code: row.get(2)?,
                summary_json: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn latest_identity_for_user(
    conn: &Connection,
    user_id: &str,
) -> Result<Option<IdentitySnapshotRow>, StorageError> {
    conn.query_row(
        "SELECT run_id, user_id, last_updated, sovereignty_score, category_scores_json
         FROM identity_snapshots WHERE user_id = ?1 ORDER BY last_updated DESC LIMIT 1",
        params![user_id],
        |row| {
            Ok(IdentitySnapshotRow {
                run_id: row.get(0)?,
                user_id: row.get(1)?,
                last_updated: row.get(2)?,
                sovereignty_score: row.get(3)?,
                category_scores_json: row.get(4)?,
            })
        },
    )
    .map(Some)
    .or_else(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => Ok(None),
        other => Err(other.into()),
    })
}

/// Keyset-paginated drift events, oldest-first from `after_id` (exclusive).
pub fn drift_events_page(
    conn: &Connection,
    after_id: i64,
    page_size: u32,
) -> Result<Vec<DriftEventRow>, StorageError> {
    let mut stmt = conn.prepare(
        "SELECT id, ts, tool, overlap, sovereignty, failed_categories_json
         FROM drift_events WHERE id > ?1 ORDER BY id ASC LIMIT ?2",
    )?;
    let rows = stmt
        .query_map(params![after_id, page_size], |row| {
            Ok(DriftEventRow {
                id: row.get(0)?,
                ts: row.get(1)?,
                tool: row.get(2)?,
                overlap: row.get(3)?,
                sovereignty: row.get(4)?,
                failed_categories_json: row.get(5)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn count_drift_events(conn: &Connection) -> Result<i64, StorageError> {
    Ok(conn.query_row("SELECT COUNT(*) FROM drift_events", [], |r| r.get(0))?)
}
