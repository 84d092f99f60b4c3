//! Schema migrations. A single `schema_version` table tracks the highest
//! applied migration; migrations are idempotent `CREATE TABLE IF NOT EXISTS`
//! statements run in order, matching the corpus's forward-only migration
//! convention (no down-migrations — this is a secondary index, rebuildable
//! from the canonical JSON/JSONL artifacts in `<data>/`).

use rusqlite::Connection;
use tdg_core::errors::StorageError;

use crate::connection::DatabaseManager;

type Migration = (i64, &'static str);

const MIGRATIONS: &[Migration] = &[
    (
        1,
        "CREATE TABLE IF NOT EXISTS pipeline_runs (
            run_id TEXT PRIMARY KEY,
            created_at TEXT NOT NULL,
            exit_code INTEGER NOT NULL,
            summary_json TEXT NOT NULL
        );",
    ),
    (
        2,
        "CREATE TABLE IF NOT EXISTS identity_snapshots (
            run_id TEXT PRIMARY KEY REFERENCES pipeline_runs(run_id),
            user_id TEXT NOT NULL,
            last_updated TEXT NOT NULL,
            sovereignty_score REAL NOT NULL,
            category_scores_json TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_identity_snapshots_user
            ON identity_snapshots(user_id, last_updated);",
    ),
    (
        3,
        "CREATE TABLE IF NOT EXISTS drift_events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            ts TEXT NOT NULL,
            tool TEXT NOT NULL,
            overlap REAL NOT NULL,
            sovereignty REAL NOT NULL,
            failed_categories_json TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_drift_events_ts ON drift_events(ts);",
    ),
];

pub fn run(db: &DatabaseManager) -> Result<(), StorageError> {
    db.with_writer(|conn| {
        apply(conn)?;
        Ok(())
    })
}

/// Same migration set, applied directly to a connection not yet wrapped in
/// a `DatabaseManager` (used for the in-memory batch-writer fallback).
pub fn run_on_connection(conn: &Connection) -> Result<(), StorageError> {
    apply(conn)
}

fn apply(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);",
    )?;
    let current: i64 = conn
        .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    for (version, sql) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        conn.execute_batch(sql).map_err(|e| StorageError::Migration {
            version: *version,
            message: e.to_string(),
        })?;
        conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [*version])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        apply(&conn).unwrap();
        apply(&conn).unwrap();
        let version: i64 = conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |r| r.get(0))
            .unwrap();
        assert_eq!(version, MIGRATIONS.last().unwrap().0);
    }
}
