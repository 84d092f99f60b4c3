//! Secondary-index storage errors (tdg-storage). The SQLite index is a
//! read-optimization over the file-based artifacts §3/§6 define as
//! canonical; a storage failure never blocks a pipeline run or a
//! permission check, only the queries that consult the index.

use super::TrustDebtErrorCode;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("migration failed at version {version}: {message}")]
    Migration { version: i64, message: String },

    #[error("batch writer channel closed")]
    ChannelClosed,

    #[error("serialization failed: {message}")]
    Serialization { message: String },
}

impl TrustDebtErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "STORAGE_SQLITE_ERROR",
            Self::Migration { .. } => "STORAGE_MIGRATION_FAILED",
            Self::ChannelClosed => "STORAGE_CHANNEL_CLOSED",
            Self::Serialization { .. } => "STORAGE_SERIALIZATION_ERROR",
        }
    }
}
