//! Dedicated writer thread with a bounded `crossbeam-channel`, batching
//! writes into a single transaction per flush window (corpus pattern:
//! `drift-storage::batch::writer`). The drift-event log is the one
//! high-frequency write path in this crate — every denial appends a row —
//! so it is the one routed through the batch writer; run/identity writes
//! are one-per-pipeline-run and go straight through `with_writer`.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use rusqlite::Connection;
use tdg_core::errors::StorageError;

const CHANNEL_BOUND: usize = 1024;
const BATCH_SIZE: usize = 200;
const FLUSH_TIMEOUT: Duration = Duration::from_millis(100);

/// One row destined for `drift_events`.
#[derive(Debug, Clone)]
pub struct DriftEventRow {
    pub ts: String,
    pub tool: String,
    pub overlap: f64,
    pub sovereignty: f64,
    pub failed_categories_json: String,
}

enum Command {
    DriftEvent(DriftEventRow),
    Flush(Sender<Result<(), StorageError>>),
    Shutdown,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct WriteStats {
    pub drift_event_rows: usize,
    pub flushes: usize,
}

pub struct BatchWriter {
    tx: Sender<Command>,
    handle: Option<JoinHandle<WriteStats>>,
}

impl BatchWriter {
    pub fn new(conn: Connection) -> Self {
        let (tx, rx) = bounded(CHANNEL_BOUND);
        let handle = thread::Builder::new()
            .name("tdg-batch-writer".to_string())
            .spawn(move || writer_loop(conn, rx))
            .expect("failed to spawn batch writer thread");
        Self {
            tx,
            handle: Some(handle),
        }
    }

    pub fn send_drift_event(&self, row: DriftEventRow) -> Result<(), StorageError> {
        self.tx
            .send(Command::DriftEvent(row))
            .map_err(|_| StorageError::ChannelClosed)
    }

    /// Block until every command sent so far has been committed.
    pub fn flush_sync(&self) -> Result<(), StorageError> {
        let (ack_tx, ack_rx) = bounded(1);
        self.tx
            .send(Command::Flush(ack_tx))
            .map_err(|_| StorageError::ChannelClosed)?;
        ack_rx.recv().map_err(|_| StorageError::ChannelClosed)?
    }
}

impl Drop for BatchWriter {
    fn drop(&mut self) {
        let _ = self.tx.send(Command::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn writer_loop(mut conn: Connection, rx: Receiver<Command>) -> WriteStats {
    let mut stats = WriteStats::default();
    let mut pending: Vec<DriftEventRow> = Vec::with_capacity(BATCH_SIZE);

    loop {
        match rx.recv_timeout(FLUSH_TIMEOUT) {
            Ok(Command::DriftEvent(row)) => {
                pending.push(row);
                if pending.len() >= BATCH_SIZE {
                    flush_pending(&mut conn, &mut pending, &mut stats);
                }
            }
            Ok(Command::Flush(ack)) => {
                flush_pending(&mut conn, &mut pending, &mut stats);
                let _ = ack.send(Ok(()));
            }
            Ok(Command::Shutdown) => {
                flush_pending(&mut conn, &mut pending, &mut stats);
                break;
            }
            Err(RecvTimeoutError::Timeout) => {
                if !pending.is_empty() {
                    flush_pending(&mut conn, &mut pending, &mut stats);
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                flush_pending(&mut conn, &mut pending, &mut stats);
                break;
            }
        }
    }
    stats
}

fn flush_pending(conn: &mut Connection, pending: &mut Vec<DriftEventRow>, stats: &mut WriteStats) {
    if pending.is_empty() {
        return;
    }
    let result = (|| -> Result<(), StorageError> {
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO drift_events (ts, tool, overlap, sovereignty, failed_categories_json)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in pending.iter() {
                stmt.execute(rusqlite::params![
                    row.ts,
                    row.tool,
                    row.overlap,
                    row.sovereignty,
                    row.failed_categories_json,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    })();
    match result {
        Ok(()) => {
            stats.drift_event_rows += pending.len();
            stats.flushes += 1;
        }
        Err(e) => tracing::error!(error = %e, rows = pending.len(), "drift-event batch flush failed"),
    }
    pending.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flush_sync_commits_pending_rows() {
        let conn = Connection::open_in_memory().unwrap();
        crate::migrations::run_on_connection(&conn).unwrap();
        let writer = BatchWriter::new(conn);
        for i in 0..5 {
            writer
                .send_drift_event(DriftEventRow {
                    ts: format!("2026-01-01T00:00:0{i}Z"),
                    tool: "shell_execute".to_string(),
                    overlap: 0.5,
                    sovereignty: 0.4,
                    failed_categories_json: "[]".to_string(),
                })
                .unwrap();
        }
        writer.flush_sync().unwrap();
    }
}
