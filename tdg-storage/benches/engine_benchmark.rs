//! Throughput benchmarks for the drift-event batch path and the
//! keyset-paginated read path.

use criterion::{criterion_group, criterion_main, Criterion};
use tempfile::tempdir;

use tdg_storage::engine::TrustDebtStorageEngine;

fn bench_drift_event_append(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let engine = TrustDebtStorageEngine::open(&dir.path().join("bench.db")).unwrap();

    c.bench_function("append_drift_event", |b| {
        b.iter(|| {
            engine
                .append_drift_event("2026-01-01T00:00:00Z", "shell_execute", 0.5, 0.4, "[]")
                .unwrap()
        })
    });
    engine.flush_batch_sync().unwrap();

    c.bench_function("drift_events_page", |b| {
        b.iter(|| engine.drift_events_page(0, 100).unwrap())
    });
}

criterion_group!(benches, bench_drift_event_append);
criterion_main!(benches);
