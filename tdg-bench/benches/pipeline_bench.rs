//! End-to-end throughput of a full 8-step pipeline run over synthetic
//! corpora of increasing size.

use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tempfile::tempdir;

use tdg_bench::fixtures::{FixtureSize, SyntheticCorpusProvider};
use tdg_core::config::TrustDebtConfig;
use tdg_pipeline::run_pipeline;

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    group.sample_size(10);

    for (size, label) in [
        (FixtureSize::Micro, "micro"),
        (FixtureSize::Small, "small"),
        (FixtureSize::Medium, "medium"),
    ] {
        group.bench_with_input(BenchmarkId::new("run_pipeline", label), &size, |b, &size| {
            b.iter(|| {
                let dir = tempdir().unwrap();
                let mut config = TrustDebtConfig::default();
                config.data_dir = Some(dir.path().to_path_buf());
                let corpus = Arc::new(SyntheticCorpusProvider::new(size));
                run_pipeline(config, corpus, None, None).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_full_pipeline);
criterion_main!(benches);
