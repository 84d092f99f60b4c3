//! Cost of computing a drift recovery-path forecast at increasing stage
//! counts — used to size how fine-grained a forecast the scheduler or a
//! status UI can afford to request per tick.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use tdg_fim::recovery_path;

fn bench_recovery_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("recovery_path");
    for stages in [10u32, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("stages", stages), &stages, |b, &stages| {
            b.iter(|| recovery_path(1500.0, 1000, stages));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_recovery_path);
criterion_main!(benches);
