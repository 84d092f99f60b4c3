//! Throughput of the permission engine's pure hot path: `checkPermission`
//! called repeatedly against the built-in requirement catalog.

use chrono::Utc;
use criterion::{criterion_group, criterion_main, Criterion};

use tdg_core::categories::Category;
use tdg_core::types::collections::FxHashMap;
use tdg_core::types::identity::IdentityVector;
use tdg_fim::{check_permission_default, get_requirement};

fn strong_identity() -> IdentityVector {
    let mut scores = FxHashMap::default();
    for category in Category::all() {
        scores.insert(category, 0.9);
    }
    let mut iv = IdentityVector::new("bench-user", Utc::now(), scores);
    iv.sovereignty_score = 0.9;
    iv
}

fn bench_check_permission(c: &mut Criterion) {
    let identity = strong_identity();
    let requirement = get_requirement("deploy").unwrap();

    c.bench_function("check_permission_deploy", |b| {
        b.iter(|| check_permission_default(&identity, requirement))
    });
}

criterion_group!(benches, bench_check_permission);
criterion_main!(benches);
