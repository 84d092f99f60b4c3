//! End-to-end scenarios for the permission engine, exercised through
//! [`tdg_fim::PermissionEngine`] rather than the bare pure functions.

use chrono::Utc;
use proptest::prelude::*;

use tdg_core::categories::Category;
use tdg_core::types::collections::FxHashMap;
use tdg_core::types::identity::IdentityVector;
use tdg_core::types::requirement::ActionRequirement;
use tdg_fim::{check_permission_default, compute_overlap, get_requirement, PermissionEngine};

fn identity(scores: &[(Category, f64)], sovereignty: f64) -> IdentityVector {
    let mut map = FxHashMap::default();
    for (c, v) in scores {
        map.insert(*c, *v);
    }
    let mut iv = IdentityVector::new("u1", Utc::now(), map);
    iv.sovereignty_score = sovereignty;
    iv
}

#[test]
fn catalog_requirements_behave_sensibly_against_a_strong_identity() {
    let strong = identity(&Category::all().map(|c| (c, 0.95)), 0.95);
    for tool in ["shell_execute", "file_write", "file_delete", "git_push"] {
        let req = get_requirement(tool).unwrap();
        let decision = check_permission_default(&strong, req);
        assert!(decision.allowed, "{tool} should be allowed for a strong identity");
    }
}

#[test]
fn catalog_requirements_deny_a_weak_identity() {
    let weak = identity(&Category::all().map(|c| (c, 0.1)), 0.1);
    let req = get_requirement("deploy").unwrap();
    let decision = check_permission_default(&weak, req);
    assert!(!decision.allowed);
    assert!(!decision.failed_categories.is_empty());
}

#[test]
fn engine_applies_drift_decay_after_repeated_denials_until_blocked_stays_blocked() {
    let dir = tempfile::tempdir().unwrap();
    let engine = PermissionEngine::new(
        dir.path().join("fim-deny-log.jsonl"),
        tdg_core::constants::DEFAULT_THRESHOLD,
        tdg_core::constants::DEFAULT_K_E,
    );
    let weak = identity(&[(Category::Security, 0.5)], 0.5);
    let req = get_requirement("git_force_push").unwrap();

    for _ in 0..5 {
        let decision = engine.check(&weak, req).unwrap();
        assert!(!decision.allowed);
    }
    assert_eq!(engine.drift_events().unwrap(), 5);
}

proptest! {
    // P5: raising every identity category score can only raise or hold overlap steady.
    #[test]
    fn overlap_is_monotone_in_identity_scores(
        base in 0.0f64..1.0,
        delta in 0.0f64..1.0,
        threshold in 0.0f64..1.0,
    ) {
        let raised = (base + delta).min(1.0);
        let mut required = FxHashMap::default();
        required.insert(Category::Security, threshold);
        let req = ActionRequirement::new("t", required, 0.0, "");

        let low = identity(&[(Category::Security, base)], 0.5);
        let high = identity(&[(Category::Security, raised)], 0.5);
        prop_assert!(compute_overlap(&high, &req) >= compute_overlap(&low, &req));
    }
}
