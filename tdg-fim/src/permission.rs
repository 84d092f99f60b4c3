//! `checkPermission` — the engine's single public decision point (§4.3).

use tdg_core::types::identity::IdentityVector;
use tdg_core::types::requirement::{ActionRequirement, PermissionDecision};

use crate::overlap::{compute_overlap, failed_categories};

/// `checkPermission(I, R, threshold=0.8)`. Both branches of the AND —
/// overlap meeting `threshold` and sovereignty meeting `R.min_sovereignty`
/// — are required for `allowed` (P2, P3).
pub fn check_permission(
    identity: &IdentityVector,
    requirement: &ActionRequirement,
    threshold: f64,
) -> PermissionDecision {
    let overlap = compute_overlap(identity, requirement);
    let allowed = overlap >= threshold && identity.sovereignty_score >= requirement.min_sovereignty;
    PermissionDecision {
        allowed,
        overlap,
        sovereignty: identity.sovereignty_score,
        failed_categories: failed_categories(identity, requirement),
        requirement: requirement.clone(),
    }
}

/// `checkPermission` with the default `0.8` overlap threshold (§4.3).
pub fn check_permission_default(
    identity: &IdentityVector,
    requirement: &ActionRequirement,
) -> PermissionDecision {
    check_permission(identity, requirement, tdg_core::constants::DEFAULT_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tdg_core::types::collections::FxHashMap;
    use tdg_core::types::requirement::Tier;
    use tdg_core::Category;

    fn identity(scores: &[(Category, f64)], sovereignty: f64) -> IdentityVector {
        let mut map = FxHashMap::default();
        for (c, v) in scores {
            map.insert(*c, *v);
        }
        let mut iv = IdentityVector::new("u1", Utc::now(), map);
        iv.sovereignty_score = sovereignty;
        iv
    }

    // P1 / S1
    #[test]
    fn s1_empty_requirement_always_allows() {
        let iv = identity(
            &Category::all().map(|c| (c, 0.5)),
            0.5,
        );
        let req = ActionRequirement::new("noop", FxHashMap::default(), 0.0, "");
        let decision = check_permission_default(&iv, &req);
        assert!(decision.allowed);
        assert_eq!(decision.overlap, 1.0);
        assert!(decision.failed_categories.is_empty());
    }

    // P2
    #[test]
    fn p2_perfect_identity_allows_anything() {
        let iv = identity(&Category::all().map(|c| (c, 1.0)), 1.0);
        let mut required = FxHashMap::default();
        required.insert(Category::Security, 0.9);
        required.insert(Category::RiskAssessment, 0.9);
        let req = ActionRequirement::new("deploy", required, 0.9, "");
        assert!(check_permission_default(&iv, &req).allowed);
    }

    // P3 / S4
    #[test]
    fn p3_zero_sovereignty_blocks_regardless_of_overlap() {
        let iv = identity(&[(Category::Security, 0.9), (Category::Reliability, 0.9)], 0.0);
        let mut required = FxHashMap::default();
        required.insert(Category::Security, 0.7);
        required.insert(Category::Reliability, 0.5);
        let req = ActionRequirement::new("t", required, 0.5, "");
        let decision = check_permission_default(&iv, &req);
        assert_eq!(decision.overlap, 1.0);
        assert!(!decision.allowed);
        assert_eq!(decision.sovereignty, 0.0);
    }

    // S2
    #[test]
    fn s2_mixed_satisfaction_at_default_threshold_denies() {
        let iv = identity(
            &[(Category::Security, 0.8), (Category::Reliability, 0.4), (Category::DataIntegrity, 0.7)],
            0.7,
        );
        let mut required = FxHashMap::default();
        required.insert(Category::Security, 0.7);
        required.insert(Category::Reliability, 0.5);
        required.insert(Category::DataIntegrity, 0.6);
        let req = ActionRequirement::new("t", required, 0.5, "");
        let decision = check_permission_default(&iv, &req);
        assert!((decision.overlap - 2.0 / 3.0).abs() < 1e-9);
        assert!(!decision.allowed);
        assert_eq!(decision.failed_categories.len(), 1);
        assert_eq!(
            decision.failed_categories[0].to_string(),
            "reliability:0.4<0.5"
        );
    }

    // S3
    #[test]
    fn s3_same_as_s2_with_lower_threshold_allows() {
        let iv = identity(
            &[(Category::Security, 0.8), (Category::Reliability, 0.4), (Category::DataIntegrity, 0.7)],
            0.7,
        );
        let mut required = FxHashMap::default();
        required.insert(Category::Security, 0.7);
        required.insert(Category::Reliability, 0.5);
        required.insert(Category::DataIntegrity, 0.6);
        let req = ActionRequirement::new("t", required, 0.5, "");
        let decision = check_permission(&iv, &req, 0.6);
        assert!(decision.allowed);
    }

    #[test]
    fn tiering_maps_overlap_to_trusted_general_blocked() {
        let iv = identity(&[(Category::Security, 1.0)], 1.0);
        let mut required = FxHashMap::default();
        required.insert(Category::Security, 0.9);
        let req = ActionRequirement::new("t", required, 0.5, "");
        let decision = check_permission_default(&iv, &req);
        assert_eq!(decision.tier(), Tier::Trusted);

        let mid = identity(&[(Category::Security, 0.85), (Category::Reliability, 0.5)], 0.9);
        let mut required2 = FxHashMap::default();
        required2.insert(Category::Security, 0.8);
        required2.insert(Category::Reliability, 0.8);
        let req2 = ActionRequirement::new("t", required2, 0.5, "");
        // overlap = 0.5, below the 0.8 default threshold → blocked.
        let decision2 = check_permission_default(&mid, &req2);
        assert_eq!(decision2.tier(), Tier::Blocked);
    }
}
