//! `computeOverlap` — the geometric core of the permission engine (§4.3).
//!
//! Overlap is a fraction of satisfied categories, never a weighted sum:
//! every required dimension must be independently met for an action to
//! "fit" the identity.

use tdg_core::types::identity::IdentityVector;
use tdg_core::types::requirement::{ActionRequirement, FailedCategory};

/// `overlap(I, R) = |{k in K : I.c[k] >= R.c[k]}| / |K|` if `|K| > 0`,
/// else `1` (P1, P4). Missing `I.c[k]` reads as `0` (§3).
pub fn compute_overlap(identity: &IdentityVector, requirement: &ActionRequirement) -> f64 {
    let required = &requirement.required_scores;
    if required.is_empty() {
        return 1.0;
    }
    let satisfied = required
        .iter()
        .filter(|(category, &threshold)| identity.score(**category) >= threshold)
        .count();
    satisfied as f64 / required.len() as f64
}

/// Categories whose identity score falls short of the requirement's
/// threshold, in canonical category order, rendered per §8 S2's literal
/// `"{category}:{actual}<{required}"` shape.
pub fn failed_categories(
    identity: &IdentityVector,
    requirement: &ActionRequirement,
) -> Vec<FailedCategory> {
    tdg_core::Category::all()
        .into_iter()
        .filter_map(|category| {
            requirement.required_scores.get(&category).and_then(|&required| {
                let actual = identity.score(category);
                (actual < required).then_some(FailedCategory {
                    category,
                    actual,
                    required,
                })
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tdg_core::Category;
    use tdg_core::types::collections::FxHashMap;

    fn identity(scores: &[(Category, f64)], sovereignty: f64) -> IdentityVector {
        let mut map = FxHashMap::default();
        for (c, v) in scores {
            map.insert(*c, *v);
        }
        let mut iv = IdentityVector::new("u1", Utc::now(), map);
        iv.sovereignty_score = sovereignty;
        iv
    }

    // P1
    #[test]
    fn empty_requirement_overlap_is_one() {
        let iv = identity(&[], 0.5);
        let req = ActionRequirement::unconditional("noop");
        assert_eq!(compute_overlap(&iv, &req), 1.0);
    }

    // P4
    #[test]
    fn overlap_is_exact_fraction() {
        let iv = identity(
            &[(Category::Security, 0.8), (Category::Reliability, 0.4), (Category::DataIntegrity, 0.7)],
            0.7,
        );
        let mut required = FxHashMap::default();
        required.insert(Category::Security, 0.7);
        required.insert(Category::Reliability, 0.5);
        required.insert(Category::DataIntegrity, 0.6);
        let req = ActionRequirement::new("deploy", required, 0.5, "");
        let overlap = compute_overlap(&iv, &req);
        assert!((overlap - 2.0 / 3.0).abs() < 1e-9, "got {overlap}");
    }

    // P5 monotonicity (raising identity score cannot decrease overlap)
    #[test]
    fn raising_identity_score_never_decreases_overlap() {
        let mut required = FxHashMap::default();
        required.insert(Category::Security, 0.7);
        let req = ActionRequirement::new("t", required, 0.0, "");

        let low = identity(&[(Category::Security, 0.5)], 0.5);
        let high = identity(&[(Category::Security, 0.9)], 0.5);
        assert!(compute_overlap(&high, &req) >= compute_overlap(&low, &req));
    }

    // P5 monotonicity (lowering requirement threshold cannot decrease overlap)
    #[test]
    fn lowering_requirement_never_decreases_overlap() {
        let iv = identity(&[(Category::Security, 0.5)], 0.5);
        let mut strict = FxHashMap::default();
        strict.insert(Category::Security, 0.9);
        let mut lenient = FxHashMap::default();
        lenient.insert(Category::Security, 0.1);

        let strict_req = ActionRequirement::new("t", strict, 0.0, "");
        let lenient_req = ActionRequirement::new("t", lenient, 0.0, "");
        assert!(compute_overlap(&iv, &lenient_req) >= compute_overlap(&iv, &strict_req));
    }

    #[test]
    fn missing_category_reads_as_zero() {
        let iv = identity(&[], 0.5);
        let mut required = FxHashMap::default();
        required.insert(Category::Security, 0.5);
        let req = ActionRequirement::new("t", required, 0.0, "");
        assert_eq!(compute_overlap(&iv, &req), 0.0);
    }
}
