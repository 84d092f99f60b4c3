//! The identity vector — the sole output of the analysis pipeline consumed
//! by the permission engine (§3, §4.2 "Identity projection").

use crate::categories::Category;
use crate::types::collections::FxHashMap;
use serde::{Deserialize, Serialize};

/// `{userId, lastUpdated, categoryScores, sovereigntyScore}` — §3.
///
/// Invariant: `sovereignty_score` equals the arithmetic mean of
/// `category_scores` at the moment of construction (`IdentityVector::new`
/// enforces this). It may later be decayed by drift events (§4.3) via
/// `with_sovereignty`, which intentionally breaks the mean-equality
/// invariant — that is the documented post-construction drift path, not a
/// bug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityVector {
    pub user_id: String,
    pub last_updated: chrono::DateTime<chrono::Utc>,
    pub category_scores: FxHashMap<Category, f64>,
    pub sovereignty_score: f64,
}

impl IdentityVector {
    /// Construct an identity vector, computing `sovereignty_score` as the
    /// arithmetic mean of the supplied category scores (P10). Missing
    /// categories are treated as `0` wherever the vector is later read,
    /// but are not synthesized here — `category_scores` may be sparse.
    pub fn new(
        user_id: impl Into<String>,
        last_updated: chrono::DateTime<chrono::Utc>,
        category_scores: FxHashMap<Category, f64>,
    ) -> Self {
        let sovereignty_score = mean_of_categories(&category_scores);
        Self {
            user_id: user_id.into(),
            last_updated,
            category_scores,
            sovereignty_score,
        }
    }

    /// Score for a category, `0` if missing (§3 "Missing categories are
    /// treated as 0").
    pub fn score(&self, category: Category) -> f64 {
        self.category_scores.get(&category).copied().unwrap_or(0.0)
    }

    /// Returns a copy with `sovereignty_score` replaced — used by the
    /// drift model (§4.3) to apply post-construction decay without
    /// recomputing the mean.
    pub fn with_sovereignty(&self, sovereignty_score: f64) -> Self {
        Self {
            sovereignty_score,
            ..self.clone()
        }
    }
}

/// Arithmetic mean over the full 20-category space: categories absent from
/// `scores` are treated as `0` in the mean, matching the pipeline's
/// "missing categories are treated as 0" rule consistently between score
/// lookup and sovereignty computation.
fn mean_of_categories(scores: &FxHashMap<Category, f64>) -> f64 {
    let sum: f64 = Category::all()
        .into_iter()
        .map(|c| scores.get(&c).copied().unwrap_or(0.0))
        .sum();
    (sum / crate::categories::CATEGORY_COUNT as f64).clamp(0.0, 1.0)
}

/// `unitsToScore(u) = clip(1 - u/MAX, 0, 1)`, `MAX` = top of grade C (§4.2
/// "Identity projection").
pub fn units_to_score(units: f64) -> f64 {
    (1.0 - units / crate::categories::MAX_TRUST_DEBT_UNITS).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    // P10
    #[test]
    fn sovereignty_equals_mean_at_construction() {
        let mut scores = FxHashMap::default();
        scores.insert(Category::Security, 0.8);
        scores.insert(Category::Testing, 0.4);
        let iv = IdentityVector::new("u1", Utc::now(), scores);
        let expected: f64 = (0.8 + 0.4) / crate::categories::CATEGORY_COUNT as f64;
        assert!((iv.sovereignty_score - expected).abs() < 1e-9);
    }

    #[test]
    fn missing_category_reads_as_zero() {
        let iv = IdentityVector::new("u1", Utc::now(), FxHashMap::default());
        assert_eq!(iv.score(Category::Security), 0.0);
        assert_eq!(iv.sovereignty_score, 0.0);
    }

    #[test]
    fn units_to_score_boundaries() {
        assert_eq!(units_to_score(0.0), 1.0);
        assert_eq!(units_to_score(3000.0), 0.0);
        assert_eq!(units_to_score(6000.0), 0.0);
        assert!((units_to_score(1500.0) - 0.5).abs() < 1e-9);
    }
}
