//! Step 2 — Categories Balanced (§4.2 step 2).
//!
//! Produces the 20 fixed categories with keyword sets, weights, and a
//! proportional share of `totalTrustDebtUnits`, plus the orthogonality
//! (cross-category keyword-set Jaccard similarity) and balance (Gini
//! coefficient over percentages) quality reports.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tdg_core::constants::{BALANCE_MAX_GINI, ORTHOGONALITY_MAX_AVG_CORRELATION};
use tdg_core::errors::StepError;
use tdg_core::{Category, CATEGORY_COUNT};

use crate::classify::DefaultKeywordClassifier;
use crate::context::RunContext;
use crate::steps::step1_document_processing::{DocumentProcessingArtifact, STEP as STEP1};
use crate::steps::{read_artifact, write_artifact};

pub const STEP: usize = 2;
pub const NAME: &str = "2-categories-balanced";

/// Default total Trust-Debt unit budget distributed across categories by
/// configured weight share (§4.2: "derived from weight/Σweights × totalUnits").
pub const DEFAULT_TOTAL_TRUST_DEBT_UNITS: i64 = 3000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryReport {
    pub id: String,
    pub name: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub weight: f64,
    pub trust_debt_units: i64,
    pub percentage: f64,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrthogonalityReport {
    pub matrix: Vec<Vec<f64>>,
    pub avg_correlation: f64,
    pub max_correlation: f64,
    pub min_correlation: f64,
    pub score: f64,
    pub passed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceReport {
    pub min: f64,
    pub max: f64,
    pub std_deviation: f64,
    pub gini_coefficient: f64,
    pub balanced: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesBalancedArtifact {
    pub categories: Vec<CategoryReport>,
    pub total_trust_debt_units: i64,
    pub orthogonality: OrthogonalityReport,
    pub balance: BalanceReport,
}

fn jaccard(a: &FxHashSet<String>, b: &FxHashSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let intersection = a.intersection(b).count() as f64;
    let union = a.union(b).count() as f64;
    if union == 0.0 {
        0.0
    } else {
        intersection / union
    }
}

fn gini(values: &[f64]) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let sum: f64 = sorted.iter().sum();
    if sum == 0.0 {
        return 0.0;
    }
    let mut weighted = 0.0;
    for (i, v) in sorted.iter().enumerate() {
        weighted += (i as f64 + 1.0) * v;
    }
    (2.0 * weighted) / (n as f64 * sum) - (n as f64 + 1.0) / n as f64
}

pub fn run(ctx: &RunContext) -> Result<(), StepError> {
    let processed: DocumentProcessingArtifact = read_artifact(ctx, STEP1, "1-document-processing")?;
    let keywords: Vec<String> = processed.keyword_frequency.keys().cloned().collect();

    let overrides = ctx.config.categories.as_ref();
    let default_classifier = DefaultKeywordClassifier::with_builtin_defaults();

    let mut keyword_sets: Vec<FxHashSet<String>> = Vec::with_capacity(CATEGORY_COUNT);
    let mut weights: Vec<f64> = Vec::with_capacity(CATEGORY_COUNT);
    let mut category_keywords: Vec<Vec<String>> = Vec::with_capacity(CATEGORY_COUNT);

    for category in Category::all() {
        let configured = overrides.and_then(|o| o.keywords_for(category.flat()));
        let kws: Vec<String> = match configured {
            Some(list) => list.to_vec(),
            None => default_classifier
                .classify(&keywords)
                .into_iter()
                .filter(|a| a.category == category)
                .map(|a| a.keyword)
                .collect(),
        };
        weights.push(
            overrides
                .and_then(|o| o.weight_for(category.flat()))
                .unwrap_or(1.0),
        );
        keyword_sets.push(kws.iter().cloned().collect());
        category_keywords.push(kws);
    }

    let total_weight: f64 = weights.iter().sum();
    let total_units = DEFAULT_TOTAL_TRUST_DEBT_UNITS;

    let mut raw_units: Vec<f64> = weights
        .iter()
        .map(|w| {
            if total_weight > 0.0 {
                w / total_weight * total_units as f64
            } else {
                0.0
            }
        })
        .collect();

    // Round, then reconcile residue onto the top category so the sum is exact (P9).
    let mut rounded: Vec<i64> = raw_units.iter().map(|u| u.round() as i64).collect();
    let rounded_sum: i64 = rounded.iter().sum();
    let residue = total_units - rounded_sum;
    if let Some((top_idx, _)) = raw_units
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
    {
        rounded[top_idx] += residue;
    }
    raw_units.clear(); // no longer needed past reconciliation

    let percentages: Vec<f64> = rounded
        .iter()
        .map(|u| *u as f64 / total_units as f64 * 100.0)
        .collect();

    let palette = [
        "#e74c3c", "#e67e22", "#f1c40f", "#2ecc71", "#1abc9c", "#3498db", "#9b59b6", "#34495e",
        "#16a085", "#27ae60", "#2980b9", "#8e44ad", "#2c3e50", "#c0392b", "#d35400", "#f39c12",
        "#7f8c8d", "#95a5a6", "#bdc3c7", "#ecf0f1",
    ];

    let mut categories = Vec::with_capacity(CATEGORY_COUNT);
    for (i, category) in Category::all().into_iter().enumerate() {
        categories.push(CategoryReport {
            id: category.flat().to_string(),
            name: category.flat().replace('_', " "),
            description: format!("Trust-Debt signals attributed to {}", category.flat()),
            keywords: category_keywords[i].clone(),
            weight: weights[i],
            trust_debt_units: rounded[i],
            percentage: percentages[i],
            color: palette[i % palette.len()].to_string(),
        });
    }

    let n = keyword_sets.len();
    let mut matrix = vec![vec![0.0; n]; n];
    let mut correlations = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        matrix[i][i] = 1.0;
        for j in (i + 1)..n {
            let sim = jaccard(&keyword_sets[i], &keyword_sets[j]);
            matrix[i][j] = sim;
            matrix[j][i] = sim;
            correlations.push(sim);
        }
    }
    let avg_correlation = if correlations.is_empty() {
        0.0
    } else {
        correlations.iter().sum::<f64>() / correlations.len() as f64
    };
    let max_correlation = correlations.iter().cloned().fold(0.0, f64::max);
    let min_correlation = correlations.iter().cloned().fold(1.0, f64::min);

    let orthogonality = OrthogonalityReport {
        matrix,
        avg_correlation,
        max_correlation,
        min_correlation,
        score: 1.0 - avg_correlation,
        passed: avg_correlation < ORTHOGONALITY_MAX_AVG_CORRELATION,
    };

    let min = percentages.iter().cloned().fold(f64::MAX, f64::min);
    let max = percentages.iter().cloned().fold(f64::MIN, f64::max);
    let mean = percentages.iter().sum::<f64>() / n as f64;
    let variance = percentages.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / n as f64;
    let gini_coefficient = gini(&percentages);
    let balance = BalanceReport {
        min,
        max,
        std_deviation: variance.sqrt(),
        gini_coefficient,
        balanced: gini_coefficient < BALANCE_MAX_GINI,
    };

    let artifact = CategoriesBalancedArtifact {
        categories,
        total_trust_debt_units: total_units,
        orthogonality,
        balance,
    };
    write_artifact(ctx, STEP, NAME, &artifact)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gini_of_uniform_distribution_is_zero() {
        let values = vec![5.0; 20];
        assert!(gini(&values).abs() < 1e-9);
    }
}
