//! Step 4 — Grades & Statistics / Identity Materialization (§4.2 step 4).
//!
//! For each category, sums matrix trust-debt units (falling back to a
//! frequency-based estimate when matrix data is absent), applies the
//! sophistication discount and process-health divisor, maps the result to
//! a letter grade, and projects the 20 scores plus sovereignty into the
//! `IdentityVector` that is the pipeline's sole output to the permission
//! engine.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tdg_core::errors::{StepError, ValidationError};
use tdg_core::types::identity::{units_to_score, IdentityVector};
use tdg_core::types::units::{CategoryTrustDebt, Trend};
use tdg_core::{Category, FxHashMap};

use crate::context::RunContext;
use crate::steps::step2_categories_balanced::{CategoriesBalancedArtifact, STEP as STEP2};
use crate::steps::step3_shortlex_validation::{ShortlexValidationArtifact, STEP as STEP3};
use crate::steps::{read_artifact, write_artifact};

pub const STEP: usize = 4;
pub const NAME: &str = "4-grades-statistics";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradesStatisticsArtifact {
    pub categories: Vec<CategoryTrustDebt>,
    pub identity: IdentityVector,
    pub integration_score: f64,
    pub process_health: f64,
    pub sophistication_discount: f64,
    pub validation: Vec<ValidationError>,
}

fn estimate_from_strength(strength: f64, max_strength: f64) -> f64 {
    if max_strength <= 0.0 {
        return 0.0;
    }
    (1.0 - strength / max_strength).clamp(0.0, 1.0) * 1000.0
}

pub fn run(ctx: &RunContext) -> Result<(), StepError> {
    let mut validation = Vec::new();

    let categories_balanced: Option<CategoriesBalancedArtifact> =
        read_artifact(ctx, STEP2, "2-categories-balanced").ok();
    if categories_balanced.is_none() {
        validation.push(ValidationError::warning(
            STEP,
            "categories",
            "step 2 artifact missing; units fall back to a flat estimate",
        ));
    }
    let matrix: Option<ShortlexValidationArtifact> =
        read_artifact(ctx, STEP3, "3-shortlex-validation").ok();
    if matrix.is_none() {
        validation.push(ValidationError::warning(
            STEP,
            "matrix",
            "step 3 artifact missing; falling back to frequency estimation",
        ));
    }

    let sophistication_discount = ctx.config.fim.effective_sophistication_discount();
    let process_health = categories_balanced
        .as_ref()
        .map(|cb| {
            ((cb.orthogonality.score + (1.0 - cb.balance.gini_coefficient)) / 2.0).clamp(0.01, 1.0)
        })
        .unwrap_or(tdg_core::constants::DEFAULT_PROCESS_HEALTH);

    let max_strength = matrix
        .as_ref()
        .map(|m| {
            m.cells
                .iter()
                .map(|c| c.intent.max(c.reality))
                .fold(0.0_f64, f64::max)
        })
        .unwrap_or(0.0);

    let mut category_reports = Vec::new();
    let mut category_scores: FxHashMap<Category, f64> = FxHashMap::default();

    for category in Category::all() {
        let label = category.shortlex();
        let raw_units = if let Some(m) = &matrix {
            let row_sum: f64 = m
                .cells
                .iter()
                .filter(|c| c.row == label)
                .map(|c| c.trust_debt_units)
                .sum();
            if row_sum > 0.0 {
                row_sum
            } else {
                let strength = m
                    .cells
                    .iter()
                    .filter(|c| c.row == label)
                    .map(|c| c.reality.max(c.intent))
                    .fold(0.0_f64, f64::max);
                estimate_from_strength(strength, max_strength)
            }
        } else {
            0.0
        };

        let adjusted = raw_units * (1.0 - sophistication_discount) / process_health.max(0.01);
        let units = adjusted.round() as i64;
        let score = units_to_score(adjusted);
        category_scores.insert(category, score);

        category_reports.push(CategoryTrustDebt::from_units(
            category,
            units,
            0.0,
            Trend::Stable,
            Vec::new(),
        ));
    }

    // Percentile: rank within this run's own category set, worst (highest
    // units) at percentile 0, best at 100.
    let mut order: Vec<usize> = (0..category_reports.len()).collect();
    order.sort_by_key(|&i| category_reports[i].trust_debt_units);
    let n = category_reports.len().max(1);
    for (rank, idx) in order.into_iter().enumerate() {
        category_reports[idx].percentile = rank as f64 / (n - 1).max(1) as f64 * 100.0;
    }

    let identity = IdentityVector::new("default", Utc::now(), category_scores);

    let prior_steps_present = [STEP2, STEP3]
        .iter()
        .filter(|&&s| ctx.layout.step_artifact(s).exists())
        .count();
    let integration_score = prior_steps_present as f64 / 2.0 * 100.0;

    let artifact = GradesStatisticsArtifact {
        categories: category_reports,
        identity: identity.clone(),
        integration_score,
        process_health,
        sophistication_discount,
        validation,
    };
    write_artifact(ctx, STEP, NAME, &artifact)?;

    tdg_core::workspace::atomic_write_json(&ctx.layout.identity_pointer(), &identity).map_err(
        |e| StepError::Failed {
            step: STEP,
            name: NAME,
            message: e.to_string(),
        },
    )?;

    Ok(())
}
