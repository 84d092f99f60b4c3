//! Step 6 — Analysis & Narratives (§4.2 step 6).
//!
//! Stratifies cold spots, detects asymmetric patterns (diagonal failures,
//! adjacency clusters, concentration risk), and produces the narrative
//! summary plus a legitimacy score.

use serde::{Deserialize, Serialize};
use tdg_core::constants::{
    ADJACENCY_CLUSTER_MIN, ARCTIC_THRESHOLD, COLD_SPOT_THRESHOLD, CONCENTRATION_RISK_FRACTION,
    COOL_THRESHOLD, FROZEN_THRESHOLD,
};
use tdg_core::errors::StepError;
use tdg_core::Category;

use crate::context::RunContext;
use crate::steps::step2_categories_balanced::{CategoriesBalancedArtifact, STEP as STEP2};
use crate::steps::step3_shortlex_validation::{ShortlexValidationArtifact, STEP as STEP3};
use crate::steps::step4_grades_statistics::{GradesStatisticsArtifact, STEP as STEP4};
use crate::steps::step5_goal_alignment::{GoalAlignmentArtifact, STEP as STEP5};
use crate::steps::{read_artifact, write_artifact};

pub const STEP: usize = 6;
pub const NAME: &str = "6-analysis-narratives";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColdSpotSeverity {
    Frozen,
    Arctic,
    Cold,
    Cool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColdSpot {
    pub category: String,
    pub score: f64,
    pub severity: ColdSpotSeverity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum AsymmetricPattern {
    DiagonalFailure { category: String, delta: f64 },
    AdjacencyCluster { categories: Vec<String>, size: usize },
    ConcentrationRisk { category: String, fraction: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisNarrativesArtifact {
    pub executive_summary: String,
    pub cold_spots: Vec<ColdSpot>,
    pub asymmetric_patterns: Vec<AsymmetricPattern>,
    pub narratives: Vec<String>,
    pub recommendations: Vec<String>,
    pub legitimacy_score: f64,
}

fn severity_of(score: f64) -> Option<ColdSpotSeverity> {
    if score >= COLD_SPOT_THRESHOLD {
        None
    } else if score < FROZEN_THRESHOLD {
        Some(ColdSpotSeverity::Frozen)
    } else if score < ARCTIC_THRESHOLD {
        Some(ColdSpotSeverity::Arctic)
    } else if score < COOL_THRESHOLD {
        Some(ColdSpotSeverity::Cold)
    } else {
        Some(ColdSpotSeverity::Cool)
    }
}

pub fn run(ctx: &RunContext) -> Result<(), StepError> {
    let grades: GradesStatisticsArtifact = read_artifact(ctx, STEP4, "4-grades-statistics")?;
    let alignment: Option<GoalAlignmentArtifact> = read_artifact(ctx, STEP5, "5-goal-alignment").ok();
    let categories_balanced: Option<CategoriesBalancedArtifact> =
        read_artifact(ctx, STEP2, "2-categories-balanced").ok();
    let matrix: Option<ShortlexValidationArtifact> =
        read_artifact(ctx, STEP3, "3-shortlex-validation").ok();

    let alignment_by_category: std::collections::HashMap<String, f64> = alignment
        .as_ref()
        .map(|a| a.goals.iter().map(|g| (g.category.clone(), g.alignment)).collect())
        .unwrap_or_default();

    let mut cold_spots = Vec::new();
    let mut combined_scores: Vec<(Category, f64)> = Vec::with_capacity(20);
    for category in Category::all() {
        let grade_score = grades.identity.score(category);
        let goal_score = alignment_by_category
            .get(category.flat())
            .copied()
            .unwrap_or(grade_score);
        let combined = (grade_score + goal_score) / 2.0;
        combined_scores.push((category, combined));
        if let Some(severity) = severity_of(combined) {
            cold_spots.push(ColdSpot {
                category: category.flat().to_string(),
                score: combined,
                severity,
            });
        }
    }

    let mut patterns = Vec::new();

    if let Some(m) = &matrix {
        for cell in m.cells.iter().filter(|c| c.is_diagonal) {
            if cell.trust_debt_units > COOL_THRESHOLD {
                patterns.push(AsymmetricPattern::DiagonalFailure {
                    category: cell.row.clone(),
                    delta: cell.trust_debt_units,
                });
            }
        }
    }

    // Adjacency clusters: runs of >= ADJACENCY_CLUSTER_MIN consecutive
    // categories (in canonical order) that are all cold spots.
    let cold_flat: std::collections::HashSet<&str> =
        cold_spots.iter().map(|c| c.category.as_str()).collect();
    let canonical: Vec<Category> = Category::all().to_vec();
    let mut run_start: Option<usize> = None;
    for (i, category) in canonical.iter().enumerate() {
        let is_cold = cold_flat.contains(category.flat());
        match (is_cold, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                flush_run(&canonical, start, i, &mut patterns);
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        flush_run(&canonical, start, canonical.len(), &mut patterns);
    }

    if let Some(cb) = &categories_balanced {
        let total: i64 = cb.total_trust_debt_units.max(1);
        for report in &cb.categories {
            let fraction = report.trust_debt_units as f64 / total as f64;
            if fraction > CONCENTRATION_RISK_FRACTION {
                patterns.push(AsymmetricPattern::ConcentrationRisk {
                    category: report.id.clone(),
                    fraction,
                });
            }
        }
    }

    let orthogonality_score = categories_balanced
        .as_ref()
        .map(|cb| cb.orthogonality.score)
        .unwrap_or(1.0);
    let outcome_reality = alignment
        .as_ref()
        .map(|a| a.overall_alignment)
        .unwrap_or(1.0);
    let legitimacy_score = grades.process_health * outcome_reality * orthogonality_score * 100.0;

    let executive_summary = format!(
        "{} cold spot(s), {} asymmetric pattern(s), legitimacy {:.1}/100",
        cold_spots.len(),
        patterns.len(),
        legitimacy_score
    );

    let mut narratives = Vec::new();
    for spot in &cold_spots {
        narratives.push(format!(
            "{} is a {:?} cold spot at score {:.2}",
            spot.category, spot.severity, spot.score
        ));
    }

    let mut recommendations = Vec::new();
    for (category, score) in &combined_scores {
        if *score < COLD_SPOT_THRESHOLD {
            recommendations.push(format!("Prioritize remediation in {}", category.flat()));
        }
    }

    let artifact = AnalysisNarrativesArtifact {
        executive_summary,
        cold_spots,
        asymmetric_patterns: patterns,
        narratives,
        recommendations,
        legitimacy_score,
    };
    write_artifact(ctx, STEP, NAME, &artifact)
}

fn flush_run(
    canonical: &[Category],
    start: usize,
    end: usize,
    patterns: &mut Vec<AsymmetricPattern>,
) {
    if end - start >= ADJACENCY_CLUSTER_MIN {
        patterns.push(AsymmetricPattern::AdjacencyCluster {
            categories: canonical[start..end].iter().map(|c| c.flat().to_string()).collect(),
            size: end - start,
        });
    }
}
