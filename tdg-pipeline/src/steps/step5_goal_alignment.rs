//! Step 5 — Goal Alignment (§4.2 step 5).
//!
//! For each declared goal (SPEC_FULL's `TrustDebtConfig::goals` extension),
//! scores how well the identity's category value aligns with the goal's
//! target, emits a gap and a recommendation, and rolls up an overall
//! alignment score.

use serde::{Deserialize, Serialize};
use tdg_core::errors::StepError;
use tdg_core::Category;

use crate::context::RunContext;
use crate::steps::step4_grades_statistics::{GradesStatisticsArtifact, STEP as STEP4};
use crate::steps::{read_artifact, write_artifact};

pub const STEP: usize = 5;
pub const NAME: &str = "5-goal-alignment";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalAlignment {
    pub name: String,
    pub category: String,
    pub target_score: f64,
    pub actual_score: f64,
    pub gap: f64,
    pub alignment: f64,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalAlignmentArtifact {
    pub goals: Vec<GoalAlignment>,
    pub overall_alignment: f64,
}

pub fn run(ctx: &RunContext) -> Result<(), StepError> {
    let grades: GradesStatisticsArtifact = read_artifact(ctx, STEP4, "4-grades-statistics")?;

    let goals = ctx.config.goals.clone().unwrap_or_else(|| {
        // No goals declared: synthesize one per category targeting the
        // default 0.8 score so the report is never empty.
        Category::all()
            .iter()
            .map(|c| tdg_core::config::GoalConfig {
                name: format!("improve {}", c.flat()),
                category: c.flat().to_string(),
                target_score: 0.8,
            })
            .collect()
    });

    let mut results = Vec::with_capacity(goals.len());
    for goal in &goals {
        let Some(category) = Category::from_flat(&goal.category) else {
            continue;
        };
        let actual = grades.identity.score(category);
        let gap = (goal.target_score - actual).max(0.0);
        let alignment = if goal.target_score > 0.0 {
            (actual / goal.target_score).min(1.0)
        } else {
            1.0
        };
        let recommendation = if gap > 0.0 {
            format!(
                "Raise {} by {:.2} to reach the goal '{}'",
                category.flat(),
                gap,
                goal.name
            )
        } else {
            format!("'{}' already met", goal.name)
        };
        results.push(GoalAlignment {
            name: goal.name.clone(),
            category: goal.category.clone(),
            target_score: goal.target_score,
            actual_score: actual,
            gap,
            alignment,
            recommendation,
        });
    }

    let overall_alignment = if results.is_empty() {
        1.0
    } else {
        results.iter().map(|g| g.alignment).sum::<f64>() / results.len() as f64
    };

    let artifact = GoalAlignmentArtifact {
        goals: results,
        overall_alignment,
    };
    write_artifact(ctx, STEP, NAME, &artifact)
}
