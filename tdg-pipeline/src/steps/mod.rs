//! The eight pipeline steps (§4.2). Each submodule exposes a single
//! `run(ctx) -> Result<(), StepError>` that reads whatever prior artifacts
//! it needs from disk and atomically writes its own.

pub mod step0_raw_materials;
pub mod step1_document_processing;
pub mod step2_categories_balanced;
pub mod step3_shortlex_validation;
pub mod step4_grades_statistics;
pub mod step5_goal_alignment;
pub mod step6_analysis_narratives;
pub mod step7_final_report;

use serde::{Deserialize, Serialize};
use tdg_core::errors::StepError;

use crate::context::RunContext;

/// Reads and deserializes a prior step's JSON artifact. A missing or
/// malformed prerequisite is reported as `StepError::MissingPrerequisite`,
/// never panics (§9 "every such call must be wrapped ... with a
/// `Result`-style return").
pub fn read_artifact<T: for<'de> Deserialize<'de>>(
    ctx: &RunContext,
    step: usize,
    name: &'static str,
) -> Result<T, StepError> {
    let path = ctx.layout.step_artifact(step);
    let text = std::fs::read_to_string(&path).map_err(|e| StepError::MissingPrerequisite {
        step,
        name,
        message: format!("{}: {e}", path.display()),
    })?;
    serde_json::from_str(&text).map_err(|e| StepError::MissingPrerequisite {
        step,
        name,
        message: format!("{}: {e}", path.display()),
    })
}

/// Writes `artifact` to step `n`'s canonical location, write-then-rename.
pub fn write_artifact<T: Serialize>(
    ctx: &RunContext,
    step: usize,
    name: &'static str,
    artifact: &T,
) -> Result<(), StepError> {
    let path = ctx.layout.step_artifact(step);
    tdg_core::workspace::atomic_write_json(&path, artifact).map_err(|e| StepError::Failed {
        step,
        name,
        message: e.to_string(),
    })
}
