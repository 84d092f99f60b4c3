//! Pipeline orchestration: `runPipeline` / `runStep` / `loadIdentityFromPipeline`
//! (§6 "Exposed API"). Steps are soft-failed (§4.2 "Failure semantics");
//! only run-directory creation is fatal.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tdg_core::config::TrustDebtConfig;
use tdg_core::errors::StepError;
use tdg_core::types::identity::IdentityVector;
use tdg_core::types::run::{run_id_for, RunLayout};
use tdg_core::workspace::create_run_dir;

use crate::classify::{DefaultKeywordClassifier, KeywordClassifier};
use crate::context::RunContext;
use crate::providers::CorpusProvider;
use crate::registry::STEPS;

/// Per-step outcome recorded in `pipeline-summary.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    pub step: usize,
    pub name: &'static str,
    pub ok: bool,
    pub error: Option<String>,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    pub run_id: String,
    pub steps: Vec<StepResult>,
    /// Exit-code semantics per §6: `0` clean, `2` one-or-more step failures.
    pub exit_code: u8,
}

/// Runs steps `from..=to` (inclusive), in order, against a freshly created
/// run directory under `config.effective_data_dir()`.
pub fn run_pipeline(
    config: TrustDebtConfig,
    corpus: Arc<dyn CorpusProvider>,
    from: Option<usize>,
    to: Option<usize>,
) -> Result<PipelineResult, StepError> {
    let data_dir = config.effective_data_dir();
    let run_id = run_id_for(Utc::now());
    let layout = RunLayout::new(&data_dir, &run_id);
    create_run_dir(&layout)?;

    let classifier: Arc<dyn KeywordClassifier> = Arc::new(DefaultKeywordClassifier::with_builtin_defaults());
    let ctx = RunContext::new(layout.clone(), config, corpus, classifier);

    let from = from.unwrap_or(0).min(7);
    let to = to.unwrap_or(7).min(7);

    let mut results = Vec::new();
    let mut any_failed = false;
    for descriptor in STEPS.iter().filter(|d| d.number >= from && d.number <= to) {
        let result = run_step_inner(&ctx, descriptor.number, descriptor.name, descriptor.run);
        any_failed |= !result.ok;
        results.push(result);
    }

    let pipeline_result = PipelineResult {
        run_id: run_id.clone(),
        steps: results,
        exit_code: if any_failed { 2 } else { 0 },
    };
    tdg_core::workspace::atomic_write_json(&layout.summary(), &pipeline_result).map_err(|e| {
        StepError::Failed {
            step: 7,
            name: "pipeline-summary",
            message: e.to_string(),
        }
    })?;
    Ok(pipeline_result)
}

/// Runs a single step against an already-materialized run directory.
pub fn run_step(ctx: &RunContext, step_num: usize) -> StepResult {
    let descriptor = STEPS.iter().find(|d| d.number == step_num);
    match descriptor {
        Some(d) => run_step_inner(ctx, d.number, d.name, d.run),
        None => StepResult {
            step: step_num,
            name: "unknown",
            ok: false,
            error: Some(format!("no step registered for number {step_num}")),
            duration_ms: 0,
        },
    }
}

fn run_step_inner(
    ctx: &RunContext,
    step: usize,
    name: &'static str,
    run: fn(&RunContext) -> Result<(), StepError>,
) -> StepResult {
    let started = std::time::Instant::now();
    tracing::info!(step, name, "running pipeline step");
    let outcome = run(ctx);
    let duration_ms = started.elapsed().as_millis() as u64;
    match outcome {
        Ok(()) => StepResult {
            step,
            name,
            ok: true,
            error: None,
            duration_ms,
        },
        Err(e) => {
            tracing::warn!(step, name, error = %e, "pipeline step failed, continuing");
            StepResult {
                step,
                name,
                ok: false,
                error: Some(e.to_string()),
                duration_ms,
            }
        }
    }
}

/// `loadIdentityFromPipeline(runDir)` — reads step 4's materialized
/// identity vector from a run directory already on disk.
pub fn load_identity_from_pipeline(layout: &RunLayout) -> Result<IdentityVector, StepError> {
    let text = std::fs::read_to_string(layout.identity_pointer()).map_err(|e| {
        StepError::MissingPrerequisite {
            step: 4,
            name: "identity-vector",
            message: e.to_string(),
        }
    })?;
    serde_json::from_str(&text).map_err(|e| StepError::MissingPrerequisite {
        step: 4,
        name: "identity-vector",
        message: e.to_string(),
    })
}
