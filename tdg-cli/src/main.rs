//! `tdg` — thin binary wiring the trust-debt engine onto `clap`
//! subcommands (§6 "CLI surface"). Exit codes: `0` success, `1` fatal
//! config error, `2` one-or-more step failures (results still written).

mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tdg_core::config::TrustDebtConfig;
use tdg_core::types::run::RunLayout;
use tdg_pipeline::pipeline::{load_identity_from_pipeline, run_pipeline, PipelineResult};
use tdg_pipeline::providers::FilesystemCorpusProvider;

use cli::{Cli, Commands};

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(path: Option<&std::path::Path>) -> Result<TrustDebtConfig, String> {
    match path {
        Some(p) => TrustDebtConfig::load_from_path(p).map_err(|e| e.to_string()),
        None => Ok(TrustDebtConfig::default()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(message) => {
            eprintln!("fatal config error: {message}");
            return ExitCode::from(1);
        }
    };

    match cli.command {
        Commands::RunPipeline { from, to } => run_pipeline_command(config, from, to),
        Commands::PipelineStatus => pipeline_status_command(config),
        Commands::IdentityShow => identity_show_command(config),
    }
}

fn run_pipeline_command(config: TrustDebtConfig, from: Option<usize>, to: Option<usize>) -> ExitCode {
    let repo_root = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let corpus = Arc::new(FilesystemCorpusProvider::new(repo_root));

    match run_pipeline(config, corpus, from, to) {
        Ok(result) => {
            print_pipeline_result(&result);
            ExitCode::from(result.exit_code)
        }
        Err(e) => {
            eprintln!("fatal config error: {e}");
            ExitCode::from(1)
        }
    }
}

fn print_pipeline_result(result: &PipelineResult) {
    match serde_json::to_string_pretty(result) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("failed to render pipeline result as JSON: {e}"),
    }
}

fn pipeline_status_command(config: TrustDebtConfig) -> ExitCode {
    let data_dir = config.effective_data_dir();
    let runs_dir = data_dir.join("pipeline-runs");
    let latest_run_id = match latest_run_id(&runs_dir) {
        Some(id) => id,
        None => {
            eprintln!("no pipeline runs found under {}", runs_dir.display());
            return ExitCode::from(1);
        }
    };

    let layout = RunLayout::new(&data_dir, &latest_run_id);
    match std::fs::read_to_string(layout.summary()) {
        Ok(text) => {
            println!("{text}");
            ExitCode::from(0)
        }
        Err(e) => {
            eprintln!("failed to read pipeline summary for run {latest_run_id}: {e}");
            ExitCode::from(1)
        }
    }
}

fn identity_show_command(config: TrustDebtConfig) -> ExitCode {
    let data_dir = config.effective_data_dir();
    // `identity_pointer()` only depends on `data_dir`; the run id is unused
    // for this lookup.
    let layout = RunLayout::new(&data_dir, "identity-show");
    match load_identity_from_pipeline(&layout) {
        Ok(identity) => {
            match serde_json::to_string_pretty(&identity) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("failed to render identity vector as JSON: {e}");
                    return ExitCode::from(1);
                }
            }
            ExitCode::from(0)
        }
        Err(e) => {
            eprintln!("no identity vector available: {e}");
            ExitCode::from(1)
        }
    }
}

/// Lexicographically-greatest run id under `runs_dir` — valid because
/// `run_id_for` produces `YYYYMMDDTHHMMSSZ` stems, which sort the same way
/// chronologically and lexically.
fn latest_run_id(runs_dir: &std::path::Path) -> Option<String> {
    let entries = std::fs::read_dir(runs_dir).ok()?;
    entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .filter_map(|e| e.file_name().into_string().ok())
        .max()
}
