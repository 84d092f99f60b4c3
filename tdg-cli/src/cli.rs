//! CLI surface (§6): `run-pipeline [--from N] [--to M]`, `pipeline-status`,
//! `identity-show`. Minimal by design — the core exposes the pipeline and
//! permission engine; this binary only wires `clap` onto them.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tdg")]
#[command(author, version, about = "IntentGuard trust-debt engine CLI", long_about = None)]
pub struct Cli {
    /// Path to a TOML or JSON configuration file. Falls back to built-in
    /// defaults (§6 "Configuration") when omitted.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (equivalent to `RUST_LOG=debug`).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run pipeline steps `from..=to` against a fresh run directory.
    RunPipeline {
        #[arg(long)]
        from: Option<usize>,
        #[arg(long)]
        to: Option<usize>,
    },

    /// Print the most recent pipeline run's per-step summary.
    PipelineStatus,

    /// Print the current identity vector, decoded from the most recent
    /// successful step-4 run.
    IdentityShow,
}
