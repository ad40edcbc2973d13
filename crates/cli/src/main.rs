//! `assign-security-policy` entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Resolve configuration** — load `.env` from the working directory only
//!    (process environment wins), parse flags/environment, and validate everything into an
//!    [`policy::AssignerConfig`] before any network call.
//! 2. **Wire observability** — stderr `tracing` layer (text or JSON) plus an
//!    optional OTLP exporter.
//! 3. **Construct infrastructure** — a [`gitlab::GitLabClient`] and a
//!    [`assigner::ConsoleReporter`], injected into
//!    [`assigner::PolicyAssignment`].
//! 4. **Run and map the result to an exit status** — 1 only for a
//!    configuration or startup error. Once the workflow runs, the console
//!    carries the outcome and the status is 0, including after a failed
//!    group listing.

mod args;
mod observability;

use std::process::ExitCode;
use std::sync::Arc;

use assigner::{ConsoleReporter, PolicyAssignment};
use clap::Parser;
use gitlab::GitLabClient;
use policy::{AssignerConfig, RunId};
use tracing::info;

use crate::args::Args;
use crate::observability::Observability;

/// Relative to the working directory; parent directories are not searched.
const DOTENV_FILE: &str = ".env";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    if let Err(err) = dotenvy::from_path(DOTENV_FILE) {
        if !err.not_found() {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    let args = Args::parse();

    let config = match AssignerConfig::from_raw(args.raw_config()) {
        Ok(config) => Arc::new(config),
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let observability = match Observability::init(args.log_format) {
        Ok(o) => o,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    let status = run(config).await;
    observability.shutdown().await;
    status
}

async fn run(config: Arc<AssignerConfig>) -> ExitCode {
    let client = match GitLabClient::new(&config) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let run_id = RunId::new_random();
    info!(
        %run_id,
        endpoint = client.endpoint(),
        policy_project = %config.policy_project_id(),
        concurrency = config.concurrency(),
        "starting policy assignment"
    );

    let workflow = PolicyAssignment::new(Arc::new(client), config, Arc::new(ConsoleReporter));
    // A listing failure is already on stderr; it does not change the status.
    if let Err(err) = workflow.run(run_id).await {
        info!(error = %err, "run ended without assignments");
    }
    ExitCode::SUCCESS
}
