//! Liver Risk
//!
//! One-shot inference: reads a patient payload from stdin, prints
//! `{"success": true, "probability": .., "riskLevel": ..}` or
//! `{"success": false, "error": ..}` to stdout.

use anyhow::{Context, Result};
use clap::Parser;
use liver_risk_cli::{app, AdapterConfig, Cli};
use liver_risk_model::ModelHandle;
use std::io;
use std::process::ExitCode;
use tracing::debug;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = AdapterConfig::load(&cli);

    // Initialize tracing
    let log_filter = config.as_ref().ok().and_then(|c| c.log_filter.as_deref());
    init_tracing(cli.verbose, log_filter);

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();

    let outcome = match config {
        Ok(config) => {
            let model_path = config.model_path();
            debug!(model_path = %model_path.display(), "Configuration loaded");
            let handle = ModelHandle::new(model_path);
            app::run(stdin, stdout, &handle)
        }
        Err(err) => app::report(stdout, &err),
    }
    .context("failed to write result to stdout")?;

    Ok(outcome.exit_code())
}

/// Initialize tracing/logging on stderr; stdout carries only the result
fn init_tracing(verbose: bool, configured: Option<&str>) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("liver_risk=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(configured.unwrap_or("liver_risk=warn")))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
