//! Hubnote CLI entrypoint.

mod cli;

use std::io::{self, Write};
use std::process::ExitCode;

use hubnote::config::{HubnoteConfig, OperationMode};
use hubnote::error::ExportError;
use ortho_config::OrthoConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run() -> Result<(), ExportError> {
    let config = load_config()?;
    match config.operation_mode() {
        OperationMode::ExportIssues => cli::export_issues::run(&config).await,
        OperationMode::ExportIssue => cli::export_issue::run(&config).await,
        OperationMode::ExportPullRequest => cli::export_pull_request::run(&config).await,
        OperationMode::ExportPullRequests => cli::export_pull_requests::run(&config).await,
        OperationMode::PrintDiff => cli::print_diff::run(&config).await,
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ExportError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<HubnoteConfig, ExportError> {
    HubnoteConfig::load().map_err(|error| ExportError::Configuration {
        message: error.to_string(),
    })
}
