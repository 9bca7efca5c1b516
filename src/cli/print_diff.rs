//! Diff printing without export.

use hubnote::config::HubnoteConfig;
use hubnote::error::ExportError;
use hubnote::export::diff_chunk;
use hubnote::github::SourceGateway;

use super::output::write_line;

/// Prints the fenced diff chunk for one pull request to stdout.
pub async fn run(config: &HubnoteConfig) -> Result<(), ExportError> {
    let number = config.require_pull_request_number()?;
    let (locator, source) = super::source_parts(config)?;

    let diff = source.pull_request_diff(&locator, number).await?;
    write_line(&diff_chunk(&diff))
}
