//! Batch export of the most recent issues.

use hubnote::config::HubnoteConfig;
use hubnote::error::ExportError;
use hubnote::export::{self, Exporter};
use hubnote::github::SourceGateway;

/// Exports the last 100 issues, ascending by creation.
///
/// Individual issue failures are contained by the batch driver; this function
/// only fails when configuration or the listing fetch fails.
pub async fn run(config: &HubnoteConfig) -> Result<(), ExportError> {
    let (locator, source) = super::source_parts(config)?;
    let (database, destination) = super::destination_parts(config)?;

    let issues = source.issues(&locator).await?;
    tracing::info!(count = issues.len(), "exporting issues");

    let exporter = Exporter::new(&source, &destination, &locator, &database);
    export::export_issues(&exporter, &issues).await;
    Ok(())
}
