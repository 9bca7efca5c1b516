//! Single issue export.

use hubnote::config::HubnoteConfig;
use hubnote::error::ExportError;
use hubnote::export::Exporter;
use hubnote::github::SourceGateway;

use super::output::write_line;

/// Exports one issue by number.
///
/// Unlike the batch path, a failure here surfaces at the process boundary.
pub async fn run(config: &HubnoteConfig) -> Result<(), ExportError> {
    let number = config.require_issue_number()?;
    let (locator, source) = super::source_parts(config)?;
    let (database, destination) = super::destination_parts(config)?;

    let issue = source.issue(&locator, number).await?;
    let exporter = Exporter::new(&source, &destination, &locator, &database);
    let page = exporter.export_issue(&issue).await?;

    write_line(&format!("exported issue #{number} to page {}", page.id))
}
