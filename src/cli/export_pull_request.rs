//! Single pull request export.

use hubnote::config::HubnoteConfig;
use hubnote::error::ExportError;
use hubnote::export::Exporter;
use hubnote::github::SourceGateway;

use super::output::write_line;

/// Exports one pull request by number, including its diff section.
///
/// Unlike the batch path, a failure here surfaces at the process boundary.
pub async fn run(config: &HubnoteConfig) -> Result<(), ExportError> {
    let number = config.require_pull_request_number()?;
    let (locator, source) = super::source_parts(config)?;
    let (database, destination) = super::destination_parts(config)?;

    let pull_request = source.pull_request(&locator, number).await?;
    let exporter = Exporter::new(&source, &destination, &locator, &database);
    let page = exporter.export_pull_request(&pull_request).await?;

    write_line(&format!(
        "exported pull request #{number} to page {}",
        page.id
    ))
}
