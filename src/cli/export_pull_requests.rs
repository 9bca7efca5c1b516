//! Paged export of every pull request.

use hubnote::config::HubnoteConfig;
use hubnote::error::ExportError;
use hubnote::export::{self, Exporter};
use hubnote::github::SourceGateway;

/// Exports all pull requests, one page of 100 at a time.
///
/// Each page is exported before the next page is fetched, so memory stays
/// bounded and progress is incremental. Pages arrive descending by creation;
/// the overall order is page-grouped, not globally sorted.
pub async fn run(config: &HubnoteConfig) -> Result<(), ExportError> {
    let (locator, source) = super::source_parts(config)?;
    let (database, destination) = super::destination_parts(config)?;
    let exporter = Exporter::new(&source, &destination, &locator, &database);

    let mut cursor: Option<String> = None;
    loop {
        let page = source.pull_requests_page(&locator, cursor.as_deref()).await?;
        tracing::info!(count = page.nodes.len(), "exporting pull request page");
        export::export_pull_requests(&exporter, &page.nodes).await;

        match (page.has_next_page, page.end_cursor) {
            (true, Some(next)) => cursor = Some(next),
            _ => break,
        }
    }

    Ok(())
}
