//! Export pipeline: fetched entity → markdown bundle → blocks → Notion page.
//!
//! The [`Exporter`] turns one entity into one page-creation call. Both entity
//! kinds go through the same failure model: the export functions return a
//! `Result`, and only the batch drivers decide that a failed entity is
//! contained rather than fatal. Conversion failures are the one locally
//! recovered class — a chunk that fails to convert is logged and skipped.

pub mod bundle;

pub use bundle::{diff_chunk, issue_bundle, pull_request_bundle};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::convert::{NotionLimits, markdown_to_blocks};
use crate::error::ExportError;
use crate::github::gateway::SourceGateway;
use crate::github::locator::RepositoryLocator;
use crate::github::models::{Issue, PullRequest};
use crate::notion::types::{
    Block, CreatePageRequest, CreatedPage, DateProperty, DateValue, MAX_PAGE_CHILDREN, PageParent,
    PageProperties, RichText, RichTextProperty, TitleProperty, UrlProperty,
};
use crate::notion::{DestinationGateway, NotionDatabaseId};

/// Literal heading placed between discussion content and the diff.
const FILE_CHANGES_HEADING: &str = "File Changes";

/// Placeholder rendered when an author no longer resolves to an account.
const UNKNOWN_AUTHOR: &str = "unknown";

/// Produces one destination page per fetched entity.
pub struct Exporter<'run, Source, Destination>
where
    Source: SourceGateway,
    Destination: DestinationGateway,
{
    source: &'run Source,
    destination: &'run Destination,
    locator: &'run RepositoryLocator,
    database: &'run NotionDatabaseId,
    limits: NotionLimits,
}

impl<'run, Source, Destination> Exporter<'run, Source, Destination>
where
    Source: SourceGateway,
    Destination: DestinationGateway,
{
    /// Creates an exporter over explicit gateways.
    #[must_use]
    pub fn new(
        source: &'run Source,
        destination: &'run Destination,
        locator: &'run RepositoryLocator,
        database: &'run NotionDatabaseId,
    ) -> Self {
        Self {
            source,
            destination,
            locator,
            database,
            limits: NotionLimits::default(),
        }
    }

    /// Exports one issue as a page.
    ///
    /// # Errors
    ///
    /// Propagates destination failures; the caller decides whether they are
    /// fatal.
    pub async fn export_issue(&self, issue: &Issue) -> Result<CreatedPage, ExportError> {
        if issue.comments_truncated {
            tracing::warn!(
                number = issue.number,
                "comment window overflowed; exported comments are incomplete"
            );
        }

        let children = self.convert_chunks(&bundle::issue_bundle(issue));
        let request = self.page_request(
            issue.number,
            &issue.title,
            issue.author.as_deref(),
            issue.created_at,
            children,
        );
        self.destination.create_page(&request).await
    }

    /// Exports one pull request as a page, including its diff section.
    ///
    /// # Errors
    ///
    /// Propagates diff-fetch and destination failures; the caller decides
    /// whether they are fatal.
    pub async fn export_pull_request(
        &self,
        pull_request: &PullRequest,
    ) -> Result<CreatedPage, ExportError> {
        if pull_request.comments_truncated {
            tracing::warn!(
                number = pull_request.number,
                "comment window overflowed; exported comments are incomplete"
            );
        }
        if pull_request.reviews_truncated {
            tracing::warn!(
                number = pull_request.number,
                "review window overflowed; exported reviews are incomplete"
            );
        }

        let mut children = self.convert_chunks(&bundle::pull_request_bundle(pull_request));

        let diff = self
            .source
            .pull_request_diff(self.locator, pull_request.number)
            .await?;
        children.push(Block::heading_2(FILE_CHANGES_HEADING));
        children.extend(self.convert_chunk(&bundle::diff_chunk(&diff)));

        let request = self.page_request(
            pull_request.number,
            &pull_request.title,
            pull_request.author.as_deref(),
            pull_request.created_at,
            children,
        );
        self.destination.create_page(&request).await
    }

    /// Converts every chunk independently, preserving order.
    fn convert_chunks(&self, chunks: &[String]) -> Vec<Block> {
        chunks
            .iter()
            .flat_map(|chunk| self.convert_chunk(chunk))
            .collect()
    }

    /// Converts one chunk; failures are logged and contribute no blocks.
    fn convert_chunk(&self, chunk: &str) -> Vec<Block> {
        match markdown_to_blocks(chunk, &self.limits) {
            Ok(blocks) => blocks,
            Err(error) => {
                tracing::warn!(%error, "markdown conversion failed; chunk skipped");
                Vec::new()
            }
        }
    }

    fn page_request(
        &self,
        number: u64,
        title: &str,
        author: Option<&str>,
        created_at: DateTime<Utc>,
        mut children: Vec<Block>,
    ) -> CreatePageRequest {
        if children.len() > MAX_PAGE_CHILDREN {
            tracing::warn!(
                number,
                dropped = children.len() - MAX_PAGE_CHILDREN,
                "page content exceeds the children limit; trailing blocks dropped"
            );
            children.truncate(MAX_PAGE_CHILDREN);
        }

        CreatePageRequest {
            parent: PageParent::database(self.database.value()),
            properties: PageProperties {
                title: TitleProperty {
                    title: vec![RichText::plain(title)],
                },
                author: RichTextProperty {
                    rich_text: vec![RichText::plain(author.unwrap_or(UNKNOWN_AUTHOR))],
                },
                created_at: DateProperty {
                    date: DateValue {
                        start: created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                    },
                },
                github_url: UrlProperty {
                    url: self.locator.entity_url(number),
                },
            },
            children,
        }
    }
}

/// Exports issues one at a time, strictly in order.
///
/// A failed entity is logged with its classification and never aborts the
/// rest of the batch.
pub async fn export_issues<Source, Destination>(
    exporter: &Exporter<'_, Source, Destination>,
    issues: &[Issue],
) where
    Source: SourceGateway,
    Destination: DestinationGateway,
{
    for issue in issues {
        match exporter.export_issue(issue).await {
            Ok(page) => tracing::info!(number = issue.number, page = %page.id, "issue exported"),
            Err(error) => log_entity_failure("issue", issue.number, &error),
        }
    }
}

/// Exports pull requests one at a time, strictly in order.
///
/// A failed entity is logged with its classification and never aborts the
/// rest of the batch.
pub async fn export_pull_requests<Source, Destination>(
    exporter: &Exporter<'_, Source, Destination>,
    pull_requests: &[PullRequest],
) where
    Source: SourceGateway,
    Destination: DestinationGateway,
{
    for pull_request in pull_requests {
        match exporter.export_pull_request(pull_request).await {
            Ok(page) => {
                tracing::info!(number = pull_request.number, page = %page.id, "pull request exported");
            }
            Err(error) => log_entity_failure("pull request", pull_request.number, &error),
        }
    }
}

/// Logs a contained per-entity failure, with structured detail for the
/// recognised destination error kind and a generic line otherwise.
fn log_entity_failure(kind: &str, number: u64, error: &ExportError) {
    match error {
        ExportError::NotionApi { status, code, body } => {
            tracing::error!(
                kind,
                number,
                status = *status,
                code = %code,
                body = %body,
                "page creation rejected"
            );
        }
        other => tracing::error!(kind, number, error = %other, "export failed"),
    }
}
