//! Gateways for reading issues and pull requests from GitHub.
//!
//! The trait-based design enables mocking in tests while the octocrab
//! implementation handles real HTTP requests. All entity reads go through
//! the GraphQL endpoint; only the diff uses the REST media-type request.

mod client;
mod error_mapping;
mod graphql;
mod issues;
mod pull_requests;

use async_trait::async_trait;
use octocrab::Octocrab;

use crate::error::ExportError;
use crate::github::locator::{PersonalAccessToken, RepositoryLocator};
use crate::github::models::{Issue, PullRequest, PullRequestPage};

use client::build_octocrab_client;

/// Gateway that can load issue and pull request data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SourceGateway: Send + Sync {
    /// Fetch a single issue with its comments.
    async fn issue(
        &self,
        locator: &RepositoryLocator,
        number: u64,
    ) -> Result<Issue, ExportError>;

    /// Fetch the last 100 issues, ascending by creation (single page).
    async fn issues(&self, locator: &RepositoryLocator) -> Result<Vec<Issue>, ExportError>;

    /// Fetch a single pull request with its comments and reviews.
    async fn pull_request(
        &self,
        locator: &RepositoryLocator,
        number: u64,
    ) -> Result<PullRequest, ExportError>;

    /// Fetch one page of pull requests, descending by creation.
    async fn pull_requests_page<'a>(
        &self,
        locator: &RepositoryLocator,
        cursor: Option<&'a str>,
    ) -> Result<PullRequestPage, ExportError>;

    /// Fetch the raw unified diff for a pull request.
    async fn pull_request_diff(
        &self,
        locator: &RepositoryLocator,
        number: u64,
    ) -> Result<String, ExportError>;
}

/// Octocrab-backed source gateway.
pub struct OctocrabSourceGateway {
    client: Octocrab,
}

impl OctocrabSourceGateway {
    /// Creates a new gateway from an octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an octocrab client for the given token and repository locator.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidUrl`] when the base URI cannot be parsed
    /// or [`ExportError::Api`] when octocrab fails to construct a client.
    pub fn for_token(
        token: &PersonalAccessToken,
        locator: &RepositoryLocator,
    ) -> Result<Self, ExportError> {
        let octocrab = build_octocrab_client(token, locator.api_base().as_str())?;
        Ok(Self::new(octocrab))
    }
}

#[async_trait]
impl SourceGateway for OctocrabSourceGateway {
    async fn issue(
        &self,
        locator: &RepositoryLocator,
        number: u64,
    ) -> Result<Issue, ExportError> {
        issues::fetch_issue(&self.client, locator, number).await
    }

    async fn issues(&self, locator: &RepositoryLocator) -> Result<Vec<Issue>, ExportError> {
        issues::fetch_issues(&self.client, locator).await
    }

    async fn pull_request(
        &self,
        locator: &RepositoryLocator,
        number: u64,
    ) -> Result<PullRequest, ExportError> {
        pull_requests::fetch_pull_request(&self.client, locator, number).await
    }

    async fn pull_requests_page<'a>(
        &self,
        locator: &RepositoryLocator,
        cursor: Option<&'a str>,
    ) -> Result<PullRequestPage, ExportError> {
        pull_requests::fetch_pull_requests_page(&self.client, locator, cursor).await
    }

    async fn pull_request_diff(
        &self,
        locator: &RepositoryLocator,
        number: u64,
    ) -> Result<String, ExportError> {
        pull_requests::fetch_pull_request_diff(&self.client, locator, number).await
    }
}

/// Collects every page of pull requests into one vector.
///
/// Pages are requested strictly in sequence; each page's nodes are appended
/// after the previous page's, so the result is page-grouped rather than
/// globally sorted. Stops when the source reports no further page, or when a
/// malformed response claims one without supplying a cursor.
pub async fn collect_pull_requests<Gateway>(
    gateway: &Gateway,
    locator: &RepositoryLocator,
) -> Result<Vec<PullRequest>, ExportError>
where
    Gateway: SourceGateway,
{
    let mut pull_requests = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = gateway.pull_requests_page(locator, cursor.as_deref()).await?;
        pull_requests.extend(page.nodes);

        match (page.has_next_page, page.end_cursor) {
            (true, Some(next)) => cursor = Some(next),
            _ => break,
        }
    }

    Ok(pull_requests)
}

#[cfg(test)]
mod tests {
    use super::{MockSourceGateway, collect_pull_requests};
    use crate::github::locator::RepositoryLocator;
    use crate::github::models::PullRequestPage;

    #[tokio::test]
    async fn malformed_continuation_without_cursor_stops_the_loop() {
        let locator =
            RepositoryLocator::from_owner_repo("octo", "repo").expect("locator should build");

        let mut gateway = MockSourceGateway::new();
        gateway
            .expect_pull_requests_page()
            .times(1)
            .returning(|_, _| {
                Ok(PullRequestPage {
                    nodes: Vec::new(),
                    end_cursor: None,
                    has_next_page: true,
                })
            });

        let pull_requests = collect_pull_requests(&gateway, &locator)
            .await
            .expect("collection should stop cleanly");

        assert!(pull_requests.is_empty());
    }
}
