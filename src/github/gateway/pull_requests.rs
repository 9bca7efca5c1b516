//! Pull request fetches: single entity, paged listing, and the diff.

use octocrab::Octocrab;
use serde::Deserialize;
use serde_json::json;

use crate::error::ExportError;
use crate::github::locator::RepositoryLocator;
use crate::github::models::{ApiPullRequest, ApiPullRequestConnection, PullRequest, PullRequestPage};

use super::error_mapping::map_octocrab_error;
use super::graphql::{PULL_REQUEST_QUERY, PULL_REQUESTS_QUERY, post_query};

#[derive(Debug, Deserialize)]
struct PullRequestData {
    repository: Option<PullRequestRepository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullRequestRepository {
    pull_request: Option<ApiPullRequest>,
}

#[derive(Debug, Deserialize)]
struct PullRequestsData {
    repository: Option<PullRequestsRepository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullRequestsRepository {
    pull_requests: ApiPullRequestConnection,
}

pub(super) async fn fetch_pull_request(
    client: &Octocrab,
    locator: &RepositoryLocator,
    number: u64,
) -> Result<PullRequest, ExportError> {
    let variables = json!({
        "owner": locator.owner().as_str(),
        "repo": locator.repository().as_str(),
        "number": number,
    });
    let data: PullRequestData =
        post_query(client, "pull request", PULL_REQUEST_QUERY, variables).await?;

    data.repository
        .and_then(|repository| repository.pull_request)
        .map(PullRequest::from)
        .ok_or_else(|| ExportError::MissingEntity {
            kind: "pull request".to_owned(),
            number,
        })
}

/// Fetches one page of up to 100 pull requests, descending by creation.
///
/// Callers drive the pagination loop from the returned cursor; each call is
/// one network round trip.
pub(super) async fn fetch_pull_requests_page(
    client: &Octocrab,
    locator: &RepositoryLocator,
    cursor: Option<&str>,
) -> Result<PullRequestPage, ExportError> {
    let variables = json!({
        "owner": locator.owner().as_str(),
        "repo": locator.repository().as_str(),
        "after": cursor,
    });
    let data: PullRequestsData =
        post_query(client, "pull requests", PULL_REQUESTS_QUERY, variables).await?;

    let repository = data.repository.ok_or_else(|| ExportError::MissingRepository {
        owner: locator.owner().as_str().to_owned(),
        repo: locator.repository().as_str().to_owned(),
    })?;

    Ok(repository.pull_requests.into())
}

/// Fetches the raw unified diff for a pull request.
pub(super) async fn fetch_pull_request_diff(
    client: &Octocrab,
    locator: &RepositoryLocator,
    number: u64,
) -> Result<String, ExportError> {
    client
        .pulls(locator.owner().as_str(), locator.repository().as_str())
        .get_diff(number)
        .await
        .map_err(|error| map_octocrab_error("pull request diff", &error))
}
