//! Issue fetches over the GraphQL endpoint.

use octocrab::Octocrab;
use serde::Deserialize;
use serde_json::json;

use crate::error::ExportError;
use crate::github::locator::RepositoryLocator;
use crate::github::models::{ApiIssue, Issue};

use super::graphql::{ISSUE_QUERY, ISSUES_QUERY, post_query};

#[derive(Debug, Deserialize)]
struct IssueData {
    repository: Option<IssueRepository>,
}

#[derive(Debug, Deserialize)]
struct IssueRepository {
    issue: Option<ApiIssue>,
}

#[derive(Debug, Deserialize)]
struct IssuesData {
    repository: Option<IssuesRepository>,
}

#[derive(Debug, Deserialize)]
struct IssuesRepository {
    issues: ApiIssueConnection,
}

#[derive(Debug, Default, Deserialize)]
struct ApiIssueConnection {
    #[serde(default)]
    nodes: Vec<ApiIssue>,
}

pub(super) async fn fetch_issue(
    client: &Octocrab,
    locator: &RepositoryLocator,
    number: u64,
) -> Result<Issue, ExportError> {
    let variables = json!({
        "owner": locator.owner().as_str(),
        "repo": locator.repository().as_str(),
        "number": number,
    });
    let data: IssueData = post_query(client, "issue", ISSUE_QUERY, variables).await?;

    data.repository
        .and_then(|repository| repository.issue)
        .map(Issue::from)
        .ok_or_else(|| ExportError::MissingEntity {
            kind: "issue".to_owned(),
            number,
        })
}

/// Fetches the last 100 issues ordered ascending by creation.
///
/// Single page by design; repositories with more than 100 issues export only
/// the most recent window.
pub(super) async fn fetch_issues(
    client: &Octocrab,
    locator: &RepositoryLocator,
) -> Result<Vec<Issue>, ExportError> {
    let variables = json!({
        "owner": locator.owner().as_str(),
        "repo": locator.repository().as_str(),
    });
    let data: IssuesData = post_query(client, "issues", ISSUES_QUERY, variables).await?;

    let repository = data.repository.ok_or_else(|| ExportError::MissingRepository {
        owner: locator.owner().as_str().to_owned(),
        repo: locator.repository().as_str().to_owned(),
    })?;

    Ok(repository.issues.nodes.into_iter().map(Issue::from).collect())
}
