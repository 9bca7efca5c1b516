//! CLI operation handlers, one module per operation mode.
//!
//! Each handler wires configuration into explicit client instances and runs
//! one operation to completion:
//! - [`export_issues`]: batch export of the most recent issues
//! - [`export_issue`]: single issue by number
//! - [`export_pull_request`]: single pull request by number
//! - [`export_pull_requests`]: paged export of every pull request
//! - [`print_diff`]: print a pull request's fenced diff only
//!
//! Output formatting utilities are in [`output`].

pub mod export_issue;
pub mod export_issues;
pub mod export_pull_request;
pub mod export_pull_requests;
pub mod output;
pub mod print_diff;

use hubnote::config::HubnoteConfig;
use hubnote::error::ExportError;
use hubnote::github::{OctocrabSourceGateway, PersonalAccessToken, RepositoryLocator};
use hubnote::notion::{NotionClient, NotionDatabaseId, NotionToken};

/// Builds the repository locator and source gateway from configuration.
pub(crate) fn source_parts(
    config: &HubnoteConfig,
) -> Result<(RepositoryLocator, OctocrabSourceGateway), ExportError> {
    let (owner, repo) = config.require_repository_info()?;
    let locator = RepositoryLocator::from_owner_repo(owner, repo)?;
    let token = PersonalAccessToken::new(config.resolve_github_token()?)?;
    let gateway = OctocrabSourceGateway::for_token(&token, &locator)?;
    Ok((locator, gateway))
}

/// Builds the destination database id and client from configuration.
pub(crate) fn destination_parts(
    config: &HubnoteConfig,
) -> Result<(NotionDatabaseId, NotionClient), ExportError> {
    let token = NotionToken::new(config.resolve_notion_token()?)?;
    let database = NotionDatabaseId::new(config.resolve_database_id()?)?;
    let client = NotionClient::new(token)?;
    Ok((database, client))
}
