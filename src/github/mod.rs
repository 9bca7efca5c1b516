//! GitHub source client: GraphQL entity fetches and the pull request diff.
//!
//! This module wraps octocrab to query issues and pull requests with their
//! discussion threads, page through pull request listings, and retrieve raw
//! diffs. Errors are mapped into [`crate::error::ExportError`] variants so
//! callers never see octocrab internals.

pub mod gateway;
pub mod locator;
pub mod models;

pub use gateway::{OctocrabSourceGateway, SourceGateway, collect_pull_requests};
pub use locator::{PersonalAccessToken, RepositoryLocator, RepositoryName, RepositoryOwner};
pub use models::{Comment, Issue, PullRequest, PullRequestPage, Review};

#[cfg(test)]
pub use gateway::MockSourceGateway;
