//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.hubnote.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `HUBNOTE_*`, or the legacy `GITHUB_TOKEN`,
//!    `NOTION_TOKEN`, and `NOTION_DATABASE_ID`
//! 4. **Command-line arguments**
//!
//! # Configuration File
//!
//! Place `.hubnote.toml` in the current directory, home directory, or XDG
//! config directory with:
//!
//! ```toml
//! owner = "octocat"
//! repo = "hello-world"
//! github_token = "ghp_example"
//! notion_token = "secret_example"
//! notion_database_id = "0123456789abcdef0123456789abcdef"
//! ```

use std::env;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::error::ExportError;

/// Operation selected by the CLI flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Export the last 100 issues (the default operation).
    ExportIssues,
    /// Export one issue by number.
    ExportIssue,
    /// Export one pull request by number.
    ExportPullRequest,
    /// Export every pull request, page by page.
    ExportPullRequests,
    /// Print a pull request's fenced diff without exporting.
    PrintDiff,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `HUBNOTE_OWNER` or `--owner`: Repository owner
/// - `HUBNOTE_REPO` or `--repo`: Repository name
/// - `HUBNOTE_GITHUB_TOKEN`, `GITHUB_TOKEN` (legacy), or `--github-token`
/// - `HUBNOTE_NOTION_TOKEN`, `NOTION_TOKEN` (legacy), or `--notion-token`
/// - `HUBNOTE_NOTION_DATABASE_ID`, `NOTION_DATABASE_ID` (legacy), or
///   `--notion-database-id`
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "HUBNOTE",
    discovery(
        dotfile_name = ".hubnote.toml",
        config_file_name = "hubnote.toml",
        app_name = "hubnote"
    )
)]
pub struct HubnoteConfig {
    /// Repository owner (e.g., "octocat").
    #[ortho_config(cli_short = 'o')]
    pub owner: Option<String>,

    /// Repository name (e.g., "hello-world").
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// Personal access token for GitHub API authentication.
    #[ortho_config(cli_short = 't')]
    pub github_token: Option<String>,

    /// Integration token for Notion API authentication.
    #[ortho_config()]
    pub notion_token: Option<String>,

    /// Destination Notion database identifier.
    #[ortho_config()]
    pub notion_database_id: Option<String>,

    /// Issue number to export on its own.
    #[ortho_config(cli_short = 'i')]
    pub issue: Option<u64>,

    /// Pull request number to export on its own.
    #[ortho_config(cli_short = 'p')]
    pub pull_request: Option<u64>,

    /// Exports every pull request instead of issues.
    #[ortho_config()]
    pub all_pull_requests: bool,

    /// Prints the selected pull request's diff instead of exporting.
    ///
    /// Combine with `--pull-request`.
    #[ortho_config(cli_short = 'd')]
    pub diff_only: bool,
}

impl HubnoteConfig {
    /// Resolves the GitHub token from configuration or the legacy
    /// `GITHUB_TOKEN` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::MissingSourceToken`] when no token source
    /// provides a value.
    pub fn resolve_github_token(&self) -> Result<String, ExportError> {
        self.github_token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .ok_or(ExportError::MissingSourceToken)
    }

    /// Resolves the Notion token from configuration or the legacy
    /// `NOTION_TOKEN` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::MissingNotionToken`] when no token source
    /// provides a value.
    pub fn resolve_notion_token(&self) -> Result<String, ExportError> {
        self.notion_token
            .clone()
            .or_else(|| env::var("NOTION_TOKEN").ok())
            .ok_or(ExportError::MissingNotionToken)
    }

    /// Resolves the database identifier from configuration or the legacy
    /// `NOTION_DATABASE_ID` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::MissingDatabaseId`] when no source provides a
    /// value.
    pub fn resolve_database_id(&self) -> Result<String, ExportError> {
        self.notion_database_id
            .clone()
            .or_else(|| env::var("NOTION_DATABASE_ID").ok())
            .ok_or(ExportError::MissingDatabaseId)
    }

    /// Determines the operation mode from the flags that are set.
    ///
    /// Diff printing wins when requested; otherwise a single pull request or
    /// issue number selects the single-entity path, `--all-pull-requests`
    /// selects the paged pull request export, and the issue batch export is
    /// the default.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.diff_only {
            OperationMode::PrintDiff
        } else if self.pull_request.is_some() {
            OperationMode::ExportPullRequest
        } else if self.issue.is_some() {
            OperationMode::ExportIssue
        } else if self.all_pull_requests {
            OperationMode::ExportPullRequests
        } else {
            OperationMode::ExportIssues
        }
    }

    /// Returns owner and repo if both are configured.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Configuration`] when owner or repo is missing.
    pub fn require_repository_info(&self) -> Result<(&str, &str), ExportError> {
        match (&self.owner, &self.repo) {
            (Some(owner), Some(repo)) => Ok((owner.as_str(), repo.as_str())),
            (None, _) => Err(ExportError::Configuration {
                message: "repository owner is required (use --owner or -o)".to_owned(),
            }),
            (_, None) => Err(ExportError::Configuration {
                message: "repository name is required (use --repo or -r)".to_owned(),
            }),
        }
    }

    /// Returns the configured pull request number.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Configuration`] when no number is configured.
    pub fn require_pull_request_number(&self) -> Result<u64, ExportError> {
        self.pull_request.ok_or_else(|| ExportError::Configuration {
            message: "a pull request number is required (use --pull-request or -p)".to_owned(),
        })
    }

    /// Returns the configured issue number.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Configuration`] when no number is configured.
    pub fn require_issue_number(&self) -> Result<u64, ExportError> {
        self.issue.ok_or_else(|| ExportError::Configuration {
            message: "an issue number is required (use --issue or -i)".to_owned(),
        })
    }
}
