//! Error types surfaced by the exporter.

use thiserror::Error;

/// Errors surfaced while loading configuration or talking to either API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExportError {
    /// No GitHub token was configured.
    #[error("GitHub token is required")]
    MissingSourceToken,

    /// No Notion token was configured.
    #[error("Notion token is required")]
    MissingNotionToken,

    /// No Notion database id was configured.
    #[error("Notion database id is required")]
    MissingDatabaseId,

    /// Configuration could not be loaded or is incomplete.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// A URL or API base could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The repository named in the query does not exist or is not visible.
    #[error("repository {owner}/{repo} was not found")]
    MissingRepository {
        /// Repository owner used in the query.
        owner: String,
        /// Repository name used in the query.
        repo: String,
    },

    /// The requested issue or pull request does not exist.
    #[error("{kind} #{number} was not found")]
    MissingEntity {
        /// Entity kind, "issue" or "pull request".
        kind: String,
        /// Number that failed to resolve.
        number: u64,
    },

    /// GitHub rejected the token.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// GitHub returned a non-authentication API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response detail from GitHub describing the failure.
        message: String,
    },

    /// The GraphQL response carried query-level errors.
    #[error("GitHub query error: {message}")]
    Query {
        /// First error message from the GraphQL `errors` array.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// Notion returned a structured API error response.
    #[error("Notion API error {code} (status {status}): {body}")]
    NotionApi {
        /// HTTP status of the rejected request.
        status: u16,
        /// Notion error code, e.g. `validation_error`.
        code: String,
        /// Raw response body for diagnosis.
        body: String,
    },

    /// Networking failed while calling Notion.
    #[error("network error talking to Notion: {message}")]
    NotionTransport {
        /// Transport-level error detail.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}
