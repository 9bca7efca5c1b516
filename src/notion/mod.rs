//! Notion destination client and page-creation types.
//!
//! The gateway trait mirrors the source side: the exporter depends on the
//! trait so tests can substitute a mock, while [`NotionClient`] performs the
//! real HTTP requests.

pub mod client;
pub mod types;

pub use client::NotionClient;
pub use types::{Block, CreatePageRequest, CreatedPage, PageParent, PageProperties, RichText};

use async_trait::async_trait;

use crate::error::ExportError;

/// Integration token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotionToken(String);

impl NotionToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::MissingNotionToken`] when the supplied string
    /// is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, ExportError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ExportError::MissingNotionToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

/// Destination database identifier wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotionDatabaseId(String);

impl NotionDatabaseId {
    /// Validates that the identifier is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::MissingDatabaseId`] when the supplied string is
    /// blank.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ExportError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ExportError::MissingDatabaseId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the identifier value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

/// Gateway that can persist pages into the destination database.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DestinationGateway: Send + Sync {
    /// Creates one page with its properties and content blocks.
    async fn create_page(&self, request: &CreatePageRequest) -> Result<CreatedPage, ExportError>;
}

#[cfg(test)]
mod tests {
    use super::{NotionDatabaseId, NotionToken};
    use crate::error::ExportError;

    #[test]
    fn blank_token_is_rejected() {
        let error = NotionToken::new("  ").expect_err("blank token should fail");
        assert_eq!(error, ExportError::MissingNotionToken);
    }

    #[test]
    fn blank_database_id_is_rejected() {
        let error = NotionDatabaseId::new("").expect_err("blank id should fail");
        assert_eq!(error, ExportError::MissingDatabaseId);
    }

    #[test]
    fn values_are_trimmed() {
        let database = NotionDatabaseId::new(" db-123 ").expect("id should be valid");
        assert_eq!(database.value(), "db-123");
    }
}
