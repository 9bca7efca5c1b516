//! Repository identity wrappers and source URL construction.

use url::Url;

use crate::error::ExportError;

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, ExportError> {
        if value.is_empty() {
            return Err(ExportError::Configuration {
                message: "repository owner must not be empty".to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, ExportError> {
        if value.is_empty() {
            return Err(ExportError::Configuration {
                message: "repository name must not be empty".to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::MissingSourceToken`] when the supplied string is
    /// blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, ExportError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ExportError::MissingSourceToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// Repository identity plus the API base used to reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Creates a locator for a repository on github.com.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Configuration`] when owner or repo is empty.
    pub fn from_owner_repo(owner: &str, repo: &str) -> Result<Self, ExportError> {
        Self::with_api_base(owner, repo, "https://api.github.com")
    }

    /// Creates a locator with an explicit API base.
    ///
    /// Used by tests to point the client at a mock server.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Configuration`] when owner or repo is empty and
    /// [`ExportError::InvalidUrl`] when the base cannot be parsed.
    pub fn with_api_base(owner: &str, repo: &str, api_base: &str) -> Result<Self, ExportError> {
        let owner = RepositoryOwner::new(owner)?;
        let repository = RepositoryName::new(repo)?;
        let api_base =
            Url::parse(api_base).map_err(|error| ExportError::InvalidUrl(error.to_string()))?;

        Ok(Self {
            api_base,
            owner,
            repository,
        })
    }

    /// API base URL used by the source client.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Public URL for an issue or pull request number.
    ///
    /// Pull requests use the issues path as well; github.com redirects
    /// them to the pull request view.
    #[must_use]
    pub fn entity_url(&self, number: u64) -> String {
        format!(
            "https://github.com/{}/{}/issues/{number}",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{PersonalAccessToken, RepositoryLocator};
    use crate::error::ExportError;

    #[test]
    fn entity_url_uses_the_issues_path() {
        let locator =
            RepositoryLocator::from_owner_repo("octo", "repo").expect("locator should build");
        assert_eq!(locator.entity_url(5), "https://github.com/octo/repo/issues/5");
    }

    #[test]
    fn default_api_base_is_github_com() {
        let locator =
            RepositoryLocator::from_owner_repo("octo", "repo").expect("locator should build");
        assert_eq!(locator.api_base().as_str(), "https://api.github.com/");
    }

    #[rstest]
    #[case::empty_owner("", "repo")]
    #[case::empty_repo("octo", "")]
    fn empty_segments_are_rejected(#[case] owner: &str, #[case] repo: &str) {
        let error = RepositoryLocator::from_owner_repo(owner, repo)
            .expect_err("empty segment should fail");
        assert!(matches!(error, ExportError::Configuration { .. }));
    }

    #[test]
    fn token_is_trimmed() {
        let token = PersonalAccessToken::new("  ghp_value  ").expect("token should be valid");
        assert_eq!(token.value(), "ghp_value");
    }

    #[test]
    fn blank_token_is_rejected() {
        let error = PersonalAccessToken::new("   ").expect_err("blank token should fail");
        assert_eq!(error, ExportError::MissingSourceToken);
    }
}
