//! Octocrab client wrapper scoped to the index repository.
//!
//! All operations performed through this client target the index repository:
//! fetching issue-template files, checking whether a package is already
//! registered, and filing the resulting issue. Each operation is a single API
//! call with no retry; errors propagate as fatal.

use octocrab::Octocrab;

use crate::template::IssueContent;
use crate::types::{PackageName, RepoId};

use super::error::ApiError;

/// A client for the index repository.
#[derive(Clone)]
pub struct IndexClient {
    /// The underlying octocrab client.
    client: Octocrab,

    /// The index repository this client is scoped to.
    repo: RepoId,
}

/// Handle to the issue created by [`IndexClient::create_issue`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredIssue {
    /// The issue number on the index repository.
    pub number: u64,

    /// The issue's web URL.
    pub url: String,
}

impl IndexClient {
    /// Creates a client from an API token, scoped to the given repository.
    pub fn from_token(token: impl Into<String>, repo: RepoId) -> Result<Self, ApiError> {
        let client = Octocrab::builder()
            .personal_token(token.into())
            .build()
            .map_err(ApiError::from_octocrab)?;
        Ok(Self { client, repo })
    }

    /// Creates a client from a pre-configured Octocrab instance.
    ///
    /// Use this when you need custom authentication (e.g., GitHub App
    /// installation tokens).
    pub fn from_octocrab(client: Octocrab, repo: RepoId) -> Self {
        Self { client, repo }
    }

    /// Returns the index repository this client is scoped to.
    pub fn repo(&self) -> &RepoId {
        &self.repo
    }

    /// Fetches the raw bytes of a template file from the index repository.
    pub async fn fetch_template(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let contents = self
            .client
            .repos(&self.repo.owner, &self.repo.repo)
            .get_content()
            .path(path)
            .send()
            .await
            .map_err(ApiError::from_octocrab)?;

        let item = contents.items.into_iter().next().ok_or_else(|| {
            ApiError::without_source(format!("template `{path}` not present in {}", self.repo))
        })?;
        let decoded = item.decoded_content().ok_or_else(|| {
            ApiError::without_source(format!("template `{path}` has no decodable content"))
        })?;
        Ok(decoded.into_bytes())
    }

    /// Returns true if a file named after the package exists at the index
    /// repository root.
    ///
    /// This is what distinguishes a first registration from a re-registration
    /// when the event action is `created`.
    pub async fn has_package(&self, package: &PackageName) -> Result<bool, ApiError> {
        let contents = self
            .client
            .repos(&self.repo.owner, &self.repo.repo)
            .get_content()
            .send()
            .await
            .map_err(ApiError::from_octocrab)?;

        Ok(contains_package(
            contents.items.iter().map(|item| item.name.as_str()),
            package,
        ))
    }

    /// Files the issue on the index repository.
    ///
    /// Single side-effecting call with no idempotency key: invoking this twice
    /// creates two issues.
    pub async fn create_issue(&self, content: &IssueContent) -> Result<RegisteredIssue, ApiError> {
        let issue = self
            .client
            .issues(&self.repo.owner, &self.repo.repo)
            .create(&content.title)
            .body(&content.body)
            .labels(content.labels.clone())
            .send()
            .await
            .map_err(ApiError::from_octocrab)?;

        Ok(RegisteredIssue {
            number: issue.number,
            url: issue.html_url.to_string(),
        })
    }
}

/// Membership check over a root file listing.
fn contains_package<'a>(mut names: impl Iterator<Item = &'a str>, package: &PackageName) -> bool {
    names.any(|name| name == package.as_str())
}

impl std::fmt::Debug for IndexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexClient")
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}
