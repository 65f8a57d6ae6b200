//! Generated homepage and install-link strings.

use crate::types::RepoId;

/// Builds the package homepage from the server URL and the source repository.
pub fn make_homepage(server_url: &str, repo: &RepoId) -> String {
    format!("{}/{repo}", server_url.trim_end_matches('/'))
}

/// Builds a pip-style VCS install link pinned to a tag.
pub fn make_link(homepage: &str, tag: &str) -> String {
    format!("git+{homepage}@{tag}")
}
