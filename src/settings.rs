//! Process configuration, read once from the environment at startup.
//!
//! The workflow runner injects everything this tool needs as environment
//! variables: the API token, the event context blob, the server URL, and two
//! optional overrides. [`Settings::from_env`] reads them all and reports every
//! missing or malformed field in a single validation error, so a broken
//! workflow surfaces all of its problems in one run. Failure is fatal; there
//! are no retries and no defaults for required fields.

use std::env::{self, VarError};
use std::fmt;

use thiserror::Error;

use crate::events::{self, GithubContext};
use crate::types::{PackageName, RepoId};

/// The API token used against the index repository.
pub const TOKEN_VAR: &str = "INPUT_TOKEN";
/// The JSON blob describing the triggering event and source repository.
pub const CONTEXT_VAR: &str = "GITHUB_CONTEXT";
/// Base URL of the hosting server, e.g. `https://github.com`.
pub const SERVER_URL_VAR: &str = "GITHUB_SERVER_URL";
/// Optional override for the package name (defaults to the repository name).
pub const PACKAGE_NAME_VAR: &str = "INPUT_PACKAGE_NAME";
/// Optional override for the index repository.
pub const INDEX_REPO_VAR: &str = "INPUT_PYPI_REPO";

/// Index repository used when [`INDEX_REPO_VAR`] is not set.
pub const DEFAULT_INDEX_REPO: &str = "42maru-ai/pypi";

/// An API token. Redacted in `Debug` and `Display` output.
#[derive(Clone)]
pub struct Token(String);

impl Token {
    pub fn new(s: impl Into<String>) -> Self {
        Token(s.into())
    }

    /// Returns the secret value, for handing to an API client.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(****)")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

/// Validation error enumerating every missing or malformed field.
#[derive(Debug, Error)]
#[error("invalid environment configuration: {}", problems.join("; "))]
pub struct SettingsError {
    pub problems: Vec<String>,
}

/// Process-wide configuration. Constructed once at start, immutable after.
#[derive(Debug, Clone)]
pub struct Settings {
    /// API token for the index repository.
    pub token: Token,

    /// Explicit package-name override, if configured.
    pub package_name: Option<PackageName>,

    /// The index repository issues are filed on.
    pub index_repo: RepoId,

    /// The parsed event context.
    pub context: GithubContext,

    /// Base URL of the hosting server.
    pub server_url: String,
}

impl Settings {
    /// Reads and validates the configuration from the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        let mut problems = Vec::new();

        let token = match required_var(TOKEN_VAR) {
            Ok(value) => Some(Token::new(value)),
            Err(problem) => {
                problems.push(problem);
                None
            }
        };

        let server_url = match required_var(SERVER_URL_VAR) {
            Ok(value) => Some(value),
            Err(problem) => {
                problems.push(problem);
                None
            }
        };

        let context = match required_var(CONTEXT_VAR) {
            Ok(value) => match events::parse_context(value.as_bytes()) {
                Ok(context) => Some(context),
                Err(e) => {
                    problems.push(format!("{CONTEXT_VAR}: {e}"));
                    None
                }
            },
            Err(problem) => {
                problems.push(problem);
                None
            }
        };

        let package_name = optional_var(PACKAGE_NAME_VAR).map(PackageName::new);

        let index_repo = match optional_var(INDEX_REPO_VAR) {
            Some(value) => match RepoId::parse(&value) {
                Ok(repo) => Some(repo),
                Err(e) => {
                    problems.push(format!("{INDEX_REPO_VAR}: {e}"));
                    None
                }
            },
            // The default is a constant in `owner/repo` form.
            None => RepoId::parse(DEFAULT_INDEX_REPO).ok(),
        };

        match (token, server_url, context, index_repo) {
            (Some(token), Some(server_url), Some(context), Some(index_repo))
                if problems.is_empty() =>
            {
                Ok(Settings {
                    token,
                    package_name,
                    index_repo,
                    context,
                    server_url,
                })
            }
            _ => Err(SettingsError { problems }),
        }
    }

    /// The package name for this run: the explicit override if configured,
    /// otherwise the source repository's name.
    pub fn package_name(&self) -> PackageName {
        self.package_name
            .clone()
            .unwrap_or_else(|| PackageName::new(self.context.repository.repo.clone()))
    }
}

fn required_var(name: &str) -> Result<String, String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        Ok(_) => Err(format!("{name}: set but empty")),
        Err(VarError::NotPresent) => Err(format!("{name}: not set")),
        Err(VarError::NotUnicode(_)) => Err(format!("{name}: not valid UTF-8")),
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ReleaseAction;

    const CONTEXT_JSON: &str = r#"{
        "event": {
            "action": "created",
            "release": {
                "id": 101,
                "name": "First release",
                "tag_name": "v1.2.3",
                "author": { "login": "octocat" },
                "body": "notes",
                "created_at": "2024-03-01T12:00:00Z",
                "draft": false
            }
        },
        "repository": "acme/widgets"
    }"#;

    fn full_env() -> Vec<(&'static str, Option<&'static str>)> {
        vec![
            (TOKEN_VAR, Some("ghp_secret")),
            (CONTEXT_VAR, Some(CONTEXT_JSON)),
            (SERVER_URL_VAR, Some("https://github.com")),
            (PACKAGE_NAME_VAR, None),
            (INDEX_REPO_VAR, None),
        ]
    }

    #[test]
    fn loads_from_full_environment() {
        temp_env::with_vars(full_env(), || {
            let settings = Settings::from_env().unwrap();
            assert_eq!(settings.token.expose(), "ghp_secret");
            assert_eq!(settings.server_url, "https://github.com");
            assert_eq!(settings.context.event.action, ReleaseAction::Created);
            assert_eq!(settings.index_repo, RepoId::parse(DEFAULT_INDEX_REPO).unwrap());
        });
    }

    #[test]
    fn package_name_defaults_to_repository_name() {
        temp_env::with_vars(full_env(), || {
            let settings = Settings::from_env().unwrap();
            assert_eq!(settings.package_name(), PackageName::new("widgets"));
        });
    }

    #[test]
    fn package_name_override_wins() {
        let mut vars = full_env();
        vars[3] = (PACKAGE_NAME_VAR, Some("my-widgets"));
        temp_env::with_vars(vars, || {
            let settings = Settings::from_env().unwrap();
            assert_eq!(settings.package_name(), PackageName::new("my-widgets"));
        });
    }

    #[test]
    fn index_repo_override_wins() {
        let mut vars = full_env();
        vars[4] = (INDEX_REPO_VAR, Some("acme/index"));
        temp_env::with_vars(vars, || {
            let settings = Settings::from_env().unwrap();
            assert_eq!(settings.index_repo, RepoId::new("acme", "index"));
        });
    }

    #[test]
    fn missing_required_fields_are_all_reported() {
        let vars = vec![
            (TOKEN_VAR, None),
            (CONTEXT_VAR, Some(CONTEXT_JSON)),
            (SERVER_URL_VAR, None),
            (PACKAGE_NAME_VAR, None),
            (INDEX_REPO_VAR, None),
        ];
        temp_env::with_vars(vars, || {
            let err = Settings::from_env().unwrap_err();
            assert_eq!(err.problems.len(), 2);
            assert!(err.problems.iter().any(|p| p.starts_with(TOKEN_VAR)));
            assert!(err.problems.iter().any(|p| p.starts_with(SERVER_URL_VAR)));
        });
    }

    #[test]
    fn malformed_context_is_reported_by_variable_name() {
        let mut vars = full_env();
        vars[1] = (CONTEXT_VAR, Some("{ not json"));
        temp_env::with_vars(vars, || {
            let err = Settings::from_env().unwrap_err();
            assert!(err.problems.iter().any(|p| p.starts_with(CONTEXT_VAR)));
        });
    }

    #[test]
    fn malformed_index_repo_is_reported() {
        let mut vars = full_env();
        vars[4] = (INDEX_REPO_VAR, Some("not-a-repo"));
        temp_env::with_vars(vars, || {
            let err = Settings::from_env().unwrap_err();
            assert!(err.problems.iter().any(|p| p.starts_with(INDEX_REPO_VAR)));
        });
    }

    #[test]
    fn empty_required_var_is_rejected() {
        let mut vars = full_env();
        vars[0] = (TOKEN_VAR, Some(""));
        temp_env::with_vars(vars, || {
            let err = Settings::from_env().unwrap_err();
            assert!(err.problems.iter().any(|p| p.contains("set but empty")));
        });
    }

    #[test]
    fn token_is_redacted_in_debug_output() {
        let token = Token::new("ghp_secret");
        assert_eq!(format!("{token:?}"), "Token(****)");
        assert_eq!(token.to_string(), "****");
        assert!(!format!("{token:?}").contains("secret"));
    }
}
