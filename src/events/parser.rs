//! Event context parser.
//!
//! This module parses the raw `GITHUB_CONTEXT` JSON blob into a typed
//! [`GithubContext`]. The strategy mirrors how the payload is validated
//! elsewhere in the codebase:
//!
//! 1. Deserialize into permissive `Raw*` structs
//! 2. Validate required fields explicitly
//! 3. Reject unknown action strings and malformed identifiers with a typed
//!    error naming the offending field

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::types::RepoId;

use super::model::{GithubContext, Release, ReleaseAction, ReleaseAuthor, ReleaseEvent};

/// Error type for event context parsing failures.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON deserialization failed (includes missing required fields).
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Field has invalid value (e.g., unknown action, malformed repository).
    #[error("invalid field value for {field}: {value}")]
    InvalidField { field: &'static str, value: String },
}

/// Parses the event context blob into a typed [`GithubContext`].
///
/// Unlike webhook listeners, an Actions run is only ever started for the event
/// it is wired to, so an unknown action is an error here rather than something
/// to ignore.
pub fn parse_context(payload: &[u8]) -> Result<GithubContext, ParseError> {
    let raw: RawContext = serde_json::from_slice(payload)?;

    let action = match raw.event.action.as_str() {
        "created" => ReleaseAction::Created,
        "updated" => ReleaseAction::Updated,
        "deleted" => ReleaseAction::Deleted,
        other => {
            return Err(ParseError::InvalidField {
                field: "event.action",
                value: other.to_string(),
            });
        }
    };

    let repository =
        RepoId::parse(&raw.repository).map_err(|_| ParseError::InvalidField {
            field: "repository",
            value: raw.repository.clone(),
        })?;

    let login = raw
        .event
        .release
        .author
        .login
        .ok_or(ParseError::InvalidField {
            field: "event.release.author.login",
            value: String::from("<missing>"),
        })?;

    Ok(GithubContext {
        event: ReleaseEvent {
            action,
            changes: raw.event.changes,
            release: Release {
                id: raw.event.release.id,
                name: raw.event.release.name,
                tag_name: raw.event.release.tag_name,
                author: ReleaseAuthor {
                    login,
                    extra: raw.event.release.author.extra,
                },
                body: raw.event.release.body,
                created_at: raw.event.release.created_at,
                draft: raw.event.release.draft,
            },
        },
        repository,
    })
}

// ============================================================================
// Raw payload structures for deserialization
//
// These match the event context JSON structure. Optional fields are validated
// explicitly above rather than left to serde's error messages.
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawContext {
    event: RawEvent,
    repository: String,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    action: String,
    changes: Option<serde_json::Map<String, serde_json::Value>>,
    release: RawRelease,
}

#[derive(Debug, Deserialize)]
struct RawRelease {
    id: u64,
    name: String,
    tag_name: Option<String>,
    author: RawAuthor,
    body: String,
    created_at: DateTime<Utc>,
    draft: bool,
}

#[derive(Debug, Deserialize)]
struct RawAuthor {
    login: Option<String>,
    #[serde(flatten)]
    extra: std::collections::BTreeMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_context(action: &str) -> String {
        format!(
            r#"{{
                "event": {{
                    "action": "{action}",
                    "release": {{
                        "id": 101,
                        "name": "First release",
                        "tag_name": "v1.2.3",
                        "author": {{ "login": "octocat", "id": 583231 }},
                        "body": "<p>Initial version.</p>",
                        "created_at": "2024-03-01T12:00:00Z",
                        "draft": false
                    }}
                }},
                "repository": "acme/widgets"
            }}"#
        )
    }

    #[test]
    fn parses_created_context() {
        let ctx = parse_context(sample_context("created").as_bytes()).unwrap();
        assert_eq!(ctx.event.action, ReleaseAction::Created);
        assert_eq!(ctx.repository, RepoId::new("acme", "widgets"));

        let release = &ctx.event.release;
        assert_eq!(release.id, 101);
        assert_eq!(release.name, "First release");
        assert_eq!(release.tag_name.as_deref(), Some("v1.2.3"));
        assert_eq!(release.author.login, "octocat");
        assert_eq!(release.body, "<p>Initial version.</p>");
        assert!(!release.draft);
        // Non-login author fields are carried along verbatim
        assert_eq!(
            release.author.extra.get("id"),
            Some(&serde_json::json!(583231))
        );
    }

    #[test]
    fn parses_deleted_context() {
        let ctx = parse_context(sample_context("deleted").as_bytes()).unwrap();
        assert_eq!(ctx.event.action, ReleaseAction::Deleted);
    }

    #[test]
    fn rejects_unknown_action() {
        let err = parse_context(sample_context("published").as_bytes()).unwrap_err();
        match err {
            ParseError::InvalidField { field, value } => {
                assert_eq!(field, "event.action");
                assert_eq!(value, "published");
            }
            other => panic!("expected InvalidField, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_repository() {
        let payload = sample_context("created").replace("acme/widgets", "not-a-repo");
        let err = parse_context(payload.as_bytes()).unwrap_err();
        match err {
            ParseError::InvalidField { field, .. } => assert_eq!(field, "repository"),
            other => panic!("expected InvalidField, got {other:?}"),
        }
    }

    #[test]
    fn rejects_author_without_login() {
        let payload = sample_context("created")
            .replace(r#""login": "octocat", "#, "");
        let err = parse_context(payload.as_bytes()).unwrap_err();
        match err {
            ParseError::InvalidField { field, .. } => {
                assert_eq!(field, "event.release.author.login");
            }
            other => panic!("expected InvalidField, got {other:?}"),
        }
    }

    #[test]
    fn missing_tag_name_is_allowed() {
        let payload = sample_context("deleted").replace(r#""tag_name": "v1.2.3","#, "");
        let ctx = parse_context(payload.as_bytes()).unwrap();
        assert_eq!(ctx.event.release.tag_name, None);
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = parse_context(b"{ not json").unwrap_err();
        assert!(matches!(err, ParseError::JsonError(_)));
    }

    #[test]
    fn changes_map_is_preserved_when_present() {
        let payload = sample_context("updated").replace(
            r#""action": "updated","#,
            r#""action": "updated", "changes": { "body": { "from": "old" } },"#,
        );
        let ctx = parse_context(payload.as_bytes()).unwrap();
        let changes = ctx.event.changes.expect("changes should be present");
        assert!(changes.contains_key("body"));
    }
}
