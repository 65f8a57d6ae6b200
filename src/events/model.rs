//! Typed release event model.
//!
//! These types are the validated form of the event context the CI environment
//! injects for a release workflow run. They are constructed once by
//! [`super::parser::parse_context`] and never mutated afterwards.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::RepoId;

/// Lifecycle action of a release event.
///
/// This enum contains only the actions the registrar handles. Any other action
/// string in the payload is rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseAction {
    /// A release was published for the first time.
    Created,
    /// A release was edited after publication.
    Updated,
    /// A release was removed.
    Deleted,
}

impl ReleaseAction {
    /// Returns the action's wire name (`created`, `updated`, `deleted`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseAction::Created => "created",
            ReleaseAction::Updated => "updated",
            ReleaseAction::Deleted => "deleted",
        }
    }
}

impl fmt::Display for ReleaseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The author of a release.
///
/// Only the login is required downstream (the extractor writes it into the
/// issue body); the rest of the author object is carried as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseAuthor {
    /// The author's login name.
    pub login: String,

    /// Remaining author metadata, kept verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A release as described by the event payload.
///
/// Immutable record; supplied by the event payload and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    /// The release's numeric identifier.
    pub id: u64,

    /// The release title (used as the package's short description).
    pub name: String,

    /// The git tag the release points at.
    ///
    /// Absent on drafts that have not been assigned a tag yet.
    pub tag_name: Option<String>,

    /// The author of the release.
    pub author: ReleaseAuthor,

    /// The release notes (used as the package's long description).
    pub body: String,

    /// When the release was created.
    pub created_at: DateTime<Utc>,

    /// Whether the release is a draft.
    pub draft: bool,
}

/// A release event: the action plus the embedded release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseEvent {
    /// The action that triggered this event.
    pub action: ReleaseAction,

    /// Fields changed by an edit, keyed by field name.
    ///
    /// Only present on `updated` events.
    pub changes: Option<serde_json::Map<String, serde_json::Value>>,

    /// The release the event describes.
    pub release: Release,
}

/// The event context injected by the CI environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubContext {
    /// The release event this run reacts to.
    pub event: ReleaseEvent,

    /// The source repository the release was cut on.
    pub repository: RepoId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_action_wire_format() {
        // Verify snake_case serialization
        assert_eq!(
            serde_json::to_string(&ReleaseAction::Created).unwrap(),
            "\"created\""
        );
        assert_eq!(
            serde_json::to_string(&ReleaseAction::Updated).unwrap(),
            "\"updated\""
        );
        assert_eq!(
            serde_json::to_string(&ReleaseAction::Deleted).unwrap(),
            "\"deleted\""
        );
    }

    #[test]
    fn release_action_display_matches_wire_format() {
        for action in [
            ReleaseAction::Created,
            ReleaseAction::Updated,
            ReleaseAction::Deleted,
        ] {
            let wire = serde_json::to_string(&action).unwrap();
            assert_eq!(wire, format!("\"{action}\""));
        }
    }
}
