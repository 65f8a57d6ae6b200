//! Field extraction: fills an issue template from release values.
//!
//! Given raw template bytes and the values for this run, walks the action's
//! rule table in order and produces the issue title, labels, and body. Every
//! marker a rule looks for must be present in the template; a miss means the
//! template and the rule tables have drifted apart and is fatal.

use thiserror::Error;

use crate::events::{Release, ReleaseAction};
use crate::types::PackageName;

use super::rules::{Field, Rule, RuleKind, Target, rules_for};

/// The issue to be filed: title, ordered labels, body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueContent {
    pub title: String,
    pub labels: Vec<String>,
    pub body: String,
}

/// The bag of values a rule table draws from.
///
/// Assembled once per run; the extractor only reads from it.
#[derive(Debug, Clone, Copy)]
pub struct TemplateValues<'a> {
    pub package_name: &'a PackageName,
    pub homepage: &'a str,
    pub link: &'a str,
    pub release: &'a Release,
}

/// Error type for extraction failures. All variants are fatal.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A rule's marker line is missing from the fetched template.
    #[error("template has no match for pattern `{pattern}`")]
    MarkerNotFound { pattern: &'static str },

    /// A captured snippet is not valid UTF-8.
    #[error("template snippet for pattern `{pattern}` is not valid UTF-8")]
    SnippetEncoding {
        pattern: &'static str,
        #[source]
        source: std::str::Utf8Error,
    },

    /// A version-bearing rule ran against a release with no tag.
    #[error("release has no tag to derive a version from")]
    MissingTag,

    /// A version-bearing rule ran against a tag without a leading `v`.
    #[error("release tag `{tag}` does not start with 'v'; no version can be derived")]
    UnversionedTag { tag: String },

    /// The rule table finished without setting a title.
    #[error("rule table for `{action}` produced no title")]
    MissingTitle { action: ReleaseAction },
}

/// Normalizes a release tag into a version string.
///
/// Every leading `v` is stripped (`"vv1"` becomes `"1"`). A tag that does not
/// start with `v` yields no version at all rather than the tag itself; callers
/// treat that as an error.
pub fn normalize_version(tag: &str) -> Option<&str> {
    tag.starts_with('v').then(|| tag.trim_start_matches('v'))
}

/// Applies the rule table for `action` to the template bytes.
///
/// Rules run in table order; each contributes to exactly one of title, labels,
/// or body. Body contributions each end with a newline, so the body is the
/// newline-joined concatenation of the body rules in order.
pub fn extract(
    template: &[u8],
    values: &TemplateValues<'_>,
    action: ReleaseAction,
) -> Result<IssueContent, ExtractError> {
    let mut title = None;
    let mut labels = Vec::new();
    let mut body = String::new();

    for rule in rules_for(action) {
        let snippet = find_snippet(rule, template)?;

        match rule.target {
            Target::Title => {
                // Only one title rule exists per table; last write wins.
                title = Some(format!("{snippet}{}", rendered_value(rule.kind, values)?));
            }
            Target::Labels => labels.push(snippet.to_string()),
            Target::Body => {
                body.push_str(snippet);
                body.push_str(&rendered_value(rule.kind, values)?);
                body.push('\n');
            }
        }
    }

    let title = title.ok_or(ExtractError::MissingTitle { action })?;
    Ok(IssueContent {
        title,
        labels,
        body,
    })
}

fn find_snippet<'t>(rule: &Rule, template: &'t [u8]) -> Result<&'t str, ExtractError> {
    let bytes = rule
        .find_snippet(template)
        .ok_or(ExtractError::MarkerNotFound {
            pattern: rule.pattern,
        })?;
    std::str::from_utf8(bytes).map_err(|source| ExtractError::SnippetEncoding {
        pattern: rule.pattern,
        source,
    })
}

/// Renders the value portion a rule appends after its snippet.
fn rendered_value(
    kind: RuleKind,
    values: &TemplateValues<'_>,
) -> Result<String, ExtractError> {
    match kind {
        RuleKind::Header => Ok(String::new()),
        RuleKind::Version => {
            let tag = values
                .release
                .tag_name
                .as_deref()
                .ok_or(ExtractError::MissingTag)?;
            let version = normalize_version(tag).ok_or_else(|| ExtractError::UnversionedTag {
                tag: tag.to_string(),
            })?;
            Ok(version.to_string())
        }
        RuleKind::Author => Ok(values.release.author.login.clone()),
        RuleKind::LongDesc => Ok(format!("\n```html\n{}\n```", values.release.body)),
        RuleKind::Plain(Field::PackageName) => Ok(values.package_name.to_string()),
        RuleKind::Plain(Field::Homepage) => Ok(values.homepage.to_string()),
        RuleKind::Plain(Field::Link) => Ok(values.link.to_string()),
        RuleKind::Plain(Field::ShortDesc) => Ok(values.release.name.clone()),
    }
}
