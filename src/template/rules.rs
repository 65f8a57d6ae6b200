//! Extraction rule tables.
//!
//! An issue template is a markdown file with fixed marker lines (a `title:`
//! front-matter line, a `labels:` line, a colored header, and a number of
//! `- **Label :**` body lines). Each action has its own fixed table of rules;
//! a rule pairs a byte pattern locating one marker with the kind of value that
//! gets appended to it and the output bucket it contributes to.
//!
//! The tables are static and applied strictly in insertion order; the
//! extractor in [`super::extract`] dispatches on [`RuleKind`] with a closed
//! match. Patterns operate on the raw template bytes.

use std::sync::LazyLock;

use regex::bytes::Regex;

use crate::events::ReleaseAction;

/// Output bucket a rule contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Sets the issue title (snippet + value).
    Title,
    /// Appends the snippet to the label list.
    Labels,
    /// Appends snippet + value + newline to the issue body.
    Body,
}

/// Which value from the run feeds a [`RuleKind::Plain`] rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The package name being registered.
    PackageName,
    /// The generated homepage URL of the source repository.
    Homepage,
    /// The generated pip-style install link.
    Link,
    /// The release title, used as the package's short description.
    ShortDesc,
}

/// How a rule combines its captured snippet with a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// The snippet stands alone; no value is appended.
    Header,
    /// Appends the normalized release version (leading `v` stripped).
    Version,
    /// Appends the release author's login.
    Author,
    /// Appends the release notes wrapped in a fenced code block.
    LongDesc,
    /// Appends the named value verbatim.
    Plain(Field),
}

/// A single extraction rule: marker pattern, value kind, output bucket.
#[derive(Debug)]
pub struct Rule {
    pub target: Target,
    pub kind: RuleKind,
    /// Source text of the byte pattern, for error reporting.
    pub pattern: &'static str,
    regex: Regex,
}

impl Rule {
    fn new(target: Target, kind: RuleKind, pattern: &'static str) -> Self {
        Rule {
            target,
            kind,
            pattern,
            regex: Regex::new(pattern).unwrap(),
        }
    }

    /// Returns the first capture group of this rule's pattern in the template,
    /// or `None` if the marker line is missing.
    pub fn find_snippet<'t>(&self, template: &'t [u8]) -> Option<&'t [u8]> {
        self.regex
            .captures(template)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_bytes())
    }
}

// Marker patterns shared by every table.
const TITLE_PATTERN: &str = r#"title: "(.*:)"#;
const LABELS_PATTERN: &str = r"labels: (.*)";
const PACKAGE_NAME_PATTERN: &str = r"(- \*\*Package name :\*\* )";

static CREATED_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(Target::Title, RuleKind::Plain(Field::PackageName), TITLE_PATTERN),
        Rule::new(Target::Labels, RuleKind::Header, LABELS_PATTERN),
        Rule::new(
            Target::Body,
            RuleKind::Header,
            r"(## 🟢 .*\n|🔵 .*\n| 🔴 .* )",
        ),
        Rule::new(Target::Body, RuleKind::Plain(Field::PackageName), PACKAGE_NAME_PATTERN),
        Rule::new(Target::Body, RuleKind::Version, r"(- \*\*Version :\*\* )"),
        Rule::new(Target::Body, RuleKind::Author, r"(- \*\*Author :\*\* )"),
        Rule::new(
            Target::Body,
            RuleKind::Plain(Field::ShortDesc),
            r"(- \*\*Short description :\*\* )",
        ),
        Rule::new(Target::Body, RuleKind::LongDesc, r"(- \*\*Long description :\*\* )"),
        Rule::new(
            Target::Body,
            RuleKind::Plain(Field::Homepage),
            r"(- \*\*Homepage :\*\* )",
        ),
        Rule::new(Target::Body, RuleKind::Plain(Field::Link), r"(- \*\*Link :\*\* )"),
    ]
});

static UPDATED_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(Target::Title, RuleKind::Plain(Field::PackageName), TITLE_PATTERN),
        Rule::new(Target::Labels, RuleKind::Header, LABELS_PATTERN),
        Rule::new(
            Target::Body,
            RuleKind::Header,
            r"(## 🟢 .*\n|## 🔵 .*\n|## 🔴 .*\n)",
        ),
        Rule::new(Target::Body, RuleKind::Plain(Field::PackageName), PACKAGE_NAME_PATTERN),
        Rule::new(Target::Body, RuleKind::Version, r"(- \*\*New version :\*\* )"),
        Rule::new(
            Target::Body,
            RuleKind::Plain(Field::Link),
            r"(- \*\*Link for the new version :\*\* )",
        ),
    ]
});

static DELETED_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(Target::Title, RuleKind::Plain(Field::PackageName), TITLE_PATTERN),
        Rule::new(Target::Labels, RuleKind::Header, LABELS_PATTERN),
        Rule::new(
            Target::Body,
            RuleKind::Header,
            r"(## 🟢 .*\n|## 🔵 .*\n|## 🔴 .*\n)",
        ),
        Rule::new(Target::Body, RuleKind::Plain(Field::PackageName), PACKAGE_NAME_PATTERN),
    ]
});

/// Returns the rule table for the given action.
///
/// Exactly one action selects exactly one table.
pub fn rules_for(action: ReleaseAction) -> &'static [Rule] {
    match action {
        ReleaseAction::Created => &CREATED_RULES,
        ReleaseAction::Updated => &UPDATED_RULES,
        ReleaseAction::Deleted => &DELETED_RULES,
    }
}
