//! Issue-template filling: rule tables and the field extractor.
//!
//! This module turns a fetched issue-template file plus the values of the
//! current run into the title, labels, and body of the issue to be filed.

pub mod extract;
pub mod rules;

pub use extract::{ExtractError, IssueContent, TemplateValues, extract, normalize_version};
pub use rules::{Field, Rule, RuleKind, Target, rules_for};
