//! Release event context: typed model and parser.
//!
//! This module provides:
//! - Typed representations of the release event the registrar reacts to
//! - A parser from the raw `GITHUB_CONTEXT` JSON blob to the typed model

pub mod model;
pub mod parser;

pub use model::{GithubContext, Release, ReleaseAction, ReleaseAuthor, ReleaseEvent};
pub use parser::{ParseError, parse_context};
