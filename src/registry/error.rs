//! Index-repository API error type.
//!
//! Every API failure is fatal for the run: there is no retry and no local
//! recovery. The error carries a best-effort HTTP status code so the caller
//! can log a useful hint (bad token vs missing template) before aborting.

use std::fmt;

use thiserror::Error;

/// An error from the hosting platform's API.
#[derive(Debug, Error)]
pub struct ApiError {
    /// The HTTP status code, if one could be determined.
    pub status_code: Option<u16>,

    /// A human-readable description of the error.
    pub message: String,

    /// The underlying octocrab error, if available.
    #[source]
    pub source: Option<octocrab::Error>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "API error (HTTP {}): {}", code, self.message),
            None => write!(f, "API error: {}", self.message),
        }
    }
}

impl ApiError {
    /// Wraps an octocrab error, extracting a status code where possible.
    pub fn from_octocrab(err: octocrab::Error) -> Self {
        let message = err.to_string();
        Self {
            status_code: status_from_message(&message),
            message,
            source: Some(err),
        }
    }

    /// Creates an error that did not originate from an API call.
    pub fn without_source(message: impl Into<String>) -> Self {
        Self {
            status_code: None,
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this looks like an authentication/authorization failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status_code, Some(401) | Some(403))
    }

    /// Returns true if this looks like a missing resource.
    pub fn is_not_found(&self) -> bool {
        self.status_code == Some(404)
    }
}

impl From<octocrab::Error> for ApiError {
    fn from(err: octocrab::Error) -> Self {
        ApiError::from_octocrab(err)
    }
}

/// Extracts an HTTP status code from an octocrab error message.
///
/// octocrab does not expose a status accessor across all of its error
/// variants, so this parses the message text and falls back to `None`.
fn status_from_message(message: &str) -> Option<u16> {
    // octocrab formats errors like "GitHub API returned error 404" or
    // includes "status: 404" in messages
    if let Some(idx) = message.find("status: ") {
        let rest = &message[idx + 8..];
        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .map_or(rest.trim(), |end| &rest[..end]);
        if let Ok(code) = digits.parse() {
            return Some(code);
        }
    }

    let lower = message.to_lowercase();
    if message.contains("404") && lower.contains("not found") {
        return Some(404);
    }
    for code in [401u16, 403, 409, 422, 429, 500, 502, 503] {
        if message.contains(&code.to_string()) {
            return Some(code);
        }
    }

    None
}
