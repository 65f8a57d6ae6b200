//! Index-repository gateway.
//!
//! This module provides the octocrab-backed client for the index repository:
//! template fetching, the package membership check, and issue creation. There
//! is no retry machinery here; the tool makes one attempt per run, and every
//! API failure aborts the process.

mod client;
mod error;

pub use client::{IndexClient, RegisteredIssue};
pub use error::ApiError;
