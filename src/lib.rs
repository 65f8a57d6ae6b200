//! Release Registrar - files issues on an issue-based package index in
//! response to release events on a source repository.
//!
//! The pipeline is a single pass: read configuration from the environment,
//! pick the issue template matching the release action, fill its marker lines
//! from the release values, and create the issue on the index repository.

pub mod events;
pub mod links;
pub mod registry;
pub mod run;
pub mod settings;
pub mod template;
pub mod types;
