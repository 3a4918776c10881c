//! University information data model and GitHub contributor statistics.
//!
//! This crate re-exports the workspace libraries:
//! - [`unistats_core`]: report aggregation and configuration types
//! - [`unistats_db`]: schema, upsert helpers and entity access functions
//! - [`unistats_github`]: GitHub API client and report generation
//! - [`unistats_api`]: HTTP handlers

pub use unistats_api;
pub use unistats_core;
pub use unistats_db;
pub use unistats_github;
