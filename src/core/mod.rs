//! Core infrastructure for changescope
//!
//! - **config**: targets.toml manifest loading
//! - **context**: single-load workspace context shared across commands
//! - **error**: categorized error types with contextual help messages
//! - **vcs**: change detection via system git

pub mod config;
pub mod context;
pub mod error;
pub mod vcs;
