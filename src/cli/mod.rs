//! CLI command handlers for KLE Keycaps.
//!
//! This module provides headless, scriptable access to the decoder for
//! automation, testing, and CI/CD integration.

pub mod common;
pub mod config;
pub mod inspect;
pub mod summary;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use inspect::InspectArgs;
pub use summary::SummaryArgs;
