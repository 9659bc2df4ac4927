//! CLI command handlers for HyperLayers.
//!
//! Every subcommand is a clap `Args` struct with an `execute` method returning
//! [`CliResult`](common::CliResult); `main` maps errors to exit codes.

pub mod build;
pub mod common;
pub mod config;
pub mod inspect;
pub mod validate;

// Re-export types used by main.rs and tests
pub use build::BuildArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use inspect::InspectArgs;
pub use validate::ValidateArgs;
