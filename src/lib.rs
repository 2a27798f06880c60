//! Command-line front end for the `roadplan_core` trip planner.
//!
//! [`run`] executes one parsed command and returns what should be printed
//! on stdout, so the binary stays a thin shell around it.

pub mod cli;
pub mod error;
pub mod model;
pub mod routing;

pub use cli::{Cli, Command, OutputFormat};
pub use error::CliError;
pub use model::Engine;

use serde_json::json;
use tracing::info;

/// Loads the engine described by `cli` and runs its command.
///
/// # Errors
///
/// Returns an error when the configuration, network or registries cannot be
/// loaded, or when a request file cannot be read. Planning failures of
/// individual requests are part of the output instead.
pub fn run(cli: &Cli) -> Result<String, CliError> {
    let engine = Engine::load(cli)?;

    let output = match &cli.command {
        Command::Plan { request, format } => routing::plan_file(&engine, request, *format)?,
        Command::Batch { requests } => routing::plan_batch_file(&engine, requests)?,
        Command::Check => {
            info!("Configuration and data are valid");
            engine.summary()
        }
    };

    Ok(serde_json::to_string_pretty(&output)
        .unwrap_or_else(|e| json!({ "error": e.to_string() }).to_string()))
}
