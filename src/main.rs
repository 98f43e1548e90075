//! Draftgen: render issue and pull request drafts from YAML templates.
//!
//! This is the main entry point for the `draftgen` CLI. It parses arguments,
//! dispatches to the appropriate command handler, and handles errors with
//! proper exit codes.

mod cli;
mod commands;
pub mod config;
pub mod draft;
pub mod env;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod fallback;
pub mod fs;
pub mod render;
pub mod resolve;
pub mod settings;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
