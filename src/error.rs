//! Error types for the draftgen CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//! Command failures during variable resolution are not errors here: they are
//! recorded per variable (see `resolve::Resolution`) and only surface as
//! `DraftError::Resolution` when the caller opts into strict mode.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for draftgen operations.
#[derive(Error, Debug)]
pub enum DraftError {
    /// Configuration could not be loaded: missing file, malformed YAML/JSON,
    /// missing section or required setting.
    #[error("{0}")]
    Config(String),

    /// The rendered draft could not be written.
    #[error("Output failed: {0}")]
    Output(String),

    /// One or more variables failed to resolve (strict mode).
    #[error("Variable resolution failed: {0}")]
    Resolution(String),
}

impl DraftError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            DraftError::Config(_) => exit_codes::CONFIG_ERROR,
            DraftError::Output(_) => exit_codes::OUTPUT_FAILURE,
            DraftError::Resolution(_) => exit_codes::RESOLUTION_FAILURE,
        }
    }
}

/// Result type alias for draftgen operations.
pub type Result<T> = std::result::Result<T, DraftError>;
