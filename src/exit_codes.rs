//! Exit code constants for the draftgen CLI.
//!
//! - 0: Success (individual variable failures do not change this)
//! - 1: Configuration error (missing/malformed file, missing section or setting)
//! - 2: Output error (unsafe filename, write failure)
//! - 3: Strict mode: one or more variables failed to resolve

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Configuration error: the run aborted before any variable was resolved.
pub const CONFIG_ERROR: i32 = 1;

/// Output error: templates were rendered but the draft could not be written.
pub const OUTPUT_FAILURE: i32 = 2;

/// Strict mode only: at least one variable command failed.
pub const RESOLUTION_FAILURE: i32 = 3;
