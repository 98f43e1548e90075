//! Output directory selection and draft writing.

use super::Draft;
use crate::config::types::DEFAULT_OUTPUT_DIR;
use crate::config::{DraftConfig, DraftKind};
use crate::error::{DraftError, Result};
use crate::fs::atomic_write_file;
use std::path::{Path, PathBuf};

/// Where a draft will be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLocation {
    /// Directory the draft goes into (exists after `determine_output_dir`).
    pub dir: PathBuf,
    /// Set when the preferred directory could not be created and the current
    /// directory is used instead.
    pub fallback_reason: Option<String>,
}

/// Pick and create the output directory.
///
/// Precedence: `override_dir`, then the parent directory of the section's
/// `reference` (under `root`), then the kind default: `root/outputs` for
/// issues, `root` itself for pull requests.
///
/// If the chosen directory cannot be created, the current directory is used
/// and `fallback_reason` explains why.
pub fn determine_output_dir(
    config: &DraftConfig,
    root: &Path,
    override_dir: Option<&Path>,
) -> Result<OutputLocation> {
    let preferred = match (override_dir, config.reference_output_dir()) {
        (Some(dir), _) => dir.to_path_buf(),
        (None, Some(reference_dir)) => root.join(reference_dir),
        (None, None) => match config.kind {
            DraftKind::Issue => root.join(DEFAULT_OUTPUT_DIR),
            DraftKind::PullRequest => root.to_path_buf(),
        },
    };

    match std::fs::create_dir_all(&preferred) {
        Ok(()) => Ok(OutputLocation {
            dir: preferred,
            fallback_reason: None,
        }),
        Err(e) => {
            let cwd = std::env::current_dir().map_err(|cwd_err| {
                DraftError::Output(format!(
                    "failed to create output directory '{}': {}; current directory unavailable: {}",
                    preferred.display(),
                    e,
                    cwd_err
                ))
            })?;
            Ok(OutputLocation {
                dir: cwd,
                fallback_reason: Some(format!(
                    "failed to create output directory '{}': {}",
                    preferred.display(),
                    e
                )),
            })
        }
    }
}

/// Reject rendered filenames that would escape the output directory.
pub fn validate_filename_safe(filename: &str) -> Result<()> {
    if filename.trim().is_empty() {
        return Err(DraftError::Output(
            "rendered filename is empty; check the 'filename' template".to_string(),
        ));
    }

    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return Err(DraftError::Output(format!(
            "rendered filename '{}' is not safe: contains path traversal characters",
            filename
        )));
    }

    if filename.starts_with('.') {
        return Err(DraftError::Output(format!(
            "rendered filename '{}' is not safe: starts with '.'",
            filename
        )));
    }

    Ok(())
}

/// Write a draft into `dir` under its rendered filename.
///
/// Returns the path written.
pub fn write_draft(draft: &Draft, dir: &Path) -> Result<PathBuf> {
    validate_filename_safe(draft.filename())?;

    let path = dir.join(draft.filename());
    atomic_write_file(&path, &draft.to_markdown()).map_err(|e| match e {
        DraftError::Output(msg) => DraftError::Output(format!(
            "error writing to file '{}': {}",
            path.display(),
            msg
        )),
        other => other,
    })?;

    Ok(path)
}
