//! Repository settings (`settings.json`).
//!
//! ```json
//! { "repository": "owner/repo", "default-assignee": "octocat" }
//! ```
//!
//! The file is optional. When present, `repository` is required; it is
//! exported to variable commands as `GH_REPO`. `default-assignee` seeds the
//! `assignees` fallback in previews.

use crate::error::{DraftError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings file looked up in the current directory when `--settings` is omitted.
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Parsed repository settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Repository identifier (`owner/repo`).
    #[serde(default)]
    pub repository: String,

    /// Default assignee used when a draft has no assignees.
    #[serde(
        default,
        rename = "default-assignee",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_assignee: Option<String>,
}

impl Settings {
    /// Load settings from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            DraftError::Config(format!(
                "failed to read settings file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_json(&content).map_err(|e| match e {
            DraftError::Config(msg) => DraftError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Load settings if the file exists.
    ///
    /// A missing file is only an error when `required` is true (the path was
    /// named explicitly).
    pub fn load_optional<P: AsRef<Path>>(path: P, required: bool) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() && !required {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    /// Parse and validate settings from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| DraftError::Config(format!("failed to parse settings JSON: {}", e)))?;

        if settings.repository.trim().is_empty() {
            return Err(DraftError::Config(
                "'repository' is not set in settings".to_string(),
            ));
        }

        Ok(settings)
    }

    /// The default assignee, if set and non-blank.
    pub fn default_assignee(&self) -> Option<&str> {
        self.default_assignee
            .as_deref()
            .filter(|a| !a.trim().is_empty())
    }
}
