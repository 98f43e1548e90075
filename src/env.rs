//! Command environment for variable resolution.
//!
//! Commands run with an explicit environment map rather than the ambient
//! process environment: a snapshot of the process environment, overlaid with
//! an optional dotenv file and the repository identifier. The process
//! environment itself is never mutated.

use crate::error::{DraftError, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Environment variable read by the hosting platform CLI to select a repository.
pub const REPO_ENV_VAR: &str = "GH_REPO";

/// Dotenv file looked up in the current directory when `--env-file` is omitted.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Explicit environment passed to every variable command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandEnv {
    vars: BTreeMap<String, String>,
}

impl CommandEnv {
    /// An empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current process environment (non-UTF-8 entries skipped).
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        }
    }

    /// Overlay entries from a dotenv file.
    ///
    /// When `required` is false a missing file is ignored. A malformed file is
    /// always an error. Returns the number of entries applied.
    pub fn overlay_file<P: AsRef<Path>>(&mut self, path: P, required: bool) -> Result<usize> {
        let path = path.as_ref();

        if !path.exists() {
            if required {
                return Err(DraftError::Config(format!(
                    "env file '{}' not found",
                    path.display()
                )));
            }
            return Ok(0);
        }

        let entries = dotenvy::from_path_iter(path).map_err(|e| {
            DraftError::Config(format!(
                "failed to read env file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut applied = 0;
        for entry in entries {
            let (key, value) = entry.map_err(|e| {
                DraftError::Config(format!(
                    "failed to parse env file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            self.vars.insert(key, value);
            applied += 1;
        }

        Ok(applied)
    }

    /// Set a variable, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Get a variable.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// The non-blank repository identifier, if one is set.
    pub fn repository(&self) -> Option<&str> {
        self.get(REPO_ENV_VAR).filter(|r| !r.trim().is_empty())
    }

    /// Iterate over all entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// True if the environment has no entries.
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CommandEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_overlay_file_sets_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        std::fs::write(&path, "GH_REPO=owner/repo\n# comment\nTOKEN=\"quoted value\"\n").unwrap();

        let mut env = CommandEnv::new();
        let applied = env.overlay_file(&path, true).unwrap();

        assert_eq!(applied, 2);
        assert_eq!(env.get("GH_REPO"), Some("owner/repo"));
        assert_eq!(env.get("TOKEN"), Some("quoted value"));
        assert_eq!(env.repository(), Some("owner/repo"));
    }

    #[test]
    fn test_overlay_file_overrides_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        std::fs::write(&path, "GH_REPO=from/file\n").unwrap();

        let mut env: CommandEnv = [("GH_REPO", "from/process"), ("HOME", "/home/x")]
            .into_iter()
            .collect();
        env.overlay_file(&path, false).unwrap();

        assert_eq!(env.get("GH_REPO"), Some("from/file"));
        assert_eq!(env.get("HOME"), Some("/home/x"));
    }

    #[test]
    fn test_missing_optional_file_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let mut env = CommandEnv::new();

        let applied = env.overlay_file(temp_dir.path().join(".env"), false).unwrap();
        assert_eq!(applied, 0);
        assert!(env.is_empty());
    }

    #[test]
    fn test_missing_required_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let mut env = CommandEnv::new();

        let err = env
            .overlay_file(temp_dir.path().join("custom.env"), true)
            .unwrap_err();
        assert!(matches!(err, DraftError::Config(_)));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        std::fs::write(&path, "VALID=1\nthis line has no equals sign\n").unwrap();

        let mut env = CommandEnv::new();
        let err = env.overlay_file(&path, false).unwrap_err();
        assert!(err.to_string().contains("failed to parse env file"));
    }

    #[test]
    fn test_blank_repository_is_none() {
        let mut env = CommandEnv::new();
        assert_eq!(env.repository(), None);

        env.set(REPO_ENV_VAR, "  ");
        assert_eq!(env.repository(), None);

        env.set(REPO_ENV_VAR, "owner/repo");
        assert_eq!(env.repository(), Some("owner/repo"));
    }

    #[test]
    fn test_from_process_snapshot() {
        let env = CommandEnv::from_process();
        // PATH is present in any environment that can run the test suite.
        assert!(env.get("PATH").is_some());
        assert_eq!(env.len(), env.iter().count());
    }
}
