//! Command implementations for draftgen.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the setup shared by every command: settings,
//! command environment, progress output and the optional event log.

mod generate;
mod preview;

use crate::cli::Command;
use crate::config::{DraftKind, VariableSpec};
use crate::env::{CommandEnv, DEFAULT_ENV_FILE, REPO_ENV_VAR};
use crate::error::Result;
use crate::events::{Event, EventLog};
use crate::resolve::{ResolveObserver, ResolvedContext, ResolvedVariable, SkipReason};
use crate::settings::{DEFAULT_SETTINGS_FILE, Settings};
use std::path::{Path, PathBuf};

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Issue(args) => generate::cmd_issue(args),
        Command::Pr(args) => generate::cmd_pr(args),
        Command::Preview(args) => preview::cmd_preview(args),
    }
}

/// Load `settings.json`.
///
/// An explicitly named file must exist; the default file is optional.
fn load_settings(path: Option<&Path>) -> Result<Option<Settings>> {
    match path {
        Some(path) => Settings::load_optional(path, true),
        None => Settings::load_optional(DEFAULT_SETTINGS_FILE, false),
    }
}

/// Build the environment variable commands run with.
///
/// Process environment, overlaid with the dotenv file, then `GH_REPO` from
/// `--repo` or settings when either is given.
fn build_command_env(
    env_file: Option<&Path>,
    repo: Option<&str>,
    settings: Option<&Settings>,
) -> Result<CommandEnv> {
    let mut env = CommandEnv::from_process();

    match env_file {
        Some(path) => env.overlay_file(path, true)?,
        None => env.overlay_file(DEFAULT_ENV_FILE, false)?,
    };

    let repo = repo
        .filter(|r| !r.trim().is_empty())
        .or_else(|| settings.map(|s| s.repository.as_str()));
    if let Some(repo) = repo {
        env.set(REPO_ENV_VAR, repo);
    }

    Ok(env)
}

/// Optional NDJSON event log for a run.
///
/// Logging failures are reported as warnings and never fail the run.
struct RunLog {
    log: Option<EventLog>,
}

impl RunLog {
    fn new(path: Option<PathBuf>) -> Self {
        Self {
            log: path.map(EventLog::new),
        }
    }

    fn record(&self, event: Event) {
        if let Some(log) = &self.log
            && let Err(e) = log.append(&event)
        {
            eprintln!("Warning: failed to log {} event: {}", event.action, e);
        }
    }
}

/// Prints resolution progress to stdout (results) and stderr (failures).
struct ConsoleObserver;

impl ResolveObserver for ConsoleObserver {
    fn on_start(&mut self, name: &str, command: &str) {
        println!("Executing command for '{}': {}", name, command.trim());
    }

    fn on_resolved(&mut self, variable: &ResolvedVariable) {
        match variable.failure() {
            None => println!(
                "  -> Result for '{}': {} ({} ms)",
                variable.name(),
                variable.text(),
                variable.duration().as_millis()
            ),
            Some(failure) => {
                eprintln!(
                    "  Error executing command for '{}': {}",
                    variable.name(),
                    failure
                );
                eprintln!("  -> Recorded '{}': {}", variable.name(), variable.text());
            }
        }
    }

    fn on_skipped(&mut self, spec: &VariableSpec, reason: SkipReason) {
        let name = if spec.name.is_empty() {
            "<unnamed>"
        } else {
            spec.name.as_str()
        };
        println!("Skipping variable '{}': {}", name, reason.describe());
    }
}

fn print_resolved(context: &ResolvedContext) {
    println!();
    println!("Resolved variables:");
    if context.is_empty() {
        println!("  (none)");
    }
    for variable in context.iter() {
        println!("  {}: {}", variable.name(), variable.text());
    }
}

fn failure_summary(kind: DraftKind, context: &ResolvedContext) -> String {
    let names: Vec<&str> = context.failures().map(|v| v.name()).collect();
    format!(
        "{} variable(s) failed for {}: {}\n\
         Fix: check the commands in the config, or rerun without --strict.",
        names.len(),
        kind,
        names.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DraftError;
    use crate::test_support::DirGuard;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_load_settings_default_missing_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let _guard = DirGuard::new(temp_dir.path());

        assert!(load_settings(None).unwrap().is_none());
    }

    #[test]
    fn test_load_settings_explicit_missing_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_settings(Some(&temp_dir.path().join("nope.json"))).unwrap_err();
        assert!(matches!(err, DraftError::Config(_)));
    }

    #[test]
    #[serial]
    fn test_repo_flag_overrides_settings_and_dotenv() {
        let temp_dir = TempDir::new().unwrap();
        let _guard = DirGuard::new(temp_dir.path());
        std::fs::write(".env", "GH_REPO=from/dotenv\n").unwrap();
        let settings = Settings::from_json(r#"{"repository": "from/settings"}"#).unwrap();

        let env = build_command_env(None, Some("from/flag"), Some(&settings)).unwrap();
        assert_eq!(env.repository(), Some("from/flag"));

        let env = build_command_env(None, None, Some(&settings)).unwrap();
        assert_eq!(env.repository(), Some("from/settings"));

        let env = build_command_env(None, None, None).unwrap();
        assert_eq!(env.repository(), Some("from/dotenv"));
    }

    #[test]
    fn test_explicit_env_file_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let err = build_command_env(Some(&temp_dir.path().join("missing.env")), None, None)
            .unwrap_err();
        assert!(matches!(err, DraftError::Config(_)));
    }

    #[test]
    fn test_failure_summary_names_variables() {
        use crate::resolve::CommandFailure;

        let mut ctx = ResolvedContext::new();
        ctx.insert(ResolvedVariable::value("ok", "1"));
        ctx.insert(ResolvedVariable::failed(
            "number",
            CommandFailure::NonZeroExit {
                code: Some(1),
                stderr: "boom".to_string(),
            },
        ));

        let summary = failure_summary(DraftKind::Issue, &ctx);
        assert!(summary.starts_with("1 variable(s) failed for issue: number"));
    }

    #[test]
    fn test_run_log_without_path_is_noop() {
        let log = RunLog::new(None);
        log.record(Event::new(crate::events::EventAction::Preview, DraftKind::Issue));
    }
}
