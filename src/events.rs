//! Event log for draftgen runs.
//!
//! When `--event-log <PATH>` is given, each run appends one JSON object per
//! line (NDJSON) describing what it did:
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: `resolve`, `render`, `write` or `preview`
//! - `actor`: `user@HOST`
//! - `draft`: the draft kind (`issue` or `pull_request`)
//! - `details`: action-specific object

use crate::config::DraftKind;
use crate::error::{DraftError, Result};
use crate::resolve::ResolvedContext;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Variables resolved
    Resolve,
    /// Templates rendered
    Render,
    /// Draft written to disk
    Write,
    /// Dry-run preview shown
    Preview,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::Resolve => write!(f, "resolve"),
            EventAction::Render => write!(f, "render"),
            EventAction::Write => write!(f, "write"),
            EventAction::Preview => write!(f, "preview"),
        }
    }
}

/// An event record for the run log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// When the event occurred.
    pub ts: DateTime<Utc>,

    /// What happened.
    pub action: EventAction,

    /// Who ran it (`user@HOST`).
    pub actor: String,

    /// Which kind of draft the run produced.
    pub draft: DraftKind,

    /// Freeform details object with action-specific information.
    pub details: Value,
}

impl Event {
    /// Create a new event, stamped now, with an empty details object.
    pub fn new(action: EventAction, draft: DraftKind) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: get_actor_string(),
            draft,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    /// Set the details object for this event.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// A `resolve` event summarizing a context.
    pub fn resolved(draft: DraftKind, context: &ResolvedContext) -> Self {
        let failed: Vec<&str> = context.failures().map(|v| v.name()).collect();
        let entries: Vec<Value> = context
            .iter()
            .map(|v| {
                json!({
                    "name": v.name(),
                    "command": v.command(),
                    "failed": v.is_failure(),
                    "duration_ms": v.duration().as_millis() as u64,
                })
            })
            .collect();

        Self::new(EventAction::Resolve, draft).with_details(json!({
            "variables": context.len(),
            "failed": failed,
            "entries": entries,
        }))
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            DraftError::Output(format!("failed to serialize event to JSON: {}", e))
        })
    }
}

/// Get the actor string for event metadata.
fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// An append-only NDJSON event file.
#[derive(Debug, Clone)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one event as a JSON line, creating the file and its parent
    /// directories if needed.
    pub fn append(&self, event: &Event) -> Result<()> {
        let json_line = event.to_ndjson_line()?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| {
                DraftError::Output(format!(
                    "failed to create event log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                DraftError::Output(format!(
                    "failed to open event log '{}': {}",
                    self.path.display(),
                    e
                ))
            })?;

        writeln!(file, "{}", json_line).map_err(|e| {
            DraftError::Output(format!(
                "failed to write event to '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(())
    }
}

/// Read all events from a log file (one JSON object per line).
#[cfg(test)]
pub fn read_events<P: AsRef<Path>>(path: P) -> Result<Vec<Event>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        DraftError::Output(format!(
            "failed to read event log '{}': {}",
            path.display(),
            e
        ))
    })?;

    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            serde_json::from_str(line).map_err(|e| {
                DraftError::Output(format!("failed to parse event line: {}", e))
            })
        })
        .collect()
}
