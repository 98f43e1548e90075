//! The resolved context: variable name → outcome, in resolution order.

use super::shell::CommandFailure;
use crate::render::VariableLookup;
use std::collections::HashMap;
use std::time::Duration;

/// Outcome of resolving one variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The command succeeded (or a value was supplied directly).
    Value(String),
    /// The command failed; the batch continued.
    Failed(CommandFailure),
}

/// One entry of the resolved context.
#[derive(Debug, Clone)]
pub struct ResolvedVariable {
    name: String,
    command: Option<String>,
    resolution: Resolution,
    duration: Duration,
    /// Value as seen by templates: the output, or the failure's sentinel.
    text: String,
}

impl ResolvedVariable {
    /// A successfully resolved value.
    pub fn value(name: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            name: name.into(),
            command: None,
            text: value.clone(),
            resolution: Resolution::Value(value),
            duration: Duration::ZERO,
        }
    }

    /// A failed command.
    pub fn failed(name: impl Into<String>, failure: CommandFailure) -> Self {
        Self {
            name: name.into(),
            command: None,
            text: failure.sentinel(),
            resolution: Resolution::Failed(failure),
            duration: Duration::ZERO,
        }
    }

    /// Record the command and how long it took.
    pub fn with_command(mut self, command: impl Into<String>, duration: Duration) -> Self {
        self.command = Some(command.into());
        self.duration = duration;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The command that produced this entry, if any.
    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// The value templates see: the output, or an `ERROR_...` sentinel.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The failure, if the command failed.
    pub fn failure(&self) -> Option<&CommandFailure> {
        match &self.resolution {
            Resolution::Failed(failure) => Some(failure),
            Resolution::Value(_) => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.failure().is_some()
    }
}

/// Mapping from unique variable name to its resolution.
///
/// Entries keep insertion order for display. A name, once inserted, is never
/// overwritten.
#[derive(Debug, Clone, Default)]
pub struct ResolvedContext {
    entries: Vec<ResolvedVariable>,
    index: HashMap<String, usize>,
}

impl ResolvedContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. Returns false (and drops the entry) if the name is
    /// already resolved.
    pub fn insert(&mut self, variable: ResolvedVariable) -> bool {
        if self.index.contains_key(variable.name()) {
            return false;
        }
        self.index
            .insert(variable.name().to_string(), self.entries.len());
        self.entries.push(variable);
        true
    }

    /// The template-facing value for `name`: output or sentinel.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entry(name).map(ResolvedVariable::text)
    }

    /// The full entry for `name`.
    pub fn entry(&self, name: &str) -> Option<&ResolvedVariable> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Entries in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedVariable> {
        self.entries.iter()
    }

    /// Failed entries in resolution order.
    pub fn failures(&self) -> impl Iterator<Item = &ResolvedVariable> {
        self.entries.iter().filter(|v| v.is_failure())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plain name → text map, for layering extra values (fallbacks) on top.
    pub fn to_values(&self) -> HashMap<String, String> {
        self.entries
            .iter()
            .map(|v| (v.name.clone(), v.text.clone()))
            .collect()
    }
}

impl VariableLookup for ResolvedContext {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name)
    }
}
