//! Variable resolution.
//!
//! Runs each configured `(name, command)` pair in order and records the
//! trimmed stdout under the name. Resolution is best-effort: a failing command
//! is recorded as a [`Resolution::Failed`] entry and the batch continues, so
//! every runnable spec always ends up in the context. Callers decide whether
//! failures are acceptable (see `--strict`).
//!
//! Commands run strictly one after another with no timeout.

mod context;
mod shell;


pub use context::{Resolution, ResolvedContext, ResolvedVariable};
pub use shell::{CommandFailure, EXEC_ERROR_SENTINEL, NOT_FOUND_SENTINEL, Shell};

use crate::config::VariableSpec;
use crate::env::CommandEnv;
use std::time::Instant;

/// Why a variable entry was not executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The entry has no name.
    MissingName,
    /// The entry has a prompt instead of a command.
    PromptOnly,
    /// The entry has neither a command nor a prompt.
    MissingCommand,
    /// A previous entry already resolved this name.
    Duplicate,
}

impl SkipReason {
    pub fn describe(&self) -> &'static str {
        match self {
            SkipReason::MissingName => "missing name",
            SkipReason::PromptOnly => "prompt-only variable",
            SkipReason::MissingCommand => "missing command",
            SkipReason::Duplicate => "name already resolved",
        }
    }
}

/// Progress callbacks for a resolution batch.
///
/// All methods default to no-ops.
pub trait ResolveObserver {
    /// Called before a command runs.
    fn on_start(&mut self, _name: &str, _command: &str) {}

    /// Called after a command finished (successfully or not).
    fn on_resolved(&mut self, _variable: &ResolvedVariable) {}

    /// Called for entries that are not executed.
    fn on_skipped(&mut self, _spec: &VariableSpec, _reason: SkipReason) {}
}

/// Observer that ignores every event.
pub struct SilentObserver;

impl ResolveObserver for SilentObserver {}

/// Runs variable commands with a fixed shell and environment.
#[derive(Debug, Clone)]
pub struct Resolver<'a> {
    shell: Shell,
    env: &'a CommandEnv,
}

impl<'a> Resolver<'a> {
    pub fn new(shell: Shell, env: &'a CommandEnv) -> Self {
        Self { shell, env }
    }

    /// Resolve all specs, in order.
    pub fn resolve(&self, specs: &[VariableSpec]) -> ResolvedContext {
        self.resolve_with(specs, &mut SilentObserver)
    }

    /// Resolve all specs, in order, reporting progress to `observer`.
    ///
    /// Never fails: command failures become `Resolution::Failed` entries.
    pub fn resolve_with(
        &self,
        specs: &[VariableSpec],
        observer: &mut dyn ResolveObserver,
    ) -> ResolvedContext {
        let mut context = ResolvedContext::new();

        for spec in specs {
            if let Some(reason) = skip_reason(spec, &context) {
                observer.on_skipped(spec, reason);
                continue;
            }

            // skip_reason guarantees a runnable command here.
            let Some(command) = spec.runnable_command() else {
                continue;
            };

            observer.on_start(&spec.name, command);
            let variable = self.resolve_one(&spec.name, command);
            observer.on_resolved(&variable);
            context.insert(variable);
        }

        context
    }

    /// Run a single command and wrap its outcome.
    pub fn resolve_one(&self, name: &str, command: &str) -> ResolvedVariable {
        let started = Instant::now();
        let variable = match self.shell.run(command, self.env) {
            Ok(value) => ResolvedVariable::value(name, value),
            Err(failure) => ResolvedVariable::failed(name, failure),
        };
        variable.with_command(command, started.elapsed())
    }
}

/// Resolve `specs` with the system shell and the given environment.
pub fn resolve(specs: &[VariableSpec], env: &CommandEnv) -> ResolvedContext {
    Resolver::new(Shell::system(), env).resolve(specs)
}

fn skip_reason(spec: &VariableSpec, context: &ResolvedContext) -> Option<SkipReason> {
    if spec.name.is_empty() {
        return Some(SkipReason::MissingName);
    }
    if spec.runnable_command().is_none() {
        return Some(if spec.prompt.is_some() {
            SkipReason::PromptOnly
        } else {
            SkipReason::MissingCommand
        });
    }
    if context.contains(&spec.name) {
        return Some(SkipReason::Duplicate);
    }
    None
}
