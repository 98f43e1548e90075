//! Implementation of the `draftgen issue` and `draftgen pr` commands.
//!
//! Both run the same pipeline:
//!
//! 1. Load the config section (abort on any config error)
//! 2. Resolve variables in order, recording failures as sentinels
//! 3. In strict mode, abort if any variable failed
//! 4. Render the templates against the resolved context
//! 5. Write the draft atomically into the output directory

use super::{
    ConsoleObserver, RunLog, build_command_env, failure_summary, load_settings, print_resolved,
};
use crate::cli::{IssueArgs, PrArgs};
use crate::config::{DraftConfig, DraftKind, PromptSpec};
use crate::draft::{Draft, determine_output_dir, validate_filename_safe, write_draft};
use crate::env::{CommandEnv, REPO_ENV_VAR};
use crate::error::{DraftError, Result};
use crate::events::{Event, EventAction};
use crate::render::{VariableLookup, render, render_templates};
use crate::resolve::{ResolvedContext, Resolver, Shell};
use serde_json::json;
use std::path::{Path, PathBuf};

/// Execute the `draftgen issue` command.
pub fn cmd_issue(args: IssueArgs) -> Result<()> {
    let config = DraftConfig::load(&args.config, DraftKind::Issue)?;
    let settings = load_settings(args.settings.as_deref())?;
    let env = build_command_env(
        args.env_file.as_deref(),
        args.repo.as_deref(),
        settings.as_ref(),
    )?;

    let repo = env.repository().ok_or_else(|| {
        DraftError::Config(format!(
            "repository is not set\n\
             Fix: pass --repo owner/repo, set 'repository' in settings.json, or set {}.",
            REPO_ENV_VAR
        ))
    })?;
    println!("Using {}: {}", REPO_ENV_VAR, repo);

    let root = match args.root {
        Some(root) => root,
        None => current_dir()?,
    };

    let log = RunLog::new(args.event_log);
    let context = generate(&DraftRequest {
        config: &config,
        env: &env,
        root: &root,
        output_dir: args.output_dir.as_deref(),
        strict: args.strict,
        log: &log,
    })?;

    print_next_steps(&config.section.prompts, &context);
    Ok(())
}

/// Execute the `draftgen pr` command.
pub fn cmd_pr(args: PrArgs) -> Result<()> {
    let config = DraftConfig::load(&args.config, DraftKind::PullRequest)?;
    let env = build_command_env(args.env_file.as_deref(), None, None)?;
    let root = current_dir()?;

    let log = RunLog::new(args.event_log);
    generate(&DraftRequest {
        config: &config,
        env: &env,
        root: &root,
        output_dir: args.output_dir.as_deref(),
        strict: args.strict,
        log: &log,
    })?;

    Ok(())
}

/// Everything one generation run needs, passed explicitly.
struct DraftRequest<'a> {
    config: &'a DraftConfig,
    env: &'a CommandEnv,
    root: &'a Path,
    output_dir: Option<&'a Path>,
    strict: bool,
    log: &'a RunLog,
}

/// Run the pipeline; returns the resolved context for follow-up output.
fn generate(request: &DraftRequest<'_>) -> Result<ResolvedContext> {
    let config = request.config;
    let kind = config.kind;

    // Config problems surface before any command runs.
    let templates = config.templates()?;
    let shell = Shell::from_config(config.section.shell.as_deref())?;
    if config.section.shell.is_some() {
        println!("Using shell: {}", shell.command_line());
    }

    let context = Resolver::new(shell, request.env)
        .resolve_with(&config.section.variables, &mut ConsoleObserver);
    print_resolved(&context);
    request.log.record(Event::resolved(kind, &context));

    if request.strict && context.has_failures() {
        return Err(DraftError::Resolution(failure_summary(kind, &context)));
    }

    println!();
    println!("Rendering templates...");
    let rendered = render_templates(&templates, &context);
    println!("  Rendered filename: {}", rendered.filename);
    request.log.record(
        Event::new(EventAction::Render, kind).with_details(json!({
            "filename": rendered.filename,
        })),
    );

    validate_filename_safe(&rendered.filename)?;
    let location = determine_output_dir(config, request.root, request.output_dir)?;
    if let Some(reason) = &location.fallback_reason {
        eprintln!(
            "Warning: {}; writing to current directory '{}' instead",
            reason,
            location.dir.display()
        );
    }

    let draft = Draft::new(kind, rendered);
    let path = write_draft(&draft, &location.dir)?;
    println!("Draft written: {}", path.display());
    request.log.record(
        Event::new(EventAction::Write, kind).with_details(json!({
            "path": path.display().to_string(),
            "failed_variables": context.failures().count(),
        })),
    );

    Ok(context)
}

/// Print configured prompts, rendered against the context, as next steps.
fn print_next_steps<L: VariableLookup + ?Sized>(prompts: &[PromptSpec], context: &L) {
    let lines = next_steps(prompts, context);
    if lines.is_empty() {
        return;
    }

    println!();
    println!("Next steps:");
    for line in lines {
        println!("  {}", line);
    }
}

fn next_steps<L: VariableLookup + ?Sized>(prompts: &[PromptSpec], context: &L) -> Vec<String> {
    prompts
        .iter()
        .filter(|p| !p.name.is_empty())
        .map(|p| format!("- For '{}': {}", p.name, render(p.prompt.trim(), context)))
        .collect()
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| {
        DraftError::Config(format!("failed to determine current directory: {}", e))
    })
}
