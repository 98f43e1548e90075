//! CLI argument parsing for draftgen.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Draftgen: render issue and pull request drafts from YAML templates.
///
/// Variables are resolved by running shell commands; their trimmed output is
/// substituted into `{{ name }}` placeholders in the configured templates.
#[derive(Parser, Debug)]
#[command(name = "draftgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available commands for draftgen.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate an issue draft.
    ///
    /// Resolves variables, renders the issue templates, and writes a
    /// frontmatter markdown file under the output directory.
    Issue(IssueArgs),

    /// Generate a pull request draft.
    ///
    /// Resolves variables, renders the templates, and writes the body to the
    /// rendered filename.
    Pr(PrArgs),

    /// Preview an issue draft without writing it.
    ///
    /// Prompt-only variables and missing well-known keys get dummy values.
    Preview(PreviewArgs),
}

/// Arguments for the `issue` command.
#[derive(Parser, Debug, Default)]
pub struct IssueArgs {
    /// Issue configuration file.
    #[arg(short, long, default_value = "issue_variables.yml")]
    pub config: PathBuf,

    /// Repository settings file (optional unless given explicitly).
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Dotenv file merged into the command environment (default: .env).
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Repository identifier (owner/repo); overrides settings and GH_REPO.
    #[arg(long)]
    pub repo: Option<String>,

    /// Directory to write the draft to; overrides `reference` and `outputs`.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Project root that `outputs` and `reference` are resolved against.
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Append NDJSON events for this run to the given file.
    #[arg(long)]
    pub event_log: Option<PathBuf>,

    /// Fail without writing if any variable command failed.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `pr` command.
#[derive(Parser, Debug, Default)]
pub struct PrArgs {
    /// Pull request configuration file.
    #[arg(short, long, default_value = "pr_variables.yml")]
    pub config: PathBuf,

    /// Dotenv file merged into the command environment (default: .env).
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Directory to write the draft to (default: current directory).
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Append NDJSON events for this run to the given file.
    #[arg(long)]
    pub event_log: Option<PathBuf>,

    /// Fail without writing if any variable command failed.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `preview` command.
#[derive(Parser, Debug, Default)]
pub struct PreviewArgs {
    /// Issue configuration file.
    #[arg(short, long, default_value = "issue_variables.yml")]
    pub config: PathBuf,

    /// Repository settings file (optional unless given explicitly).
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Dotenv file merged into the command environment (default: .env).
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Repository identifier (owner/repo); overrides settings and GH_REPO.
    #[arg(long)]
    pub repo: Option<String>,

    /// Append NDJSON events for this run to the given file.
    #[arg(long)]
    pub event_log: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_issue_defaults() {
        let cli = Cli::try_parse_from(["draftgen", "issue"]).unwrap();
        let Command::Issue(args) = cli.command else {
            panic!("expected issue command");
        };
        assert_eq!(args.config, PathBuf::from("issue_variables.yml"));
        assert!(args.settings.is_none());
        assert!(!args.strict);
    }

    #[test]
    fn test_issue_flags() {
        let cli = Cli::try_parse_from([
            "draftgen",
            "issue",
            "--config",
            "cfg.yml",
            "--repo",
            "owner/repo",
            "--output-dir",
            "drafts",
            "--event-log",
            "events.ndjson",
            "--strict",
        ])
        .unwrap();
        let Command::Issue(args) = cli.command else {
            panic!("expected issue command");
        };
        assert_eq!(args.config, PathBuf::from("cfg.yml"));
        assert_eq!(args.repo.as_deref(), Some("owner/repo"));
        assert_eq!(args.output_dir, Some(PathBuf::from("drafts")));
        assert_eq!(args.event_log, Some(PathBuf::from("events.ndjson")));
        assert!(args.strict);
    }

    #[test]
    fn test_pr_defaults() {
        let cli = Cli::try_parse_from(["draftgen", "pr"]).unwrap();
        let Command::Pr(args) = cli.command else {
            panic!("expected pr command");
        };
        assert_eq!(args.config, PathBuf::from("pr_variables.yml"));
        assert!(args.output_dir.is_none());
    }

    #[test]
    fn test_preview_rejects_write_flags() {
        assert!(Cli::try_parse_from(["draftgen", "preview", "--output-dir", "x"]).is_err());
        assert!(Cli::try_parse_from(["draftgen", "preview", "--strict"]).is_err());
    }
}
