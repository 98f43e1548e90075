//! Rendered drafts and their on-disk format.
//!
//! Issue drafts use YAML frontmatter followed by the markdown body:
//!
//! ```text
//! ---
//! title: "Crash on \"save\""
//! assignees: octocat
//! labels: bug
//! ---
//! Steps to reproduce...
//! ```
//!
//! Pull request drafts contain the rendered body only.

mod output;

pub use output::{OutputLocation, determine_output_dir, validate_filename_safe, write_draft};

use crate::config::DraftKind;
use crate::render::RenderedTemplates;

/// A fully rendered draft, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub kind: DraftKind,
    pub templates: RenderedTemplates,
}

impl Draft {
    pub fn new(kind: DraftKind, templates: RenderedTemplates) -> Self {
        Self { kind, templates }
    }

    /// The rendered file name.
    pub fn filename(&self) -> &str {
        &self.templates.filename
    }

    /// File content for this draft's kind.
    pub fn to_markdown(&self) -> String {
        match self.kind {
            DraftKind::Issue => self.to_issue_markdown(),
            DraftKind::PullRequest => self.templates.body.clone(),
        }
    }

    fn to_issue_markdown(&self) -> String {
        let t = &self.templates;

        let mut output = String::new();
        output.push_str("---\n");
        output.push_str(&format!("title: \"{}\"\n", escape_title(&t.title)));
        output.push_str(&format!("assignees: {}\n", t.assignees.trim()));
        output.push_str(&format!("labels: {}\n", t.labels.trim()));
        output.push_str("---\n");
        output.push_str(&t.body);
        if !t.body.ends_with('\n') {
            output.push('\n');
        }
        output
    }
}

/// Escape a title for a double-quoted YAML scalar: `\` then `"`.
///
/// Newlines are folded to spaces; a title is a single line.
pub fn escape_title(title: &str) -> String {
    title
        .trim()
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace(['\r', '\n'], " ")
}
