//! Configuration types and defaults for draftgen.
//!
//! This module defines the draft kinds, variable and prompt declarations,
//! and the template set that the `issue`/`pull_request` sections resolve to.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The kind of draft a configuration document describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftKind {
    /// An issue draft, written with YAML frontmatter.
    Issue,
    /// A pull request draft, written as the rendered body only.
    PullRequest,
}

impl DraftKind {
    /// Top-level YAML key holding this kind's section.
    pub fn section_key(&self) -> &'static str {
        match self {
            DraftKind::Issue => "issue",
            DraftKind::PullRequest => "pull_request",
        }
    }

    /// Config file looked up in the current directory when `--config` is omitted.
    pub fn default_config_file(&self) -> &'static str {
        match self {
            DraftKind::Issue => "issue_variables.yml",
            DraftKind::PullRequest => "pr_variables.yml",
        }
    }
}

impl fmt::Display for DraftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section_key())
    }
}

/// One variable to resolve.
///
/// Entries normally carry a `command`; prompt-only entries carry a `prompt`
/// instead and are never executed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariableSpec {
    /// Variable name, referenced as `{{ name }}` in templates.
    pub name: String,

    /// Shell command whose trimmed stdout becomes the value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Prompt text for variables filled in by a person rather than a command.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl VariableSpec {
    /// Create a command-backed variable.
    pub fn command(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: Some(command.into()),
            ..Default::default()
        }
    }

    /// Create a prompt-only variable.
    pub fn prompt(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prompt: Some(prompt.into()),
            ..Default::default()
        }
    }

    /// The command to run, if the entry has both a name and a non-blank command.
    pub fn runnable_command(&self) -> Option<&str> {
        if self.name.is_empty() {
            return None;
        }
        self.command.as_deref().filter(|c| !c.trim().is_empty())
    }
}

/// A prompt shown to the person preparing the draft.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptSpec {
    /// Context key the answer is stored under.
    pub name: String,

    /// Prompt text; may itself contain placeholders.
    pub prompt: String,
}

/// One of the five templates every draft is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateField {
    Filename,
    Title,
    Body,
    Assignees,
    Labels,
}

impl TemplateField {
    /// All fields, in render order.
    pub const ALL: [TemplateField; 5] = [
        TemplateField::Filename,
        TemplateField::Title,
        TemplateField::Body,
        TemplateField::Assignees,
        TemplateField::Labels,
    ];

    /// YAML key for this field.
    pub fn key(&self) -> &'static str {
        match self {
            TemplateField::Filename => "filename",
            TemplateField::Title => "title",
            TemplateField::Body => "body",
            TemplateField::Assignees => "assignees",
            TemplateField::Labels => "labels",
        }
    }
}

/// The fixed set of templates for one draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSet {
    pub filename: String,
    pub title: String,
    pub body: String,
    pub assignees: String,
    pub labels: String,
}

impl TemplateSet {
    /// Get the template for a field.
    pub fn get(&self, field: TemplateField) -> &str {
        match field {
            TemplateField::Filename => &self.filename,
            TemplateField::Title => &self.title,
            TemplateField::Body => &self.body,
            TemplateField::Assignees => &self.assignees,
            TemplateField::Labels => &self.labels,
        }
    }

    fn slot(&mut self, field: TemplateField) -> &mut String {
        match field {
            TemplateField::Filename => &mut self.filename,
            TemplateField::Title => &mut self.title,
            TemplateField::Body => &mut self.body,
            TemplateField::Assignees => &mut self.assignees,
            TemplateField::Labels => &mut self.labels,
        }
    }

    /// Replace the template for a field.
    pub fn set(&mut self, field: TemplateField, template: impl Into<String>) {
        *self.slot(field) = template.into();
    }

    /// Defaults used for issue documents when a template is not configured.
    pub fn issue_defaults() -> Self {
        Self {
            filename: DEFAULT_ISSUE_FILENAME.to_string(),
            title: "{{ issue_title_text }}".to_string(),
            body: "{{ body }}".to_string(),
            assignees: "{{ assignees }}".to_string(),
            labels: "{{ labels }}".to_string(),
        }
    }
}

/// Default issue filename template.
pub const DEFAULT_ISSUE_FILENAME: &str = "issue_{{next_issue_number}}.md";

/// Output directory name used when the section has no usable `reference`.
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";
