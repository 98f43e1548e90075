//! Config document and section definitions.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw YAML document: one optional section per draft kind.
///
/// Unknown top-level keys are ignored for forward compatibility.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<SectionConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<SectionConfig>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// The `issue` or `pull_request` section of a config document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    // =========================================================================
    // Variables and prompts
    // =========================================================================
    /// Variables resolved in order before rendering.
    pub variables: Vec<VariableSpec>,

    /// Prompts displayed after generation (and in previews).
    pub prompts: Vec<PromptSpec>,

    // =========================================================================
    // Execution and output
    // =========================================================================
    /// Path of a reference template; its parent directory names the output dir.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Shell prefix used to run commands (e.g. `bash -eo pipefail -c`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,

    // =========================================================================
    // Templates (flat form)
    // =========================================================================
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<String>,

    // =========================================================================
    // Templates (list form)
    // =========================================================================
    /// Templates given as a list of single-key mappings, e.g. `- title: "..."`.
    /// Flat keys take precedence over entries here.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub format: Vec<BTreeMap<String, serde_yaml::Value>>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl SectionConfig {
    /// The flat-form template for a field, if configured.
    pub fn flat_template(&self, field: TemplateField) -> Option<&str> {
        match field {
            TemplateField::Filename => self.filename.as_deref(),
            TemplateField::Title => self.title.as_deref(),
            TemplateField::Body => self.body.as_deref(),
            TemplateField::Assignees => self.assignees.as_deref(),
            TemplateField::Labels => self.labels.as_deref(),
        }
    }
}

/// A loaded, validated configuration for one draft kind.
///
/// Passed explicitly into every stage of a run; nothing is read from
/// process-wide state.
#[derive(Debug, Clone)]
pub struct DraftConfig {
    /// Which section was selected.
    pub kind: DraftKind,
    /// The selected section.
    pub section: SectionConfig,
}
