//! Config loading, validation, and template extraction.

use super::model::{ConfigDocument, DraftConfig, SectionConfig};
use super::types::{DraftKind, TemplateField, TemplateSet};
use crate::error::{DraftError, Result};
use std::path::Path;

impl DraftConfig {
    /// Load the section for `kind` from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(DraftConfig)` - Successfully loaded and validated config
    /// * `Err(DraftError::Config)` - Missing file, parse error, missing section
    ///   or validation failure
    pub fn load<P: AsRef<Path>>(path: P, kind: DraftKind) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            DraftError::Config(format!(
                "failed to read config file '{}': {}\n\
                 Fix: create {} or pass --config <PATH>.",
                path.display(),
                e,
                kind.default_config_file()
            ))
        })?;

        Self::from_yaml(&content, kind).map_err(|e| match e {
            DraftError::Config(msg) => DraftError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Parse the section for `kind` from a YAML string.
    ///
    /// Unknown fields are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str, kind: DraftKind) -> Result<Self> {
        let document: ConfigDocument = serde_yaml::from_str(yaml)
            .map_err(|e| DraftError::Config(format!("failed to parse config YAML: {}", e)))?;

        let section = match kind {
            DraftKind::Issue => document.issue,
            DraftKind::PullRequest => document.pull_request,
        }
        .ok_or_else(|| {
            DraftError::Config(format!("no '{}' section found", kind.section_key()))
        })?;

        let config = Self { kind, section };
        config.validate()?;
        Ok(config)
    }

    /// Validate the section.
    ///
    /// Validation rules:
    /// - pull request sections must define `filename` and `body`
    /// - `format` entries must hold string (or empty) values for known keys
    /// - `shell`, when set, must not be blank
    pub fn validate(&self) -> Result<()> {
        if self.kind == DraftKind::PullRequest {
            for field in [TemplateField::Filename, TemplateField::Body] {
                if self.template_for(field)?.is_none() {
                    return Err(DraftError::Config(format!(
                        "'{}' section is missing required template '{}'",
                        self.kind.section_key(),
                        field.key()
                    )));
                }
            }
        }

        if let Some(shell) = &self.section.shell
            && shell.trim().is_empty()
        {
            return Err(DraftError::Config(
                "config validation failed: 'shell' must not be blank (omit it to use the default shell)"
                    .to_string(),
            ));
        }

        // Surfaces non-string `format` values early.
        for field in TemplateField::ALL {
            self.template_for(field)?;
        }

        Ok(())
    }

    /// Extract the template set, applying defaults for absent templates.
    ///
    /// Flat keys win over `format` entries. Issue sections fall back to the
    /// issue defaults; pull request sections fall back to empty templates
    /// (their required keys are enforced by `validate`).
    pub fn templates(&self) -> Result<TemplateSet> {
        let mut templates = match self.kind {
            DraftKind::Issue => TemplateSet::issue_defaults(),
            DraftKind::PullRequest => TemplateSet::default(),
        };

        for field in TemplateField::ALL {
            if let Some(template) = self.template_for(field)? {
                templates.set(field, template);
            }
        }

        Ok(templates)
    }

    /// Output directory name derived from the section's `reference` path.
    ///
    /// Returns `None` when there is no reference, or its parent directory is
    /// empty or `.`.
    pub fn reference_output_dir(&self) -> Option<String> {
        let reference = self.section.reference.as_deref()?;
        let parent = Path::new(reference).parent()?.to_string_lossy().to_string();

        let mut dir = parent.as_str();
        while let Some(rest) = dir.strip_prefix("./") {
            dir = rest;
        }
        let dir = dir.trim_start_matches('/');

        if dir.is_empty() || dir == "." {
            None
        } else {
            Some(dir.to_string())
        }
    }

    /// Configured template for a field: flat key first, then `format` entries.
    fn template_for(&self, field: TemplateField) -> Result<Option<String>> {
        if let Some(template) = self.section.flat_template(field) {
            return Ok(Some(template.to_string()));
        }
        format_entry(&self.section, field)
    }
}

/// Look up a field in the `format` list. The last entry naming the field wins.
fn format_entry(section: &SectionConfig, field: TemplateField) -> Result<Option<String>> {
    let mut found = None;

    for entry in &section.format {
        let Some(value) = entry.get(field.key()) else {
            continue;
        };

        let template = match value {
            serde_yaml::Value::String(s) => s.clone(),
            serde_yaml::Value::Null => String::new(),
            serde_yaml::Value::Bool(b) => b.to_string(),
            serde_yaml::Value::Number(n) => n.to_string(),
            _ => {
                return Err(DraftError::Config(format!(
                    "format entry '{}' must be a string template",
                    field.key()
                )));
            }
        };
        found = Some(template);
    }

    Ok(found)
}
