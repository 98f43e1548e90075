//! Template rendering for draft templates.
//!
//! Templates use `{{ name }}` placeholders:
//!
//! ```text
//! ---
//! title: "[{{ branch }}] {{ issue_title_text }}"
//! ---
//! {{ body }}
//! ```
//!
//! - Whitespace inside the braces is optional: `{{name}}` and `{{  name }}`
//!   both refer to `name`.
//! - A placeholder whose name is not in the context is left exactly as written.
//! - Rendering is a single left-to-right pass; substituted values are never
//!   re-scanned, so a value containing `{{ x }}` is emitted literally.

mod template;

#[cfg(test)]
mod tests;

pub use template::{Placeholder, VariableLookup, placeholders, render, render_templates};

#[cfg(test)]
pub use template::vars;

use crate::config::TemplateField;

/// The five templates of a draft after rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedTemplates {
    pub filename: String,
    pub title: String,
    pub body: String,
    pub assignees: String,
    pub labels: String,
}

impl RenderedTemplates {
    /// Get the rendered value for a field.
    pub fn get(&self, field: TemplateField) -> &str {
        match field {
            TemplateField::Filename => &self.filename,
            TemplateField::Title => &self.title,
            TemplateField::Body => &self.body,
            TemplateField::Assignees => &self.assignees,
            TemplateField::Labels => &self.labels,
        }
    }
}
