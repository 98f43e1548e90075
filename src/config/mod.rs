//! Configuration model for draftgen.
//!
//! A config document is a YAML file with an `issue` and/or `pull_request`
//! section. Each section declares the variables to resolve, optional prompts,
//! and the templates (`filename`, `title`, `body`, `assignees`, `labels`),
//! either as flat keys or as a `format` list of single-key mappings.
//!
//! Unknown fields are ignored for forward compatibility.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::{ConfigDocument, DraftConfig, SectionConfig};
pub use types::{DraftKind, PromptSpec, TemplateField, TemplateSet, VariableSpec};
