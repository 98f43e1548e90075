//! Placeholder substitution engine.

use super::RenderedTemplates;
use crate::config::{TemplateField, TemplateSet};
use regex::{Captures, Regex};
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

/// `{{`, optional whitespace, ASCII identifier, optional whitespace, `}}`.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("placeholder pattern is valid")
});

/// Something placeholders can be looked up in.
pub trait VariableLookup {
    /// The value for `name`, or `None` to leave the placeholder untouched.
    fn lookup(&self, name: &str) -> Option<&str>;
}

impl VariableLookup for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl VariableLookup for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// A placeholder occurrence in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// The identifier between the braces.
    pub name: String,
    /// Byte offset of the opening `{{`.
    pub position: usize,
    /// The exact placeholder text, including braces and inner whitespace.
    pub raw: String,
}

/// Render a template string by substituting placeholders.
///
/// Placeholders with no value in `context` are left verbatim. Never fails.
///
/// # Examples
///
/// ```text
/// render("Hello {{ name }}", {name: "World"})  => "Hello World"
/// render("{{ a }}-{{ b }}", {a: "x"})          => "x-{{ b }}"
/// ```
pub fn render<L: VariableLookup + ?Sized>(template: &str, context: &L) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            match context.lookup(&caps[1]) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// List every placeholder in a template, in order of appearance.
pub fn placeholders(template: &str) -> Vec<Placeholder> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(Placeholder {
                name: caps[1].to_string(),
                position: whole.start(),
                raw: whole.as_str().to_string(),
            })
        })
        .collect()
}

/// Render all five templates of a set against the same context.
pub fn render_templates<L: VariableLookup + ?Sized>(
    templates: &TemplateSet,
    context: &L,
) -> RenderedTemplates {
    let field = |f: TemplateField| render(templates.get(f), context);

    RenderedTemplates {
        filename: field(TemplateField::Filename),
        title: field(TemplateField::Title),
        body: field(TemplateField::Body),
        assignees: field(TemplateField::Assignees),
        labels: field(TemplateField::Labels),
    }
}

/// Helper to create a variables map from a list of key-value pairs.
#[cfg(test)]
pub fn vars<I, K, V>(pairs: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
