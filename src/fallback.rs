//! Placeholder values for previews.
//!
//! A preview must always render, even when prompts have not been answered.
//! Well-known keys that are still absent after resolution are filled with
//! fixed dummy strings. Present keys are never overwritten.

use std::collections::HashMap;

/// Fixed fallbacks for well-known keys, in fill order.
pub const DUMMY_VALUES: &[(&str, &str)] = &[
    ("issue_title_text", "<issue title dummy input>"),
    ("body", "<issue body dummy input>"),
    ("labels", "<labels dummy input>"),
];

/// Fallback for `assignees` when no default assignee is configured.
pub const DUMMY_ASSIGNEES: &str = "<assignees dummy input>";

/// Dummy answer for a prompt-only variable or prompt.
pub fn prompt_dummy(name: &str) -> String {
    format!("<{} dummy input>", name)
}

/// Fill absent well-known keys with dummy values.
///
/// `assignees` falls back to `default_assignee` when given. Returns the keys
/// that were filled.
pub fn fill_dummy_values(
    values: &mut HashMap<String, String>,
    default_assignee: Option<&str>,
) -> Vec<&'static str> {
    let mut filled = Vec::new();

    for (key, dummy) in DUMMY_VALUES {
        if !values.contains_key(*key) {
            values.insert(key.to_string(), dummy.to_string());
            filled.push(*key);
        }
    }

    if !values.contains_key("assignees") {
        let assignees = default_assignee.unwrap_or(DUMMY_ASSIGNEES);
        values.insert("assignees".to_string(), assignees.to_string());
        filled.push("assignees");
    }

    filled
}
