//! Implementation of the `draftgen preview` command.
//!
//! A dry run of issue generation: variables are resolved, prompts are shown,
//! missing values get dummy placeholders, and every template is printed next
//! to its rendered value. Nothing is written except the optional event log.

use super::{ConsoleObserver, RunLog, build_command_env, load_settings, print_resolved};
use crate::cli::PreviewArgs;
use crate::config::{DraftConfig, DraftKind, TemplateField, TemplateSet};
use crate::error::Result;
use crate::events::{Event, EventAction};
use crate::fallback::{fill_dummy_values, prompt_dummy};
use crate::render::{Placeholder, placeholders, render};
use crate::resolve::{ResolvedContext, Resolver, Shell};
use serde_json::json;
use std::collections::HashMap;

/// Execute the `draftgen preview` command.
pub fn cmd_preview(args: PreviewArgs) -> Result<()> {
    let config = DraftConfig::load(&args.config, DraftKind::Issue)?;
    let settings = load_settings(args.settings.as_deref())?;
    let env = build_command_env(
        args.env_file.as_deref(),
        args.repo.as_deref(),
        settings.as_ref(),
    )?;
    let templates = config.templates()?;
    let shell = Shell::from_config(config.section.shell.as_deref())?;

    println!("--- Variables ---");
    let context =
        Resolver::new(shell, &env).resolve_with(&config.section.variables, &mut ConsoleObserver);
    print_resolved(&context);

    let default_assignee = settings.as_ref().and_then(|s| s.default_assignee());
    let preview = build_preview(&config, &templates, &context, default_assignee);

    println!();
    println!("--- Prompts ---");
    if preview.prompts.is_empty() {
        println!("  (none)");
    }
    for (name, text) in &preview.prompts {
        println!("  {}: {}", name, text);
    }

    if !preview.filled.is_empty() {
        println!();
        println!("Filled with dummy values:");
        for key in &preview.filled {
            println!("  {}: {}", key, preview.values[key]);
        }
    }

    println!();
    println!("--- Templates ---");
    for row in &preview.rows {
        println!();
        println!("{} template: {}", row.field.key(), row.template);
        println!("  rendered: {}", row.rendered);
    }

    if !preview.unresolved.is_empty() {
        println!();
        println!("Unresolved placeholders (left as written):");
        for (field, placeholder) in &preview.unresolved_at {
            println!(
                "  {}: {} at offset {}",
                field.key(),
                placeholder.raw,
                placeholder.position
            );
        }
    }

    RunLog::new(args.event_log).record(
        Event::new(EventAction::Preview, DraftKind::Issue).with_details(json!({
            "variables": context.len(),
            "failed": context.failures().map(|v| v.name()).collect::<Vec<_>>(),
            "filled": preview.filled,
            "unresolved": preview.unresolved,
        })),
    );

    Ok(())
}

/// One template next to its rendered value.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PreviewRow {
    field: TemplateField,
    template: String,
    rendered: String,
}

/// Everything a preview shows.
#[derive(Debug, Clone)]
struct Preview {
    /// Final context the templates were rendered against.
    values: HashMap<String, String>,
    /// `(name, rendered prompt)` for prompt-only variables, then prompts.
    prompts: Vec<(String, String)>,
    /// Keys that received a dummy value, in fill order.
    filled: Vec<String>,
    rows: Vec<PreviewRow>,
    /// Placeholder names still present after rendering, deduplicated.
    unresolved: Vec<String>,
    /// Every unresolved occurrence, with the rendered field it sits in.
    unresolved_at: Vec<(TemplateField, Placeholder)>,
}

/// Build the preview from a resolved context.
///
/// Prompt-only variables and prompts get `<NAME dummy input>` when absent;
/// prompts are rendered against the context at that point. The well-known
/// fallbacks are applied last and never overwrite present keys.
fn build_preview(
    config: &DraftConfig,
    templates: &TemplateSet,
    context: &ResolvedContext,
    default_assignee: Option<&str>,
) -> Preview {
    let mut values = context.to_values();
    let mut prompts = Vec::new();
    let mut filled = Vec::new();

    for spec in &config.section.variables {
        if spec.name.is_empty() || spec.runnable_command().is_some() {
            continue;
        }
        let Some(prompt) = &spec.prompt else {
            continue;
        };
        prompts.push((spec.name.clone(), prompt.trim().to_string()));
        if !values.contains_key(&spec.name) {
            values.insert(spec.name.clone(), prompt_dummy(&spec.name));
            filled.push(spec.name.clone());
        }
    }

    for prompt in &config.section.prompts {
        if prompt.name.is_empty() {
            continue;
        }
        prompts.push((prompt.name.clone(), render(prompt.prompt.trim(), &values)));
        if !values.contains_key(&prompt.name) {
            values.insert(prompt.name.clone(), prompt_dummy(&prompt.name));
            filled.push(prompt.name.clone());
        }
    }

    filled.extend(
        fill_dummy_values(&mut values, default_assignee)
            .into_iter()
            .map(str::to_string),
    );

    let rows = TemplateField::ALL
        .into_iter()
        .map(|field| {
            let template = match field {
                TemplateField::Filename => templates.get(field).to_string(),
                _ => templates.get(field).trim().to_string(),
            };
            let rendered = render(&template, &values);
            PreviewRow {
                field,
                template,
                rendered,
            }
        })
        .collect::<Vec<_>>();

    let mut unresolved: Vec<String> = Vec::new();
    let mut unresolved_at = Vec::new();
    for row in &rows {
        for placeholder in placeholders(&row.rendered) {
            if !unresolved.contains(&placeholder.name) {
                unresolved.push(placeholder.name.clone());
            }
            unresolved_at.push((row.field, placeholder));
        }
    }

    Preview {
        values,
        prompts,
        filled,
        rows,
        unresolved,
        unresolved_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::ResolvedVariable;

    const CONFIG: &str = r#"
issue:
  variables:
    - name: next_issue_number
      command: echo 42
    - name: issue_title_text
      prompt: "  Title for the issue?  "
  prompts:
    - name: body
      prompt: "Describe {{ issue_title_text }} in #{{ next_issue_number }}"
    - name: labels
      prompt: "Labels?"
  title: "  [{{ next_issue_number }}] {{ issue_title_text }}  "
"#;

    fn resolved(pairs: &[(&str, &str)]) -> ResolvedContext {
        let mut context = ResolvedContext::new();
        for (name, value) in pairs {
            context.insert(ResolvedVariable::value(*name, *value));
        }
        context
    }

    fn preview(context: &ResolvedContext, default_assignee: Option<&str>) -> Preview {
        let config = DraftConfig::from_yaml(CONFIG, DraftKind::Issue).unwrap();
        let templates = config.templates().unwrap();
        build_preview(&config, &templates, context, default_assignee)
    }

    fn row(preview: &Preview, field: TemplateField) -> &PreviewRow {
        preview.rows.iter().find(|r| r.field == field).unwrap()
    }

    #[test]
    fn test_prompt_only_variables_get_dummies() {
        let p = preview(&resolved(&[("next_issue_number", "42")]), None);

        assert_eq!(p.values["issue_title_text"], "<issue_title_text dummy input>");
        assert_eq!(
            row(&p, TemplateField::Title).rendered,
            "[42] <issue_title_text dummy input>"
        );
    }

    #[test]
    fn test_prompts_render_against_dummies_and_fill() {
        let p = preview(&resolved(&[("next_issue_number", "42")]), None);

        assert_eq!(
            p.prompts,
            vec![
                ("issue_title_text".to_string(), "Title for the issue?".to_string()),
                (
                    "body".to_string(),
                    "Describe <issue_title_text dummy input> in #42".to_string()
                ),
                ("labels".to_string(), "Labels?".to_string()),
            ]
        );
        assert_eq!(p.values["body"], "<body dummy input>");
        assert_eq!(p.values["labels"], "<labels dummy input>");
    }

    #[test]
    fn test_fallbacks_and_default_assignee() {
        let p = preview(&resolved(&[]), Some("octocat"));

        assert_eq!(p.values["assignees"], "octocat");
        assert_eq!(row(&p, TemplateField::Assignees).rendered, "octocat");
        assert_eq!(
            p.filled,
            vec!["issue_title_text", "body", "labels", "assignees"]
        );
        // next_issue_number has no fallback and stays a placeholder.
        assert_eq!(
            row(&p, TemplateField::Filename).rendered,
            "issue_{{next_issue_number}}.md"
        );
        assert_eq!(p.unresolved, vec!["next_issue_number"]);
        let (field, placeholder) = &p.unresolved_at[0];
        assert_eq!(*field, TemplateField::Filename);
        assert_eq!(placeholder.raw, "{{next_issue_number}}");
        assert_eq!(placeholder.position, "issue_".len());
    }

    #[test]
    fn test_resolved_values_are_never_replaced() {
        let p = preview(
            &resolved(&[("issue_title_text", "Real title"), ("assignees", "me")]),
            Some("octocat"),
        );

        assert_eq!(p.values["issue_title_text"], "Real title");
        assert_eq!(p.values["assignees"], "me");
        assert!(!p.filled.contains(&"issue_title_text".to_string()));
    }

    #[test]
    fn test_templates_are_trimmed_except_filename() {
        let p = preview(&resolved(&[("next_issue_number", "1")]), None);

        assert_eq!(
            row(&p, TemplateField::Title).template,
            "[{{ next_issue_number }}] {{ issue_title_text }}"
        );
        assert_eq!(row(&p, TemplateField::Filename).rendered, "issue_1.md");
        assert!(p.unresolved.is_empty());
    }

    #[cfg(unix)]
    #[test]
    #[serial_test::serial]
    fn test_cmd_preview_writes_nothing_but_the_event_log() {
        use crate::events::read_events;
        use crate::test_support::{DirGuard, write_config};
        use tempfile::TempDir;

        let temp_dir = TempDir::new().unwrap();
        let _guard = DirGuard::new(temp_dir.path());
        let config = write_config(temp_dir.path(), "issue_variables.yml", CONFIG);
        let log_path = temp_dir.path().join("events.ndjson");

        cmd_preview(PreviewArgs {
            config,
            event_log: Some(log_path.clone()),
            ..Default::default()
        })
        .unwrap();

        assert!(!temp_dir.path().join("outputs").exists());
        assert!(!temp_dir.path().join("issue_42.md").exists());

        let events = read_events(&log_path).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action, EventAction::Preview);
        assert_eq!(events[0].draft, DraftKind::Issue);
        assert_eq!(events[0].details["variables"], 1);
        assert_eq!(events[0].details["unresolved"], serde_json::json!([]));
    }
}
