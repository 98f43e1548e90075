use super::*;
use crate::config::TemplateSet;
use std::collections::{BTreeMap, HashMap};

#[test]
fn test_simple_substitution() {
    let ctx = vars([("name", "World")]);
    assert_eq!(render("Hello {{ name }}", &ctx), "Hello World");
}

#[test]
fn test_missing_key_left_verbatim() {
    let ctx = vars([("a", "x")]);
    assert_eq!(render("{{ a }}-{{ b }}", &ctx), "x-{{ b }}");
}

#[test]
fn test_missing_key_keeps_exact_whitespace() {
    let ctx = HashMap::new();
    let template = "{{b}} {{   c }} {{ d\t}}";
    assert_eq!(render(template, &ctx), template);
}

#[test]
fn test_whitespace_variants_resolve() {
    let ctx = vars([("name", "Alice")]);
    assert_eq!(render("{{name}}|{{ name }}|{{  name  }}", &ctx), "Alice|Alice|Alice");
}

#[test]
fn test_no_placeholders() {
    let ctx = vars([("x", "1")]);
    assert_eq!(render("Just plain text", &ctx), "Just plain text");
    assert_eq!(render("", &ctx), "");
}

#[test]
fn test_multiple_occurrences() {
    let ctx = vars([("x", "X")]);
    assert_eq!(render("{{ x }}-{{x}}-{{ x }}", &ctx), "X-X-X");
}

#[test]
fn test_adjacent_placeholders() {
    let ctx = vars([("a", "A"), ("b", "B")]);
    assert_eq!(render("{{a}}{{b}}", &ctx), "AB");
}

#[test]
fn test_empty_value_substitution() {
    let ctx = vars([("empty", "")]);
    assert_eq!(render("before{{ empty }}after", &ctx), "beforeafter");
}

#[test]
fn test_single_pass_no_recursive_expansion() {
    let ctx = vars([("a", "{{ b }}"), ("b", "boom")]);
    assert_eq!(render("{{ a }}", &ctx), "{{ b }}");
}

#[test]
fn test_self_referencing_value_terminates() {
    let ctx = vars([("loop", "{{ loop }}{{ loop }}")]);
    assert_eq!(render("{{ loop }}", &ctx), "{{ loop }}{{ loop }}");
}

#[test]
fn test_rerender_with_empty_context_is_noop() {
    let empty: HashMap<String, String> = HashMap::new();
    let ctx = vars([("name", "World"), ("branch", "feature/x")]);

    for template in [
        "Hello {{ name }}",
        "{{ a }}-{{ b }}",
        "[{{branch}}] {{ missing }} {{",
        "no placeholders at all",
        "{{ name }}{{ name }}}}",
    ] {
        let once = render(template, &ctx);
        assert_eq!(render(&once, &empty), once, "template: {template}");
    }
}

#[test]
fn test_malformed_braces_pass_through() {
    let ctx = vars([("x", "1")]);
    assert_eq!(render("{{ x", &ctx), "{{ x");
    assert_eq!(render("{ x }", &ctx), "{ x }");
    assert_eq!(render("{{ }}", &ctx), "{{ }}");
    assert_eq!(render("{{ two words }}", &ctx), "{{ two words }}");
}

#[test]
fn test_triple_braces_substitute_inner() {
    let ctx = vars([("x", "1")]);
    assert_eq!(render("{{{ x }}}", &ctx), "{1}");
}

#[test]
fn test_multiline_template() {
    let ctx = vars([("title", "Crash on start"), ("body", "Steps:\n1. run")]);
    let template = "# {{ title }}\n\n{{ body }}\n";
    assert_eq!(render(template, &ctx), "# Crash on start\n\nSteps:\n1. run\n");
}

#[test]
fn test_unicode_in_template_and_values() {
    let ctx = vars([("emoji", "🎉"), ("text", "日本語")]);
    assert_eq!(render("Hello {{ emoji }} {{ text }}!", &ctx), "Hello 🎉 日本語!");
}

#[test]
fn test_btreemap_lookup() {
    let mut ctx = BTreeMap::new();
    ctx.insert("k".to_string(), "v".to_string());
    assert_eq!(render("{{ k }}", &ctx), "v");
}

#[test]
fn test_deterministic() {
    let ctx = vars([("a", "1"), ("b", "2"), ("c", "3")]);
    let template = "{{ c }}{{ b }}{{ a }}{{ d }}";
    let first = render(template, &ctx);
    for _ in 0..10 {
        assert_eq!(render(template, &ctx), first);
    }
}

#[test]
fn test_placeholders_in_order() {
    let found = placeholders("{{ b }} then {{a}} then {{ b }}");
    let names: Vec<_> = found.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["b", "a", "b"]);
    assert_eq!(found[0].position, 0);
    assert_eq!(found[1].raw, "{{a}}");
}

#[test]
fn test_identifiers_are_ascii_only() {
    let ctx = vars([("名前", "X"), ("name_2", "ok")]);
    assert_eq!(render("{{ 名前 }} {{ name_2 }}", &ctx), "{{ 名前 }} ok");
    assert!(placeholders("{{ 名前 }} {{ café }}").is_empty());
}

#[test]
fn test_placeholders_empty() {
    assert!(placeholders("nothing here { x }").is_empty());
}

#[test]
fn test_render_templates_all_fields() {
    let templates = TemplateSet {
        filename: "issue_{{ n }}.md".to_string(),
        title: "{{ title }}".to_string(),
        body: "Body {{ n }}".to_string(),
        assignees: "{{ assignees }}".to_string(),
        labels: "bug".to_string(),
    };
    let ctx = vars([("n", "42"), ("title", "T")]);

    let rendered = render_templates(&templates, &ctx);
    assert_eq!(rendered.filename, "issue_42.md");
    assert_eq!(rendered.title, "T");
    assert_eq!(rendered.body, "Body 42");
    assert_eq!(rendered.assignees, "{{ assignees }}");
    assert_eq!(rendered.labels, "bug");
}
