//! Label Extractor Tests
//!
//! Rendered documents as produced by the markdown renderer and the component
//! compiler, in all three attribute encodings.

use group_icons::{extract_labels, LabelSet};
use pretty_assertions::assert_eq;

fn ordered(labels: &LabelSet) -> Vec<&str> {
    labels.iter().collect()
}

#[test]
fn should_extract_plain_attributes() {
    let html = r#"<div class="vp-code-group"><div class="tabs"><label data-title="npm" for="tab-1">npm</label><label data-title="yarn" for="tab-2">yarn</label></div></div>"#;
    assert_eq!(ordered(&extract_labels(html)), vec!["npm", "yarn"]);
}

#[test]
fn should_extract_escaped_attributes_from_compiled_components() {
    let code = r#"const _hoisted_1 = "<label data-title=\"pnpm\" for=\"tab-a\">pnpm</label>";"#;
    assert_eq!(ordered(&extract_labels(code)), vec!["pnpm"]);
}

#[test]
fn should_extract_json_properties() {
    let code = r#"_createElementVNode("span", { class: "x", "data-title": "vite.config.ts" })"#;
    assert_eq!(ordered(&extract_labels(code)), vec!["vite.config.ts"]);
}

#[test]
fn should_keep_document_order_across_encodings() {
    let code = concat!(
        r#"{"data-title": "bun"} "#,
        r#"<span data-title="deno"></span> "#,
        r#""<label data-title=\"npm\">""#,
    );
    assert_eq!(ordered(&extract_labels(code)), vec!["bun", "deno", "npm"]);
}

#[test]
fn should_deduplicate_repeated_labels() {
    let html = r#"<span data-title="npm"></span><span data-title="npm"></span><span data-title="NPM"></span>"#;
    assert_eq!(ordered(&extract_labels(html)), vec!["npm", "NPM"]);
}

#[test]
fn should_accept_empty_title() {
    let labels = extract_labels(r#"<span data-title=""></span>"#);
    assert_eq!(labels.len(), 1);
    assert!(labels.contains(""));
}

#[test]
fn should_ignore_similar_attribute_names() {
    assert!(extract_labels(r#"<span my-data-title-x="npm"></span>"#).is_empty());
    assert!(extract_labels(r#"<span data-titles="npm"></span>"#).is_empty());
}
