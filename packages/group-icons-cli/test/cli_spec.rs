//! CLI Command Tests
//!
//! Commands run against rendered documents written to a temp directory.

use std::fs;
use std::path::Path;

use group_icons::{IconSession, PluginOptions, BASE_CSS};
use group_icons_cli::{
    collect_documents, extract_from_documents, generate, labels, load_options, resolve,
    LabelReport,
};
use pretty_assertions::assert_eq;

const TOOL_SVG: &str = "<svg><rect/></svg>";

fn write_site(root: &Path) {
    fs::create_dir_all(root.join("guide")).unwrap();
    fs::write(
        root.join("index.html"),
        r#"<div class="vp-code-group"><label data-title="acme" for="tab-1">acme</label><label data-title="notes.txt" for="tab-2">notes.txt</label></div>"#,
    )
    .unwrap();
    fs::write(
        root.join("guide/setup.html"),
        r#"<span class="vp-code-block-title-text" data-title="acme.config">acme.config</span>"#,
    )
    .unwrap();
}

fn options() -> PluginOptions {
    let mut options = PluginOptions::default();
    options
        .custom_icon
        .insert("acme".to_string(), TOOL_SVG.to_string());
    options
}

fn pattern(root: &Path) -> Vec<String> {
    vec![format!("{}/**/*.html", root.display())]
}

#[test]
fn should_collect_documents_sorted() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());

    let mut patterns = pattern(dir.path());
    patterns.push(format!("{}/index.html", dir.path().display()));
    let files = collect_documents(&patterns).unwrap();

    assert_eq!(
        files,
        vec![dir.path().join("guide/setup.html"), dir.path().join("index.html")]
    );
}

#[test]
fn should_reject_invalid_pattern() {
    assert!(collect_documents(&["docs/[".to_string()]).is_err());
}

#[test]
fn should_extract_labels_in_path_order() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());
    let files = collect_documents(&pattern(dir.path())).unwrap();
    let mut session = IconSession::new();

    let labels = extract_from_documents(&files, &mut session).unwrap();

    assert_eq!(
        labels.iter().collect::<Vec<_>>(),
        vec!["acme.config", "acme", "notes.txt"]
    );
}

#[test]
fn should_report_matched_and_unmatched_labels() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());

    let reports = labels(&pattern(dir.path()), &options()).unwrap();

    assert_eq!(
        reports[0],
        LabelReport {
            label: "acme.config".to_string(),
            key: Some("acme".to_string()),
            icon: Some(TOOL_SVG.to_string()),
        }
    );
    assert_eq!(reports[2].to_string(), "notes.txt\t-");
}

#[tokio::test]
async fn should_generate_stylesheet_for_documents() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path());

    let css = generate(&pattern(dir.path()), &options()).await.unwrap();

    assert!(css.starts_with(BASE_CSS));
    assert!(css.contains("[data-title='acme.config']::before,[data-title='acme']::before {"));
    assert!(!css.contains("notes.txt"));
}

#[tokio::test]
async fn should_fail_resolve_for_missing_collection() {
    let dir = tempfile::tempdir().unwrap();
    let mut options = PluginOptions::default();
    options.icon_set_roots = vec![dir.path().to_path_buf()];

    let err = resolve("nosuchset:icon", &options).await.unwrap_err();

    assert!(err.to_string().contains("@iconify-json/nosuchset"));
}

#[tokio::test]
async fn should_resolve_inline_icon() {
    let svg = resolve(TOOL_SVG, &PluginOptions::default()).await.unwrap();
    assert_eq!(
        svg,
        "%3Csvg xmlns='http://www.w3.org/2000/svg' %3E%3Crect/%3E%3C/svg%3E"
    );
}

#[test]
fn should_use_defaults_without_config() {
    let options = load_options(None).unwrap();
    assert!(options.custom_icon.is_empty());
}
