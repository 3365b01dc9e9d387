//! Plugin Options Tests
//!
//! Loading options files from disk, including icons read from local SVG files.

use std::fs;
use std::path::PathBuf;

use group_icons::{IconRegistry, PluginOptions};
use pretty_assertions::assert_eq;

#[test]
fn should_load_icon_from_local_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("icons")).unwrap();
    fs::write(dir.path().join("icons/acme.svg"), "<svg><path/></svg>").unwrap();
    let config = dir.path().join("group-icons.json");
    fs::write(
        &config,
        r#"{
            "customIcon": {
                "acme": { "file": "icons/acme.svg" },
                "npm": "logos:npm-icon"
            },
            "titleBar": { "includeSnippet": true },
            "fetch": { "timeoutMs": 2500 }
        }"#,
    )
    .unwrap();

    let options = PluginOptions::load(&config).unwrap();

    assert_eq!(options.custom_icon["acme"], "<svg><path/></svg>");
    assert_eq!(options.custom_icon["npm"], "logos:npm-icon");
    assert!(options.title_bar.include_snippet);
    assert_eq!(options.fetch.timeout_ms, 2500);
    assert_eq!(options.icon_set_roots, vec![dir.path().join(".")]);

    let registry = IconRegistry::with_overrides(&options.custom_icon);
    assert_eq!(registry.get("acme"), Some("<svg><path/></svg>"));
    assert_eq!(registry.get("npm"), Some("logos:npm-icon"));
}

#[test]
fn should_resolve_relative_icon_set_roots() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("options.json");
    fs::write(&config, r#"{ "iconSetRoots": ["site", "/opt/icons"] }"#).unwrap();

    let options = PluginOptions::load(&config).unwrap();

    assert_eq!(
        options.icon_set_roots,
        vec![dir.path().join("site"), PathBuf::from("/opt/icons")]
    );
}

#[test]
fn should_fail_on_missing_icon_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("options.json");
    fs::write(&config, r#"{ "customIcon": { "acme": { "file": "nope.svg" } } }"#).unwrap();

    let err = PluginOptions::load(&config).unwrap_err();

    assert!(format!("{:#}", err).contains("acme"));
}

#[test]
fn should_fail_on_missing_options_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(PluginOptions::load(&dir.path().join("absent.json")).is_err());
}

#[test]
fn should_drop_xml_prologue_from_icon_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("acme.svg"),
        "\u{feff}<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg><path/></svg>\n",
    )
    .unwrap();
    let config = dir.path().join("options.json");
    fs::write(&config, r#"{ "customIcon": { "acme": { "file": "acme.svg" } } }"#).unwrap();

    let options = PluginOptions::load(&config).unwrap();

    assert_eq!(options.custom_icon["acme"], "<svg><path/></svg>");
}
