//! Plugin Options
//!
//! Options accepted by the plugin, either built in code or read from a JSON
//! file next to the documentation sources.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::warn;

use crate::icons::{local_icon_loader, strip_svg_prologue};

/// Default upper bound for a single remote icon fetch.
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginOptions {
    /// Label keys mapped to icon references. Wins over the built-in table.
    pub custom_icon: IndexMap<String, String>,
    pub title_bar: TitleBarOptions,
    pub fetch: FetchOptions,
    /// Directories searched, together with their ancestors, for
    /// `node_modules/@iconify-json/<collection>`.
    pub icon_set_roots: Vec<PathBuf>,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            custom_icon: IndexMap::new(),
            title_bar: TitleBarOptions::default(),
            fetch: FetchOptions::default(),
            icon_set_roots: vec![PathBuf::from(".")],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TitleBarOptions {
    /// Also give a title bar to fences imported from snippet files.
    pub include_snippet: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FetchOptions {
    pub timeout_ms: u64,
}

impl FetchOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
        }
    }
}

/// An override value as written in a config file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IconSource {
    Ref(String),
    File { file: PathBuf },
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawOptions {
    custom_icon: IndexMap<String, IconSource>,
    title_bar: TitleBarOptions,
    fetch: FetchOptions,
    icon_set_roots: Option<Vec<PathBuf>>,
}

impl PluginOptions {
    /// Read options from a JSON file. Relative paths inside it are resolved
    /// against the file's directory.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read options from {}", path.display()))?;
        let raw: RawOptions = serde_json::from_str(&content)
            .with_context(|| format!("invalid options in {}", path.display()))?;
        let base_dir = path.parent().unwrap_or(Path::new("."));
        Self::from_raw(raw, base_dir)
    }

    /// Build options from an already parsed JSON value, e.g. one handed over
    /// by a JavaScript host.
    pub fn from_value(value: serde_json::Value, base_dir: &Path) -> anyhow::Result<Self> {
        let raw: RawOptions = serde_json::from_value(value).context("invalid plugin options")?;
        Self::from_raw(raw, base_dir)
    }

    fn from_raw(raw: RawOptions, base_dir: &Path) -> anyhow::Result<Self> {
        let mut custom_icon = IndexMap::with_capacity(raw.custom_icon.len());
        for (key, source) in raw.custom_icon {
            let icon = match source {
                IconSource::Ref(icon) => icon,
                IconSource::File { file } => {
                    let content = local_icon_loader(base_dir, &file).with_context(|| {
                        format!("failed to load icon for `{}` from {}", key, file.display())
                    })?;
                    match strip_svg_prologue(&content) {
                        Some(markup) => markup.to_string(),
                        None => {
                            warn!(key = %key, file = %file.display(), "icon file has no <svg> root");
                            content
                        }
                    }
                }
            };
            custom_icon.insert(key, icon);
        }

        let icon_set_roots = raw
            .icon_set_roots
            .unwrap_or_else(|| vec![PathBuf::from(".")])
            .into_iter()
            .map(|root| if root.is_absolute() { root } else { base_dir.join(root) })
            .collect();

        Ok(Self {
            custom_icon,
            title_bar: raw.title_bar,
            fetch: raw.fetch,
            icon_set_roots,
        })
    }
}
