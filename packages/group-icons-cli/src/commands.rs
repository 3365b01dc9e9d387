// Commands
//
// One function per subcommand. Each returns what the binary prints.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use group_icons::{
    IconRegistry, IconResolver, IconSession, LabelMatcher, NodeModulesIconSets, PluginOptions,
    StylesheetGenerator,
};
use tracing::info;

use crate::documents::{collect_documents, extract_from_documents};

fn resolver_for(options: &PluginOptions) -> Result<IconResolver> {
    let icon_sets = NodeModulesIconSets::new(options.icon_set_roots.iter().cloned());
    Ok(IconResolver::new(Arc::new(icon_sets), &options.fetch)?)
}

/// The stylesheet for every label found in the matched documents.
pub async fn generate(patterns: &[String], options: &PluginOptions) -> Result<String> {
    let files = collect_documents(patterns)?;
    let mut session = IconSession::new();
    let labels = extract_from_documents(&files, &mut session)?;
    info!(
        documents = files.len(),
        labels = labels.len(),
        "generating stylesheet"
    );

    let registry = IconRegistry::with_overrides(&options.custom_icon);
    let resolver = resolver_for(options)?;
    Ok(StylesheetGenerator::new(&resolver)
        .generate_for(&labels, &registry)
        .await)
}

/// One line of `labels` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelReport {
    pub label: String,
    pub key: Option<String>,
    pub icon: Option<String>,
}

impl fmt::Display for LabelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.key, &self.icon) {
            (Some(key), Some(icon)) => write!(f, "{}\t{}\t{}", self.label, key, icon),
            _ => write!(f, "{}\t-", self.label),
        }
    }
}

/// Every label found, with the key and icon it matched.
pub fn labels(patterns: &[String], options: &PluginOptions) -> Result<Vec<LabelReport>> {
    let files = collect_documents(patterns)?;
    let mut session = IconSession::new();
    let labels = extract_from_documents(&files, &mut session)?;

    let registry = IconRegistry::with_overrides(&options.custom_icon);
    let matcher = LabelMatcher::new(&registry);
    Ok(labels
        .iter()
        .map(|label| {
            let matched = matcher.best_match(label);
            LabelReport {
                label: label.to_string(),
                key: matched.map(|(key, _)| key.to_string()),
                icon: matched.map(|(_, icon)| icon.to_string()),
            }
        })
        .collect())
}

/// The CSS-encoded SVG for one icon reference. Unlike stylesheet generation,
/// a failure here is an error.
pub async fn resolve(icon: &str, options: &PluginOptions) -> Result<String> {
    let resolver = resolver_for(options)?;
    Ok(resolver.try_resolve(icon).await?)
}

/// Options from `path`, or the defaults rooted at the current directory.
pub fn load_options(path: Option<&PathBuf>) -> Result<PluginOptions> {
    match path {
        Some(path) => PluginOptions::load(path),
        None => Ok(PluginOptions::default()),
    }
}
