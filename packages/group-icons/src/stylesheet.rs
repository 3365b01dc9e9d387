//! Stylesheet Generation
//!
//! Builds the icon stylesheet: fixed layout rules for title bars and tabs,
//! followed by one rule per matched icon carrying the icon as a data URI.

use futures::future::join_all;
use tracing::debug;

use crate::icons::IconResolver;
use crate::labels::LabelSet;
use crate::matcher::{match_labels, MatchGroup};
use crate::registry::IconRegistry;

/// Layout rules emitted whether or not any label matched.
pub const BASE_CSS: &str = r#"
.vp-code-block-title [data-title]::before,
.vp-code-group [data-title]::before {
  display: inline-block;
  width: 1em;
  height: 1em;
  margin-right: 0.5em;
  margin-bottom: -0.2em;
  background: var(--icon) no-repeat center / contain;
}

.vp-code-block-title-bar {
  position: relative;
  margin: 16px -24px 0 -24px;
  background-color: var(--vp-code-block-bg);
  overflow-x: auto;
  font-size: 14px;
  font-weight: 500;
  color: var(--vp-code-tab-text-color);
  white-space: nowrap;
  transition: background-color 0.5s;
  border-radius: 8px 8px 0 0;
  padding: 0 12px;
  box-shadow: inset 0 -1px var(--vp-code-tab-divider);
}

.custom-block .vp-code-block-title-bar {
  margin: 16px 0 0 0;
}

@media (min-width: 640px) {
  .vp-code-block-title-bar {
    margin: 16px 0 0 0;
  }
}

.vp-code-block-title-text {
  padding: 0 12px;
  line-height: 48px;
}

.vp-code-block-title div[class*=language-] {
  margin-top: 0 !important;
  border-top-left-radius: 0 !important;
  border-top-right-radius: 0 !important;
}
"#;

pub struct StylesheetGenerator<'a> {
    resolver: &'a IconResolver,
}

impl<'a> StylesheetGenerator<'a> {
    pub fn new(resolver: &'a IconResolver) -> Self {
        Self { resolver }
    }

    /// Match, resolve and render in one go.
    pub async fn generate_for(&self, labels: &LabelSet, registry: &IconRegistry) -> String {
        let groups = match_labels(labels, registry);
        debug!(
            labels = labels.len(),
            icons = groups.len(),
            "generating icon stylesheet"
        );
        self.generate(&groups).await
    }

    /// All icons are resolved concurrently; rules keep the group order.
    pub async fn generate(&self, groups: &MatchGroup) -> String {
        let rules = join_all(groups.iter().map(|(icon, labels)| async move {
            let svg = self.resolver.resolve(icon).await;
            icon_rule(labels, &svg)
        }))
        .await;

        let mut css = String::from(BASE_CSS);
        for rule in rules {
            css.push_str(&rule);
        }
        css
    }
}

/// One rule for every label sharing an icon. An empty `svg` still yields a
/// rule, with an empty data URI.
pub fn icon_rule(labels: &[String], svg: &str) -> String {
    let selector = labels
        .iter()
        .map(|label| format!("[data-title='{}']::before", escape_css_string(label)))
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "\n{} {{\n  content: '';\n  --icon: url(\"data:image/svg+xml,{}\");\n}}",
        selector, svg
    )
}

/// Escape a value for a single-quoted CSS string.
fn escape_css_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\a "),
            _ => out.push(ch),
        }
    }
    out
}
