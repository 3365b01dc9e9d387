//! Plugin
//!
//! The build tool facing side: resolves the virtual stylesheet id, collects
//! labels from transformed documents and serves the generated stylesheet.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::PluginOptions;
use crate::error::Result;
use crate::icons::{IconResolver, IconSetProvider, NodeModulesIconSets};
use crate::labels::{extract_labels, LabelSet};
use crate::registry::IconRegistry;
use crate::session::{IconSession, ModuleHost, RESOLVED_VIRTUAL_CSS_ID, VIRTUAL_CSS_ID};
use crate::stylesheet::StylesheetGenerator;

static DOCUMENT_ID_PATTERNS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"\.md$").unwrap(),
        Regex::new(r"\.md\?vue").unwrap(),
        Regex::new(r"\.md\?v=").unwrap(),
    ]
});

/// Accepts module ids of markdown documents, whether plain, compiled to a
/// component, or versioned. Virtual ids are never accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentFilter;

impl DocumentFilter {
    pub fn accepts(&self, id: &str) -> bool {
        !id.contains('\0') && DOCUMENT_ID_PATTERNS.iter().any(|re| re.is_match(id))
    }
}

/// What a single transform did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformOutcome {
    /// The id passed the document filter.
    pub accepted: bool,
    /// Labels not seen before in this session.
    pub new_labels: usize,
    /// The stylesheet was marked stale by this transform.
    pub invalidated: bool,
}

pub struct GroupIconPlugin {
    registry: Arc<IconRegistry>,
    resolver: IconResolver,
    filter: DocumentFilter,
    session: IconSession,
}

impl GroupIconPlugin {
    pub const NAME: &'static str = "vitepress-plugin-group-icons";

    /// Icon sets come from `node_modules` under `options.icon_set_roots`.
    pub fn new(options: &PluginOptions) -> Result<Self> {
        let icon_sets = NodeModulesIconSets::new(options.icon_set_roots.iter().cloned());
        Self::with_icon_sets(options, Arc::new(icon_sets))
    }

    pub fn with_icon_sets(
        options: &PluginOptions,
        icon_sets: Arc<dyn IconSetProvider>,
    ) -> Result<Self> {
        Ok(Self {
            registry: Arc::new(IconRegistry::with_overrides(&options.custom_icon)),
            resolver: IconResolver::new(icon_sets, &options.fetch)?,
            filter: DocumentFilter,
            session: IconSession::new(),
        })
    }

    pub fn resolve_id(&self, id: &str) -> Option<&'static str> {
        (id == VIRTUAL_CSS_ID).then_some(RESOLVED_VIRTUAL_CSS_ID)
    }

    pub fn configure_server(&mut self, host: Box<dyn ModuleHost>) {
        self.session.attach_host(host);
    }

    /// Collect labels from a transformed document. The code itself is never
    /// rewritten.
    pub fn transform(&mut self, code: &str, id: &str) -> TransformOutcome {
        if !self.filter.accepts(id) {
            return TransformOutcome::default();
        }
        let found = extract_labels(code);
        let new_labels = self.session.record(&found);
        TransformOutcome {
            accepted: true,
            new_labels,
            invalidated: self.session.check_for_changes(),
        }
    }

    /// Snapshot the labels for a load of the stylesheet module. The snapshot
    /// is taken now; the returned job does the slow part.
    pub fn begin_load(&mut self, id: &str) -> Option<StylesheetJob> {
        if id != RESOLVED_VIRTUAL_CSS_ID {
            return None;
        }
        Some(StylesheetJob {
            labels: self.session.take_snapshot(),
            registry: Arc::clone(&self.registry),
            resolver: self.resolver.clone(),
        })
    }

    pub async fn load(&mut self, id: &str) -> Option<String> {
        let job = self.begin_load(id)?;
        Some(job.run().await)
    }

    pub fn session(&self) -> &IconSession {
        &self.session
    }

    pub fn registry(&self) -> &IconRegistry {
        &self.registry
    }

    pub fn resolver(&self) -> &IconResolver {
        &self.resolver
    }
}

/// Stylesheet generation detached from the plugin, so it can run off the
/// host's thread.
pub struct StylesheetJob {
    labels: LabelSet,
    registry: Arc<IconRegistry>,
    resolver: IconResolver,
}

impl StylesheetJob {
    pub fn new(labels: LabelSet, registry: Arc<IconRegistry>, resolver: IconResolver) -> Self {
        Self {
            labels,
            registry,
            resolver,
        }
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub async fn run(self) -> String {
        StylesheetGenerator::new(&self.resolver)
            .generate_for(&self.labels, &self.registry)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_filter_markdown_ids() {
        let filter = DocumentFilter;
        assert!(filter.accepts("/docs/guide/index.md"));
        assert!(filter.accepts("/docs/guide/index.md?vue&type=script"));
        assert!(filter.accepts("/docs/guide/index.md?v=1a2b3c"));
        assert!(!filter.accepts("/docs/guide/index.mdx"));
        assert!(!filter.accepts("/src/main.ts"));
        assert!(!filter.accepts("\0virtual:page.md"));
    }
}
