//! Label Matching
//!
//! Assigns each label the most specific registry key it contains.

use indexmap::IndexMap;

use crate::labels::LabelSet;
use crate::registry::IconRegistry;

/// Icon reference to the labels that resolved to it, both in first-seen order.
pub type MatchGroup = IndexMap<String, Vec<String>>;

struct FoldedKey<'r> {
    folded: String,
    key: &'r str,
    icon: &'r str,
}

/// Registry keys ordered longest first. The sort is stable, so equal-length
/// keys keep registry order and the earlier one wins.
pub struct LabelMatcher<'r> {
    keys: Vec<FoldedKey<'r>>,
}

impl<'r> LabelMatcher<'r> {
    pub fn new(registry: &'r IconRegistry) -> Self {
        let mut keys: Vec<_> = registry
            .iter()
            .map(|(key, icon)| FoldedKey {
                folded: key.to_lowercase(),
                key,
                icon,
            })
            .collect();
        keys.sort_by(|a, b| b.folded.len().cmp(&a.folded.len()));
        Self { keys }
    }

    /// The key and icon a label resolves to. Both sides are case-folded, so
    /// override keys such as `Dockerfile` match too.
    pub fn best_match(&self, label: &str) -> Option<(&'r str, &'r str)> {
        let folded = label.to_lowercase();
        self.keys
            .iter()
            .find(|entry| folded.contains(entry.folded.as_str()))
            .map(|entry| (entry.key, entry.icon))
    }

    pub fn icon_for(&self, label: &str) -> Option<&'r str> {
        self.best_match(label).map(|(_, icon)| icon)
    }

    /// Group labels by icon. Labels matching no key are left out.
    pub fn group(&self, labels: &LabelSet) -> MatchGroup {
        let mut groups = MatchGroup::new();
        for label in labels.iter() {
            if let Some(icon) = self.icon_for(label) {
                groups
                    .entry(icon.to_string())
                    .or_default()
                    .push(label.to_string());
            }
        }
        groups
    }
}

pub fn match_labels(labels: &LabelSet, registry: &IconRegistry) -> MatchGroup {
    LabelMatcher::new(registry).group(labels)
}
