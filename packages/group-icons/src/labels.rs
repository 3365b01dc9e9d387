//! Label Extraction
//!
//! Finds the `data-title` labels a rendered document carries. The renderer
//! emits the same attribute in three shapes, each handled by its own rule:
//! - escaped inside a JavaScript string: `data-title=\"pnpm\"`
//! - a plain HTML attribute: `data-title="pnpm"`
//! - a property of serialized component data: `"data-title": "pnpm"`

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

static ESCAPED_ATTRIBUTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\bdata-title=\\"([^"]*)\\""#).unwrap());

static PLAIN_ATTRIBUTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\bdata-title="([^"]*)""#).unwrap());

static JSON_PROPERTY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""data-title":\s*"([^"]*)""#).unwrap());

/// Encodings of a title attribute in rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleEncoding {
    EscapedAttribute,
    PlainAttribute,
    JsonProperty,
}

impl TitleEncoding {
    pub const ALL: [TitleEncoding; 3] = [
        TitleEncoding::EscapedAttribute,
        TitleEncoding::PlainAttribute,
        TitleEncoding::JsonProperty,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            TitleEncoding::EscapedAttribute => &*ESCAPED_ATTRIBUTE_RE,
            TitleEncoding::PlainAttribute => &*PLAIN_ATTRIBUTE_RE,
            TitleEncoding::JsonProperty => &*JSON_PROPERTY_RE,
        }
    }

    /// Labels written in this encoding, with their byte offsets.
    pub fn scan(self, rendered: &str) -> Vec<(usize, String)> {
        self.pattern()
            .captures_iter(rendered)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let label = caps.get(1)?;
                Some((whole.start(), label.as_str().to_string()))
            })
            .collect()
    }
}

/// Labels seen so far, deduplicated by exact value and kept in first-seen
/// order. Two sets are equal when they hold the same labels, in any order.
#[derive(Debug, Clone, Default)]
pub struct LabelSet {
    labels: IndexSet<String>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the label was not present yet.
    pub fn insert(&mut self, label: impl Into<String>) -> bool {
        self.labels.insert(label.into())
    }

    /// Union `other` into this set. Returns how many labels were new.
    pub fn merge(&mut self, other: &LabelSet) -> usize {
        let before = self.labels.len();
        self.labels.extend(other.labels.iter().cloned());
        self.labels.len() - before
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    /// Membership equality, ignoring insertion order.
    pub fn same_members(&self, other: &LabelSet) -> bool {
        self.labels.len() == other.labels.len()
            && self.labels.iter().all(|label| other.labels.contains(label))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl PartialEq for LabelSet {
    fn eq(&self, other: &Self) -> bool {
        self.same_members(other)
    }
}

impl Eq for LabelSet {}

impl<S: Into<String>> FromIterator<S> for LabelSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for LabelSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.labels.extend(iter.into_iter().map(Into::into));
    }
}

/// Extract every label from one rendered document, in document order.
pub fn extract_labels(rendered: &str) -> LabelSet {
    let mut found: Vec<(usize, String)> = TitleEncoding::ALL
        .iter()
        .flat_map(|encoding| encoding.scan(rendered))
        .collect();
    found.sort_by_key(|(offset, _)| *offset);
    found.into_iter().map(|(_, label)| label).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_empty_set_without_titles() {
        assert!(extract_labels("<div class=\"language-sh\"><pre></pre></div>").is_empty());
        assert!(extract_labels("").is_empty());
    }

    #[test]
    fn should_scan_each_encoding_separately() {
        assert_eq!(
            TitleEncoding::EscapedAttribute.scan(r#"<label data-title=\"npm\">"#),
            vec![(7, "npm".to_string())]
        );
        assert!(TitleEncoding::PlainAttribute
            .scan(r#"<label data-title=\"npm\">"#)
            .is_empty());
        assert_eq!(
            TitleEncoding::JsonProperty.scan(r#"{"data-title": "yarn"}"#),
            vec![(1, "yarn".to_string())]
        );
    }

    #[test]
    fn should_compare_sets_by_membership() {
        let a: LabelSet = ["npm", "pnpm", "yarn"].into_iter().collect();
        let b: LabelSet = ["yarn", "npm", "pnpm"].into_iter().collect();
        let c: LabelSet = ["npm", "pnpm"].into_iter().collect();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn should_count_new_labels_on_merge() {
        let mut labels: LabelSet = ["npm"].into_iter().collect();
        let found: LabelSet = ["npm", "bun"].into_iter().collect();

        assert_eq!(labels.merge(&found), 1);
        assert_eq!(labels.merge(&found), 0);
        assert_eq!(labels.iter().collect::<Vec<_>>(), vec!["npm", "bun"]);
    }
}
