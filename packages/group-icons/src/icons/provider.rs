//! Icon Set Providers
//!
//! Where `<collection>:<name>` references get their geometry from.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::SystemTime;

use tracing::debug;

use super::iconify::{IconData, IconSet};
use crate::error::{GroupIconsError, Result};

/// Lookup of a named icon in a named collection.
pub trait IconSetProvider: Send + Sync {
    fn lookup(&self, collection: &str, name: &str) -> Result<IconData>;
}

fn icon_not_found(collection: &str, name: &str) -> GroupIconsError {
    GroupIconsError::IconNotFound {
        collection: collection.to_string(),
        name: name.to_string(),
    }
}

/// Collections registered in memory.
#[derive(Debug, Default)]
pub struct InMemoryIconSets {
    sets: HashMap<String, IconSet>,
}

impl InMemoryIconSets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, collection: impl Into<String>, set: IconSet) {
        self.sets.insert(collection.into(), set);
    }

    pub fn with(mut self, collection: impl Into<String>, set: IconSet) -> Self {
        self.add(collection, set);
        self
    }
}

impl IconSetProvider for InMemoryIconSets {
    fn lookup(&self, collection: &str, name: &str) -> Result<IconData> {
        let set = self
            .sets
            .get(collection)
            .ok_or_else(|| GroupIconsError::CollectionNotFound {
                collection: collection.to_string(),
            })?;
        set.icon_data(name)
            .ok_or_else(|| icon_not_found(collection, name))
    }
}

/// Collections installed as `@iconify-json/<collection>` npm packages.
///
/// Each root and every ancestor of it is searched for `node_modules`, the way
/// Node resolves packages. A parsed collection is reused until its
/// `icons.json` moves or its modification time changes.
pub struct NodeModulesIconSets {
    roots: Vec<PathBuf>,
    loaded: Mutex<HashMap<String, LoadedSet>>,
}

struct LoadedSet {
    path: PathBuf,
    modified: Option<SystemTime>,
    set: Arc<IconSet>,
}

impl NodeModulesIconSets {
    pub fn new(roots: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            roots: roots
                .into_iter()
                .map(|root| fs::canonicalize(&root).unwrap_or(root))
                .collect(),
            loaded: Mutex::new(HashMap::new()),
        }
    }

    /// Path of the collection's `icons.json`, if installed.
    pub fn find(&self, collection: &str) -> Option<PathBuf> {
        if !is_collection_name(collection) {
            return None;
        }
        self.roots
            .iter()
            .flat_map(|root| root.ancestors())
            .map(|dir| package_icons_json(dir, collection))
            .find(|candidate| candidate.is_file())
    }

    fn load(&self, collection: &str) -> Result<Arc<IconSet>> {
        let path = self
            .find(collection)
            .ok_or_else(|| GroupIconsError::CollectionNotFound {
                collection: collection.to_string(),
            })?;
        let modified = fs::metadata(&path).and_then(|meta| meta.modified()).ok();

        if let Some(loaded) = self
            .loaded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(collection)
        {
            if loaded.path == path && modified.is_some() && loaded.modified == modified {
                return Ok(Arc::clone(&loaded.set));
            }
        }

        debug!(collection, path = %path.display(), "loading icon set");
        let content = fs::read_to_string(&path)?;
        let set = IconSet::from_json(&content).map_err(|e| GroupIconsError::InvalidIconSet {
            collection: collection.to_string(),
            reason: e.to_string(),
        })?;

        let set = Arc::new(set);
        self.loaded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                collection.to_string(),
                LoadedSet {
                    path,
                    modified,
                    set: Arc::clone(&set),
                },
            );
        Ok(set)
    }
}

impl IconSetProvider for NodeModulesIconSets {
    fn lookup(&self, collection: &str, name: &str) -> Result<IconData> {
        self.load(collection)?
            .icon_data(name)
            .ok_or_else(|| icon_not_found(collection, name))
    }
}

fn package_icons_json(dir: &Path, collection: &str) -> PathBuf {
    dir.join("node_modules")
        .join("@iconify-json")
        .join(collection)
        .join("icons.json")
}

/// Iconify prefixes are lowercase alphanumerics and dashes; anything else
/// could step outside `node_modules`.
fn is_collection_name(collection: &str) -> bool {
    !collection.is_empty()
        && collection
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_reject_path_like_collections() {
        assert!(is_collection_name("vscode-icons"));
        assert!(is_collection_name("mdi"));
        assert!(!is_collection_name("../etc"));
        assert!(!is_collection_name(""));
        assert!(!is_collection_name("Logos"));
    }

    #[test]
    fn should_report_missing_collection() {
        let provider = InMemoryIconSets::new();
        let err = provider.lookup("logos", "vue").unwrap_err();
        assert!(matches!(err, GroupIconsError::CollectionNotFound { .. }));
        assert!(err.to_string().contains("@iconify-json/logos"));
    }
}
