//! Icon Session
//!
//! Per-plugin state for one build session: every label seen so far, the
//! labels the stylesheet was last generated from, and whether the host must
//! be told to reload the stylesheet module.

use tracing::debug;

use crate::labels::LabelSet;

/// Id under which documents import the generated stylesheet.
pub const VIRTUAL_CSS_ID: &str = "virtual:group-icons.css";

/// Internal id of the stylesheet module in the host's module graph.
pub const RESOLVED_VIRTUAL_CSS_ID: &str = "\0virtual:group-icons.css";

/// Module graph operations provided by the host dev server.
pub trait ModuleHost {
    /// Mark a module stale. Returns false when the host does not know the
    /// module, in which case there is nothing to reload.
    fn invalidate_module(&self, id: &str) -> bool;

    /// Push a reload of an invalidated module to connected clients.
    fn reload_module(&self, id: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// The stylesheet reflects the current label set.
    Stable,
    /// Labels were added since the stylesheet was last generated.
    Dirty,
}

pub struct IconSession {
    labels: LabelSet,
    snapshot: LabelSet,
    state: ControllerState,
    host: Option<Box<dyn ModuleHost>>,
}

impl IconSession {
    pub fn new() -> Self {
        Self {
            labels: LabelSet::new(),
            snapshot: LabelSet::new(),
            state: ControllerState::Stable,
            host: None,
        }
    }

    /// Attach the dev server. Without one, state is still tracked but no
    /// reloads are requested (plain builds).
    pub fn attach_host(&mut self, host: Box<dyn ModuleHost>) {
        self.host = Some(host);
    }

    pub fn has_host(&self) -> bool {
        self.host.is_some()
    }

    /// Union labels found in one document. Returns the number that were new.
    pub fn record(&mut self, found: &LabelSet) -> usize {
        let added = self.labels.merge(found);
        if added > 0 {
            debug!(added, total = self.labels.len(), "label set grew");
        }
        added
    }

    /// The post-document hook: record, then run the change check. Returns
    /// true when this document moved the session to `Dirty`.
    pub fn observe(&mut self, found: &LabelSet) -> bool {
        self.record(found);
        self.check_for_changes()
    }

    /// Move to `Dirty` and request a reload when the labels differ from the
    /// last snapshot. Returns true only on that transition; while already
    /// dirty the pending reload covers any further growth.
    pub fn check_for_changes(&mut self) -> bool {
        if self.state == ControllerState::Dirty || self.labels.same_members(&self.snapshot) {
            return false;
        }
        self.state = ControllerState::Dirty;
        self.request_reload();
        true
    }

    /// Record the labels a stylesheet is about to be generated from and
    /// return to `Stable`.
    pub fn take_snapshot(&mut self) -> LabelSet {
        self.snapshot = self.labels.clone();
        self.state = ControllerState::Stable;
        self.snapshot.clone()
    }

    fn request_reload(&self) {
        let Some(host) = &self.host else {
            return;
        };
        if host.invalidate_module(RESOLVED_VIRTUAL_CSS_ID) {
            debug!(module = VIRTUAL_CSS_ID, "reloading icon stylesheet");
            host.reload_module(RESOLVED_VIRTUAL_CSS_ID);
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn snapshot(&self) -> &LabelSet {
        &self.snapshot
    }
}

impl Default for IconSession {
    fn default() -> Self {
        Self::new()
    }
}
