#![deny(clippy::all)]

/**
 * Group Icons
 *
 * Decorates rendered code block titles with tool and file-type icons and keeps
 * the generated icon stylesheet in sync with the labels that documents use.
 */
pub mod config;
pub mod error;
pub mod icons;
pub mod labels;
pub mod markdown;
pub mod matcher;
pub mod plugin;
pub mod registry;
pub mod session;
pub mod stylesheet;

// Re-exports
pub use config::{FetchOptions, PluginOptions, TitleBarOptions};
pub use error::{GroupIconsError, Result};
pub use icons::{
    local_icon_loader, IconData, IconRef, IconResolver, IconSet, IconSetProvider,
    InMemoryIconSets, NodeModulesIconSets,
};
pub use labels::{extract_labels, LabelSet};
pub use markdown::{escape_html, render_fence, rewrite_code_group_labels, Token, TokenKind};
pub use matcher::{match_labels, LabelMatcher, MatchGroup};
pub use plugin::{DocumentFilter, GroupIconPlugin, StylesheetJob, TransformOutcome};
pub use registry::IconRegistry;
pub use session::{ControllerState, IconSession, ModuleHost, RESOLVED_VIRTUAL_CSS_ID, VIRTUAL_CSS_ID};
pub use stylesheet::{StylesheetGenerator, BASE_CSS};
