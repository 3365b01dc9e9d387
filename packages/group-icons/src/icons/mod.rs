//! Icons
//!
//! Turns icon references into SVG markup ready to embed in a CSS data URI.

pub mod iconify;
pub mod provider;
pub mod resolver;
pub mod svg;

use std::io;
use std::path::Path;

pub use iconify::{IconData, IconSet};
pub use provider::{IconSetProvider, InMemoryIconSets, NodeModulesIconSets};
pub use resolver::{IconRef, IconResolver};
pub use svg::{encode_svg_for_css, strip_svg_prologue};

/// Read an SVG file relative to `base_dir`, for use as an inline icon reference.
pub fn local_icon_loader(base_dir: &Path, path: impl AsRef<Path>) -> io::Result<String> {
    std::fs::read_to_string(base_dir.join(path))
}
