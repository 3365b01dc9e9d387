//! Errors
//!
//! Failures raised while resolving icons. None of them abort a build: the
//! resolver turns every one into an empty icon and a warning.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GroupIconsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("icon set `{collection}` not found. Please install `@iconify-json/{collection}` first")]
    CollectionNotFound { collection: String },

    #[error("icon `{name}` not found in icon set `{collection}`")]
    IconNotFound { collection: String, name: String },

    #[error("icon set `{collection}` is not valid: {reason}")]
    InvalidIconSet { collection: String, reason: String },

    #[error("malformed icon reference `{0}`, expected `<collection>:<name>`")]
    MalformedRef(String),

    #[error("failed to fetch icon: {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to fetch icon: {url}: response is not an SVG document")]
    NotSvg { url: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, GroupIconsError>;
