//! Icon Resolver
//!
//! Produces CSS-ready SVG for an icon reference. Inline markup is encoded as
//! is, URLs are fetched, and `<collection>:<name>` references are looked up in
//! an [`IconSetProvider`]. Failures never propagate: the caller gets an empty
//! string and a warning is logged.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use super::provider::IconSetProvider;
use super::svg::{encode_svg_for_css, looks_like_svg};
use crate::config::FetchOptions;
use crate::error::{GroupIconsError, Result};

static REMOTE_URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://").unwrap());

/// The three shapes an icon reference can take, tried in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconRef<'a> {
    Inline(&'a str),
    Remote(&'a str),
    Collection { collection: &'a str, name: &'a str },
}

impl<'a> IconRef<'a> {
    pub fn parse(icon: &'a str) -> Result<Self> {
        if icon.starts_with("<svg") {
            return Ok(IconRef::Inline(icon));
        }
        if REMOTE_URL_RE.is_match(icon) {
            return Ok(IconRef::Remote(icon));
        }
        match icon.split_once(':') {
            Some((collection, name)) if !collection.is_empty() && !name.is_empty() => {
                Ok(IconRef::Collection { collection, name })
            }
            _ => Err(GroupIconsError::MalformedRef(icon.to_string())),
        }
    }
}

#[derive(Clone)]
pub struct IconResolver {
    client: reqwest::Client,
    icon_sets: Arc<dyn IconSetProvider>,
}

impl IconResolver {
    /// Remote fetches are bounded by `fetch.timeout()` and never retried.
    pub fn new(icon_sets: Arc<dyn IconSetProvider>, fetch: &FetchOptions) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(fetch.timeout())
            .build()
            .map_err(GroupIconsError::HttpClient)?;
        Ok(Self { client, icon_sets })
    }

    /// Encoded SVG for `icon`, or an empty string when it cannot be resolved.
    pub async fn resolve(&self, icon: &str) -> String {
        match self.try_resolve(icon).await {
            Ok(svg) => svg,
            Err(err) => {
                warn!(target: "group_icons", icon = %short(icon), "{}", err);
                String::new()
            }
        }
    }

    pub async fn try_resolve(&self, icon: &str) -> Result<String> {
        match IconRef::parse(icon)? {
            IconRef::Inline(markup) => Ok(encode_svg_for_css(markup)),
            IconRef::Remote(url) => self.fetch(url).await,
            IconRef::Collection { collection, name } => {
                let data = self.icon_sets.lookup(collection, name)?;
                Ok(encode_svg_for_css(&data.to_svg()))
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        let fetch_error = |source| GroupIconsError::Fetch {
            url: url.to_string(),
            source,
        };
        let body = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(fetch_error)?
            .text()
            .await
            .map_err(fetch_error)?;

        if !looks_like_svg(&body) {
            return Err(GroupIconsError::NotSvg {
                url: url.to_string(),
            });
        }
        Ok(encode_svg_for_css(&body))
    }
}

/// Inline markup can be long; keep log fields readable.
fn short(icon: &str) -> &str {
    match icon.char_indices().nth(48) {
        Some((end, _)) => &icon[..end],
        None => icon,
    }
}
