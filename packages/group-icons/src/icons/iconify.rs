//! Iconify Icon Sets
//!
//! The `icons.json` format shipped by `@iconify-json/<collection>` packages,
//! alias resolution, and rendering of one icon to standalone SVG markup.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

static DEFS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<defs[\s>].*?</defs>").unwrap());
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-?[0-9.]*[0-9]+[0-9.]*").unwrap());

/// Longest alias chain followed before giving up.
const MAX_ALIAS_DEPTH: usize = 36;

const DEFAULT_SIZE: f64 = 16.0;

/// One icon or alias entry. Icons carry a `body`, aliases a `parent`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconEntry {
    pub body: Option<String>,
    pub parent: Option<String>,
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotate: Option<i32>,
    pub h_flip: Option<bool>,
    pub v_flip: Option<bool>,
}

impl IconEntry {
    /// Layer `self` (the child) over `parent`: transformations accumulate,
    /// every other property set on the child wins.
    fn merged_over(&self, parent: &IconEntry) -> IconEntry {
        let rotate = match (parent.rotate, self.rotate) {
            (None, None) => None,
            (p, c) => Some((p.unwrap_or(0) + c.unwrap_or(0)).rem_euclid(4)),
        };
        let xor = |p: Option<bool>, c: Option<bool>| match (p, c) {
            (None, None) => None,
            (p, c) => Some(p.unwrap_or(false) != c.unwrap_or(false)),
        };
        IconEntry {
            body: self.body.clone().or_else(|| parent.body.clone()),
            parent: None,
            left: self.left.or(parent.left),
            top: self.top.or(parent.top),
            width: self.width.or(parent.width),
            height: self.height.or(parent.height),
            rotate,
            h_flip: xor(parent.h_flip, self.h_flip),
            v_flip: xor(parent.v_flip, self.v_flip),
        }
    }
}

/// Contents of an `icons.json` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconSet {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub icons: HashMap<String, IconEntry>,
    #[serde(default)]
    pub aliases: HashMap<String, IconEntry>,
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl IconSet {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Resolved geometry for `name`, following aliases. `None` when the name
    /// is unknown or an alias chain is broken or cyclic.
    pub fn icon_data(&self, name: &str) -> Option<IconData> {
        let mut merged = self.icons.get(name).or_else(|| self.aliases.get(name))?.clone();
        let mut parent = merged.parent.clone();
        let mut depth = 0;

        while let Some(parent_name) = parent {
            depth += 1;
            if depth > MAX_ALIAS_DEPTH {
                return None;
            }
            let entry = self
                .icons
                .get(&parent_name)
                .or_else(|| self.aliases.get(&parent_name))?;
            parent = entry.parent.clone();
            merged = merged.merged_over(entry);
        }

        let defaults = IconEntry {
            left: self.left,
            top: self.top,
            width: self.width,
            height: self.height,
            ..IconEntry::default()
        };
        let merged = merged.merged_over(&defaults);

        Some(IconData {
            body: merged.body?,
            left: merged.left.unwrap_or(0.0),
            top: merged.top.unwrap_or(0.0),
            width: merged.width.unwrap_or(DEFAULT_SIZE),
            height: merged.height.unwrap_or(DEFAULT_SIZE),
            rotate: merged.rotate.unwrap_or(0),
            h_flip: merged.h_flip.unwrap_or(false),
            v_flip: merged.v_flip.unwrap_or(false),
        })
    }
}

/// Fully resolved icon geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct IconData {
    pub body: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Quarter turns clockwise.
    pub rotate: i32,
    pub h_flip: bool,
    pub v_flip: bool,
}

impl IconData {
    pub fn new(body: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            body: body.into(),
            left: 0.0,
            top: 0.0,
            width,
            height,
            rotate: 0,
            h_flip: false,
            v_flip: false,
        }
    }

    /// Render as a standalone `<svg>` element, one em high.
    pub fn to_svg(&self) -> String {
        let (attributes, body) = self.render();
        let mut html = String::from("<svg xmlns=\"http://www.w3.org/2000/svg\"");
        if body.contains("xlink:") {
            html.push_str(" xmlns:xlink=\"http://www.w3.org/1999/xlink\"");
        }
        for (name, value) in &attributes {
            html.push_str(&format!(" {}=\"{}\"", name, value));
        }
        html.push('>');
        html.push_str(&body);
        html.push_str("</svg>");
        html
    }

    fn render(&self) -> (Vec<(&'static str, String)>, String) {
        let (mut left, mut top) = (self.left, self.top);
        let (mut width, mut height) = (self.width, self.height);
        let mut transformations = Vec::new();
        let mut rotation = self.rotate;

        if self.h_flip {
            if self.v_flip {
                rotation += 2;
            } else {
                transformations.push(format!("translate({} {})", width + left, 0.0 - top));
                transformations.push("scale(-1 1)".to_string());
                left = 0.0;
                top = 0.0;
            }
        } else if self.v_flip {
            transformations.push(format!("translate({} {})", 0.0 - left, height + top));
            transformations.push("scale(1 -1)".to_string());
            left = 0.0;
            top = 0.0;
        }

        let rotation = rotation.rem_euclid(4);
        match rotation {
            1 => {
                let center = height / 2.0 + top;
                transformations.insert(0, format!("rotate(90 {} {})", center, center));
            }
            2 => {
                transformations.insert(
                    0,
                    format!("rotate(180 {} {})", width / 2.0 + left, height / 2.0 + top),
                );
            }
            3 => {
                let center = width / 2.0 + left;
                transformations.insert(0, format!("rotate(-90 {} {})", center, center));
            }
            _ => {}
        }
        if rotation % 2 == 1 {
            std::mem::swap(&mut left, &mut top);
            std::mem::swap(&mut width, &mut height);
        }

        let body = if transformations.is_empty() {
            self.body.clone()
        } else {
            wrap_content(
                &self.body,
                &format!("<g transform=\"{}\">", transformations.join(" ")),
                "</g>",
            )
        };

        let height_attr = "1em".to_string();
        let width_attr = scale_size(&height_attr, width / height);
        let attributes = vec![
            ("width", width_attr),
            ("height", height_attr),
            ("viewBox", format!("{} {} {} {}", left, top, width, height)),
        ];
        (attributes, body)
    }
}

/// Wrap body content, keeping `<defs>` outside the wrapper.
fn wrap_content(body: &str, start: &str, end: &str) -> String {
    let defs: String = DEFS_RE.find_iter(body).map(|m| m.as_str()).collect();
    let content = DEFS_RE.replace_all(body, "");
    format!("{}{}{}{}", defs, start, content, end)
}

/// Multiply every number in a CSS size by `ratio`, rounding up to 2 decimals.
fn scale_size(size: &str, ratio: f64) -> String {
    if ratio == 1.0 || !ratio.is_finite() {
        return size.to_string();
    }
    NUMBER_RE
        .replace_all(size, |caps: &regex::Captures| {
            caps[0]
                .parse::<f64>()
                .map(|n| ((n * ratio * 100.0).ceil() / 100.0).to_string())
                .unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}
