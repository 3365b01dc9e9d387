//! SVG Encoding
//!
//! Escaping rules for placing SVG markup inside `url("data:image/svg+xml,...")`.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Encode SVG markup for a double-quoted CSS `url()`.
///
/// Adds the namespaces a standalone document needs, swaps double quotes for
/// single ones, percent-encodes the characters a data URI cannot carry and
/// collapses whitespace, newlines included.
pub fn encode_svg_for_css(svg: &str) -> String {
    let mut svg = if svg.starts_with("<svg>") {
        svg.replacen("<svg>", "<svg >", 1)
    } else {
        svg.to_string()
    };
    if !svg.contains(" xmlns:xlink=") && svg.contains(" xlink:") {
        svg = svg.replacen("<svg ", &format!("<svg xmlns:xlink=\"{}\" ", XLINK_NS), 1);
    }
    if !svg.contains(" xmlns=") {
        svg = svg.replacen("<svg ", &format!("<svg xmlns=\"{}\" ", SVG_NS), 1);
    }
    encode_for_url(&svg)
}

fn encode_for_url(svg: &str) -> String {
    let mut out = String::with_capacity(svg.len() + svg.len() / 4);
    for ch in svg.chars() {
        match ch {
            '"' => out.push('\''),
            '%' => out.push_str("%25"),
            '#' => out.push_str("%23"),
            '{' => out.push_str("%7B"),
            '}' => out.push_str("%7D"),
            '<' => out.push_str("%3C"),
            '>' => out.push_str("%3E"),
            _ => out.push(ch),
        }
    }
    WHITESPACE_RE.replace_all(&out, " ").into_owned()
}

/// Whether a fetched body is an SVG document.
pub fn looks_like_svg(body: &str) -> bool {
    let trimmed = body.trim_start();
    (trimmed.starts_with("<svg") || trimmed.starts_with("<?xml") || trimmed.starts_with("<!"))
        && body.contains("<svg")
}

/// The markup from the `<svg` root on, dropping a BOM, XML declaration,
/// doctype or comments saved ahead of it. `None` when there is no root.
pub fn strip_svg_prologue(content: &str) -> Option<&str> {
    content.find("<svg").map(|start| content[start..].trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_escape_for_data_uri() {
        let encoded = encode_svg_for_css(
            "<svg xmlns=\"http://www.w3.org/2000/svg\">\n  <path fill=\"#fff\" d=\"M0 0\"/>\n</svg>",
        );
        assert_eq!(
            encoded,
            "%3Csvg xmlns='http://www.w3.org/2000/svg'%3E %3Cpath fill='%23fff' d='M0 0'/%3E %3C/svg%3E"
        );
        assert!(!encoded.contains('"'));
        assert!(!encoded.contains('\n'));
    }

    #[test]
    fn should_add_missing_namespaces() {
        let encoded = encode_svg_for_css("<svg><use xlink:href=\"#a\"/></svg>");
        assert!(encoded.starts_with(
            "%3Csvg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink' %3E"
        ));
    }

    #[test]
    fn should_detect_svg_bodies() {
        assert!(looks_like_svg("<svg viewBox=\"0 0 1 1\"></svg>"));
        assert!(looks_like_svg("<?xml version=\"1.0\"?>\n<svg></svg>"));
        assert!(!looks_like_svg("<!doctype html><html></html>"));
        assert!(!looks_like_svg("{\"error\":\"not found\"}"));
    }

    #[test]
    fn should_strip_editor_prologue() {
        let saved = "\u{feff}<?xml version=\"1.0\"?>\n<!-- icon -->\n<svg><path/></svg>\n";
        assert_eq!(strip_svg_prologue(saved), Some("<svg><path/></svg>"));
        assert_eq!(strip_svg_prologue("<svg/>"), Some("<svg/>"));
        assert_eq!(strip_svg_prologue("logos:vue"), None);
    }
}
