//! Markdown Renderer Rewrites
//!
//! Two post-processing steps applied to markdown-it output so that every
//! titled code block carries a `data-title` attribute:
//!
//! - code-group tab labels gain `data-title="<label text>"`
//! - a standalone fence with `[title]` in its info string is wrapped in a
//!   title bar
//!
//! Both operate on already rendered HTML; tokens are only consulted to find
//! out where a fence sits.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

use crate::config::TitleBarOptions;

static LABEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<label\b([^>]*)>(.*?)</label>").unwrap());
static DATA_TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bdata-title\b").unwrap());
static INFO_TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(.*?)\]").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    CodeGroupOpen,
    CodeGroupClose,
    Fence,
    Other,
}

impl TokenKind {
    /// Map a markdown-it token type.
    pub fn from_type(ty: &str) -> Self {
        match ty {
            "container_code-group_open" => TokenKind::CodeGroupOpen,
            "container_code-group_close" => TokenKind::CodeGroupClose,
            "fence" => TokenKind::Fence,
            _ => TokenKind::Other,
        }
    }
}

/// The parts of a markdown-it token the rewrites look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub info: String,
    /// Set when the fence was pulled in from a snippet file.
    pub src: Option<String>,
}

impl Token {
    pub fn new(kind: TokenKind, info: impl Into<String>) -> Self {
        Self {
            kind,
            info: info.into(),
            src: None,
        }
    }

    pub fn with_src(mut self, src: impl Into<String>) -> Self {
        self.src = Some(src.into());
        self
    }

    /// Set `src` from the raw JavaScript value. The snippet plugin stores
    /// `[path, region]`; any truthy value marks the fence as a snippet.
    pub fn with_src_value(mut self, src: Option<&Value>) -> Self {
        self.src = src.filter(|value| is_truthy(value)).map(|value| match value {
            Value::String(path) => path.clone(),
            Value::Array(items) => match items.first() {
                Some(Value::String(path)) => path.clone(),
                _ => value.to_string(),
            },
            _ => value.to_string(),
        });
        self
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Add `data-title` to each `<label>` of a rendered code-group opening.
/// Labels that already have one are left alone.
pub fn rewrite_code_group_labels(html: &str) -> String {
    LABEL_RE
        .replace_all(html, |caps: &Captures| {
            let whole = &caps[0];
            if DATA_TITLE_RE.is_match(&caps[1]) {
                return whole.to_string();
            }
            format!(
                "<label data-title=\"{}\"{}",
                escape_html(&caps[2]),
                &whole["<label".len()..]
            )
        })
        .into_owned()
}

/// Whether the fence at `idx` sits inside a code-group container.
fn in_code_group(tokens: &[Token], idx: usize) -> bool {
    for token in tokens[..idx.min(tokens.len())].iter().rev() {
        match token.kind {
            TokenKind::CodeGroupOpen => return true,
            TokenKind::CodeGroupClose => return false,
            _ => {}
        }
    }
    false
}

/// Wrap a rendered fence in a title bar when its info string names a title.
///
/// `rendered` is the default renderer's output for `tokens[idx]`. Fences in
/// a code group already get their title from the tab label, and snippet
/// fences are only wrapped when `options.include_snippet` is set.
pub fn render_fence(
    tokens: &[Token],
    idx: usize,
    rendered: &str,
    options: &TitleBarOptions,
) -> String {
    let Some(token) = tokens.get(idx) else {
        return rendered.to_string();
    };
    if in_code_group(tokens, idx) {
        return rendered.to_string();
    }
    if token.src.is_some() && !options.include_snippet {
        return rendered.to_string();
    }
    let Some(caps) = INFO_TITLE_RE.captures(&token.info) else {
        return rendered.to_string();
    };
    let title = escape_html(&caps[1]);
    format!(
        r#"<div class="vp-code-block-title">
      <div class="vp-code-block-title-bar">
          <span class="vp-code-block-title-text" data-title="{title}">{title}</span>
      </div>
        {rendered}
      </div>
      "#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_escape_html_specials() {
        assert_eq!(escape_html(r#"a & <b> "c""#), "a &amp; &lt;b&gt; &quot;c&quot;");
        assert_eq!(escape_html("it's"), "it's");
    }

    #[test]
    fn should_map_token_types() {
        assert_eq!(
            TokenKind::from_type("container_code-group_open"),
            TokenKind::CodeGroupOpen
        );
        assert_eq!(TokenKind::from_type("fence"), TokenKind::Fence);
        assert_eq!(TokenKind::from_type("paragraph_open"), TokenKind::Other);
    }

    #[test]
    fn should_add_data_title_to_labels() {
        let html = r#"<div class="tabs"><input type="radio"><label for="tab-1">npm</label><label for="tab-2" data-title="yarn">yarn</label></div>"#;
        let out = rewrite_code_group_labels(html);
        assert!(out.contains(r#"<label data-title="npm" for="tab-1">npm</label>"#));
        assert!(out.contains(r#"<label for="tab-2" data-title="yarn">yarn</label>"#));
    }

    #[test]
    fn should_not_treat_fences_after_closed_group_as_grouped() {
        let tokens = vec![
            Token::new(TokenKind::CodeGroupOpen, ""),
            Token::new(TokenKind::Fence, "sh [npm]"),
            Token::new(TokenKind::CodeGroupClose, ""),
            Token::new(TokenKind::Fence, "ts [main.ts]"),
        ];
        assert!(in_code_group(&tokens, 1));
        assert!(!in_code_group(&tokens, 3));
    }
}
