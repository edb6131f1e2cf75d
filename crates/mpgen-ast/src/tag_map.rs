//! Source tag → target tag remapping.
//!
//! The rendering host only knows its own component set, so HTML tags are
//! folded onto the closest native equivalent. Anything unmapped (native
//! tags, custom components) passes through unchanged.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Remapping table: caller overrides first, then the built-in table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagMap {
    overrides: IndexMap<String, String>,
}

impl TagMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.overrides.insert(from.into(), to.into());
        self
    }

    /// The target tag for `tag`.
    pub fn resolve<'a>(&'a self, tag: &'a str) -> &'a str {
        if let Some(mapped) = self.overrides.get(tag) {
            return mapped;
        }
        builtin(tag).unwrap_or(tag)
    }
}

fn builtin(tag: &str) -> Option<&'static str> {
    let mapped = match tag {
        "a" => "navigator",
        "img" => "image",
        "span" => "label",
        "abbr" | "address" | "article" | "aside" | "b" | "bdi" | "bdo" | "blockquote" | "br"
        | "caption" | "cite" | "code" | "col" | "colgroup" | "dd" | "del" | "details" | "dfn"
        | "div" | "dl" | "dt" | "em" | "fieldset" | "figcaption" | "figure" | "footer" | "h1"
        | "h2" | "h3" | "h4" | "h5" | "h6" | "header" | "hr" | "i" | "ins" | "kbd" | "legend"
        | "li" | "main" | "mark" | "nav" | "ol" | "p" | "pre" | "q" | "s" | "samp" | "section"
        | "small" | "strong" | "sub" | "summary" | "sup" | "table" | "tbody" | "td" | "tfoot"
        | "th" | "thead" | "time" | "tr" | "u" | "ul" | "var" => "view",
        _ => return None,
    };
    Some(mapped)
}
