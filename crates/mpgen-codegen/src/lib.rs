//! mpgen Code Generator
//!
//! Turns the annotated template AST into a mini-program markup document.
//! The target dialect only understands literal attributes, indexed lookups
//! into the runtime handle table (`_h[n]`) and a fixed directive set, so
//! every dynamic binding is projected onto one of those.
//!
//! ```text
//! Node + GeneratorOptions → generate_template() → "<import/>…<template name=…>…</template>"
//! ```
//!
//! Generation never fails from the caller's point of view: any error raised
//! while walking the tree is turned into a diagnostic document wrapped in the
//! same named-template envelope.

pub mod attrs;
pub mod component;
pub mod control_flow;
pub mod events;
pub mod pass;
pub mod shell;

use mpgen_ast::{Element, GeneratorOptions, Node};

pub use pass::GenerationPass;
pub use shell::{Generated, TemplateGenerator};

/// Generate the full template document for `ast`. Always returns a document.
pub fn generate_template(ast: &Node, options: &GeneratorOptions) -> String {
    TemplateGenerator::new(options).generate(ast)
}

/// What went wrong while generating a node.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// A dynamic decoration was requested but upstream assigned no handle.
    #[error("<{tag}> has no binding handle for its {what}")]
    MissingHandle { tag: String, what: &'static str },

    /// An `if` that does not open its chain, or an `else` that does not close it.
    #[error("<{tag}> has a malformed conditional chain: {reason}")]
    MalformedChain { tag: String, reason: &'static str },

    #[error("template nesting exceeds {limit} levels")]
    DepthExceeded { limit: usize },

    /// A panic caught at the generator boundary.
    #[error("internal fault: {message}")]
    Internal { message: String },
}

/// Code generation error, with the path of nodes it was raised under.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct GenerateError {
    pub kind: ErrorKind,
    /// Innermost frame first.
    frames: Vec<String>,
}

/// Traces longer than this keep only their ends.
const MAX_TRACE_FRAMES: usize = 12;

impl GenerateError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            frames: Vec::new(),
        }
    }

    pub fn missing_handle(tag: &str, what: &'static str) -> Self {
        Self::new(ErrorKind::MissingHandle {
            tag: tag.to_string(),
            what,
        })
    }

    pub fn malformed_chain(tag: &str, reason: &'static str) -> Self {
        Self::new(ErrorKind::MalformedChain {
            tag: tag.to_string(),
            reason,
        })
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal {
            message: message.into(),
        })
    }

    /// Record that the error passed through `frame` on its way up.
    pub fn within(mut self, frame: impl Into<String>) -> Self {
        self.frames.push(frame.into());
        self
    }

    /// Tag the most recent frame with its position among its siblings.
    pub fn at_position(mut self, index: usize) -> Self {
        if let Some(last) = self.frames.last_mut() {
            last.push_str(&format!("[{index}]"));
        }
        self
    }

    /// Frames from the root down to the failing node.
    pub fn frames(&self) -> impl Iterator<Item = &str> {
        self.frames.iter().rev().map(String::as_str)
    }

    /// Human-readable origin trace, e.g. `view > label[1] > #text[0]`.
    pub fn trace(&self) -> String {
        let frames: Vec<&str> = self.frames().collect();
        if frames.is_empty() {
            return "at <root>".to_string();
        }
        if frames.len() <= MAX_TRACE_FRAMES {
            return format!("at {}", frames.join(" > "));
        }
        let half = MAX_TRACE_FRAMES / 2;
        format!(
            "at {} > ... > {}",
            frames[..half].join(" > "),
            frames[frames.len() - half..].join(" > ")
        )
    }
}

/// The element's handle id, or an error naming what needed it.
pub(crate) fn require_handle(el: &Element, what: &'static str) -> Result<u32, GenerateError> {
    el.binding_handle_id
        .ok_or_else(|| GenerateError::missing_handle(&el.tag, what))
}

/// `{{ _h[ n ].field }}`
pub(crate) fn handle_lookup(handle: u32, field: &str) -> String {
    format!("{{{{ _h[ {handle} ].{field} }}}}")
}
