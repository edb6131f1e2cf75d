//! mpgen AST
//!
//! The annotated template tree handed over by the upstream parse/transform
//! stage, plus the options record that configures one generation pass.
//!
//! Both arrive as JSON from the JS build tooling; `Node::from_json` and
//! `GeneratorOptions::from_json` are the hand-off points.

pub mod ast;
pub mod options;
pub mod tag_map;

pub use ast::{
    Attr, ChainBranch, ConditionalChain, Element, EventBinding, GuardKind, Iteration, Modifiers,
    Node, Text,
};
pub use options::{GeneratorOptions, ImportEntry};
pub use tag_map::TagMap;

/// Failure to load an AST or options record from JSON.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Load error at line {line}, column {column}: {message}")]
pub struct LoadError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}
