//! Annotated template tree.
//!
//! Nodes are already classified upstream: static/dynamic text, binding-handle
//! ids, component references, conditional chains and iteration sources are
//! all resolved before the generator sees them. The generator only reads
//! this tree; it never mutates it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::LoadError;

/// A node in the template tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    /// A tag with attributes, directives and children.
    Element(Element),

    /// Literal or interpolated text.
    Text(Text),
}

impl Node {
    /// Deserialize a tree from the upstream JSON hand-off.
    pub fn from_json(source: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(source)?)
    }

    /// The element tag, or `None` for text.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Element(el) => Some(&el.tag),
            Node::Text(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

/// An element node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub tag: String,

    /// Raw attributes in source order, including `v-bind`/`:` and `v-on`/`@` entries.
    #[serde(default)]
    pub attributes_list: Vec<Attr>,

    /// Event type → descriptor, in source order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<IndexMap<String, EventBinding>>,

    #[serde(default)]
    pub class_binding: bool,

    #[serde(default)]
    pub style_binding: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_class: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_style: Option<String>,

    /// Present only on the lead node of an if/elseif/else group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_chain: Option<ConditionalChain>,

    /// Presence means the element is repeated over a collection.
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "iterationSource")]
    pub iteration: Option<Iteration>,

    #[serde(default)]
    pub children: Vec<Node>,

    #[serde(default)]
    pub is_static: bool,

    /// Runtime lookup slot (`_h[n]`) holding this node's resolved values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding_handle_id: Option<u32>,

    /// Index into the shared state store when this node instantiates a sub-component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_ref_id: Option<u32>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Flagged upstream as a sub-component instantiation. Whether it really
    /// is one depends on the import table.
    pub fn is_component_candidate(&self) -> bool {
        self.component_ref_id.is_some()
    }
}

/// A raw `name="value"` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attr {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl Attr {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One bound event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBinding {
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl EventBinding {
    pub fn new(modifiers: Modifiers) -> Self {
        Self { modifiers }
    }
}

/// Event modifiers. Only `stop` and `capture` affect the generated output;
/// the rest are accepted so upstream descriptors load unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub stop: bool,
    pub capture: bool,
    pub prevent: bool,
    #[serde(rename = "self")]
    pub self_: bool,
    pub once: bool,
}

/// The ordered branches of an if/elseif/else group, attached to its lead.
///
/// Entry 0 is the `if` branch, whose body is the lead element itself; its
/// serialized body is a copy and is not rendered separately. Upstream may
/// also omit that entry, in which case the lead is the implied `if` branch.
/// The other bodies are owned here and are never part of any `children` list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionalChain {
    pub branches: Vec<ChainBranch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainBranch {
    pub guard_kind: GuardKind,
    pub body: Node,
}

impl ChainBranch {
    pub fn new(guard_kind: GuardKind, body: impl Into<Node>) -> Self {
        Self {
            guard_kind,
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardKind {
    If,
    #[serde(alias = "elif")]
    ElseIf,
    Else,
}

/// Repetition source of an element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Iteration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_variable: Option<String>,

    /// Stability key as written in source, e.g. `item.id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_path: Option<String>,
}

/// A text node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub is_static: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding_handle_id: Option<u32>,
}

impl Text {
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_static: true,
            binding_handle_id: None,
        }
    }

    pub fn dynamic(handle: u32) -> Self {
        Self {
            text: String::new(),
            is_static: false,
            binding_handle_id: Some(handle),
        }
    }
}
