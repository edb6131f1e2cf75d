//! Traversal driver.
//!
//! One `GenerationPass` walks one tree, depth-first, and routes each node to
//! the emitter for its shape. The only state it keeps is which conditional
//! chains it has already emitted and how deep it currently is; both are local
//! to the pass, so the tree itself is never touched and can be shared between
//! passes.

use std::collections::HashSet;

use mpgen_ast::{Element, GeneratorOptions, GuardKind, ImportEntry, Node, Text};

use crate::{attrs, component, control_flow, events, handle_lookup, ErrorKind, GenerateError};

/// State for a single generation pass over one tree.
pub struct GenerationPass<'o> {
    pub(crate) options: &'o GeneratorOptions,
    /// Lead elements whose chain has been emitted. Identity is the address of
    /// the borrowed element, stable for as long as the tree is borrowed.
    pub(crate) emitted_chains: HashSet<*const Element>,
    depth: usize,
}

impl<'o> GenerationPass<'o> {
    pub fn new(options: &'o GeneratorOptions) -> Self {
        Self {
            options,
            emitted_chains: HashSet::new(),
            depth: 0,
        }
    }

    /// Generate markup for `node` and everything below it.
    pub fn generate_node(&mut self, node: &Node) -> Result<String, GenerateError> {
        self.generate_guarded(node, None)
    }

    /// Generate `node` as a member of a conditional chain: `guard` decorates
    /// the root tag of whatever the node renders to.
    pub(crate) fn generate_guarded(
        &mut self,
        node: &Node,
        guard: Option<GuardKind>,
    ) -> Result<String, GenerateError> {
        if self.depth >= self.options.max_depth {
            return Err(GenerateError::new(ErrorKind::DepthExceeded {
                limit: self.options.max_depth,
            })
            .within(frame_label(node, guard)));
        }
        self.depth += 1;
        let result = self.dispatch(node, guard);
        self.depth -= 1;
        result.map_err(|err| err.within(frame_label(node, guard)))
    }

    fn dispatch(&mut self, node: &Node, guard: Option<GuardKind>) -> Result<String, GenerateError> {
        match node {
            Node::Element(el) => match &el.conditional_chain {
                Some(chain) => self.chain(el, chain, guard),
                None => self.element_or_component(el, guard),
            },
            Node::Text(text) => text_content(text),
        }
    }

    /// Render `el` as a component instance when the import table knows it,
    /// otherwise as a plain element.
    pub(crate) fn element_or_component(
        &mut self,
        el: &Element,
        guard: Option<GuardKind>,
    ) -> Result<String, GenerateError> {
        match self.component_entry(el) {
            Some(entry) => component::instance(el, entry, guard),
            None => self.element(el, guard),
        }
    }

    fn component_entry(&self, el: &Element) -> Option<&'o ImportEntry> {
        if !el.is_component_candidate() {
            return None;
        }
        let entry = self.options.import_for(&el.tag);
        if entry.is_none() {
            tracing::trace!(tag = %el.tag, "component tag not in import table, emitting as element");
        }
        entry
    }

    fn element(&mut self, el: &Element, guard: Option<GuardKind>) -> Result<String, GenerateError> {
        let options = self.options;
        let tag = options.tag_map.resolve(&el.tag);
        let mut out = String::new();

        out.push('<');
        out.push_str(tag);
        out.push_str(&control_flow::directive_attrs(el, guard)?);
        out.push_str(&attrs::class_attr(el)?);
        out.push_str(&attrs::style_attr(el)?);
        out.push_str(&attrs::generic_attrs(el)?);
        out.push_str(&events::event_attrs(el)?);
        out.push('>');

        for (index, child) in el.children.iter().enumerate() {
            let child_out = self
                .generate_node(child)
                .map_err(|err| err.at_position(index))?;
            out.push_str(&child_out);
        }

        out.push_str(&format!("</{tag}>"));
        Ok(out)
    }
}

fn text_content(text: &Text) -> Result<String, GenerateError> {
    if text.is_static {
        return Ok(text.text.clone());
    }
    let handle = text
        .binding_handle_id
        .ok_or_else(|| GenerateError::missing_handle(TEXT_FRAME, "interpolation"))?;
    Ok(handle_lookup(handle, "t"))
}

const TEXT_FRAME: &str = "#text";

/// `view`, `#text`, or `view<elif>` for a chain member.
fn frame_label(node: &Node, guard: Option<GuardKind>) -> String {
    let label = node.tag().unwrap_or(TEXT_FRAME);
    match guard {
        Some(guard) => format!("{label}<{}>", control_flow::guard_name(guard)),
        None => label.to_string(),
    }
}
