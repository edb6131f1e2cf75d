//! Sub-component instantiation.

use mpgen_ast::{Element, GuardKind, ImportEntry};

use crate::{control_flow, GenerateError};

/// Slot binding passed to every instance. Only the default slot is wired.
const DEFAULT_SLOT: &str = "$defaultSlot: 'defaultSlot'";

/// Instance name: source tag followed by the compiled content hash, so two
/// components sharing a tag but differing in content never collide.
pub fn instance_name(tag: &str, entry: &ImportEntry) -> String {
    format!("{tag}{}", entry.content_hash)
}

/// `<template is="tagHASH" data="{{...$root[ $kk + cid ], $root, $defaultSlot: 'defaultSlot'}}"/>`
///
/// The referenced template is registered by the document's import preamble.
/// Iteration and chain guards, when present, decorate the instance tag.
pub fn instance(
    el: &Element,
    entry: &ImportEntry,
    guard: Option<GuardKind>,
) -> Result<String, GenerateError> {
    let Some(component_ref) = el.component_ref_id else {
        return Err(GenerateError::internal(format!(
            "<{}> instantiated without a component reference",
            el.tag
        )));
    };

    let data = [
        format!("...$root[ $kk + {component_ref} ]"),
        "$root".to_string(),
        DEFAULT_SLOT.to_string(),
    ]
    .join(", ");

    Ok(format!(
        "<template is=\"{}\"{} data=\"{{{{{data}}}}}\"/>",
        instance_name(&el.tag, entry),
        control_flow::directive_attrs(el, guard)?,
    ))
}
