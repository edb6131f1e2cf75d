//! Conditional chains and iteration.

use mpgen_ast::{ConditionalChain, Element, GuardKind, Iteration};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::pass::GenerationPass;
use crate::{handle_lookup, require_handle, GenerateError};

/// Leading `item.` of a key path.
static KEY_SCOPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w*\.").unwrap());

impl GenerationPass<'_> {
    /// Emit every branch of the chain led by `lead`, in order.
    ///
    /// The lead renders as the `if` branch (or under `guard` when the lead is
    /// itself a member of an enclosing chain); a leading `if` entry stands for
    /// the lead and its body is not rendered again. The remaining bodies go
    /// through the driver under their own guards. A lead is emitted once per
    /// pass; meeting it again yields nothing.
    pub(crate) fn chain(
        &mut self,
        lead: &Element,
        chain: &ConditionalChain,
        guard: Option<GuardKind>,
    ) -> Result<String, GenerateError> {
        if !self.emitted_chains.insert(lead as *const Element) {
            return Ok(String::new());
        }
        check_chain_order(lead, chain)?;

        let rest = match chain.branches.split_first() {
            Some((first, rest)) if first.guard_kind == GuardKind::If => rest,
            _ => chain.branches.as_slice(),
        };

        let mut out = self.element_or_component(lead, Some(guard.unwrap_or(GuardKind::If)))?;
        for (index, branch) in rest.iter().enumerate() {
            let body = self
                .generate_guarded(&branch.body, Some(branch.guard_kind))
                .map_err(|err| err.at_position(index + 1))?;
            out.push_str(&body);
        }
        Ok(out)
    }
}

/// `if` may only open a chain and `else` may only close it.
fn check_chain_order(lead: &Element, chain: &ConditionalChain) -> Result<(), GenerateError> {
    let last = chain.branches.len().saturating_sub(1);
    for (index, branch) in chain.branches.iter().enumerate() {
        match branch.guard_kind {
            GuardKind::If if index > 0 => {
                return Err(GenerateError::malformed_chain(&lead.tag, "`if` branch after the first position"));
            }
            GuardKind::Else if index < last => {
                return Err(GenerateError::malformed_chain(&lead.tag, "`else` branch before the last position"));
            }
            _ => {}
        }
    }
    Ok(())
}

pub(crate) fn guard_name(guard: GuardKind) -> &'static str {
    match guard {
        GuardKind::If => "if",
        GuardKind::ElseIf => "elif",
        GuardKind::Else => "else",
    }
}

/// ` wx:if="{{ _h[ n ]._if }}"`, ` wx:elif="…"` or ` wx:else`.
pub fn guard_attr(el: &Element, guard: GuardKind) -> Result<String, GenerateError> {
    if guard == GuardKind::Else {
        return Ok(" wx:else".to_string());
    }
    let handle = require_handle(el, "condition")?;
    Ok(format!(
        " wx:{}=\"{}\"",
        guard_name(guard),
        handle_lookup(handle, "_if")
    ))
}

/// ` wx:for="{{ _h[ n ].li }}"` plus optional index alias and stability key.
pub fn iteration_attrs(el: &Element, iteration: &Iteration) -> Result<String, GenerateError> {
    let handle = require_handle(el, "iteration")?;
    let mut out = format!(" wx:for=\"{}\"", handle_lookup(handle, "li"));

    if let Some(index) = iteration.index_variable.as_deref().filter(|i| !i.is_empty()) {
        out.push_str(&format!(" wx:for-index=\"{index}\""));
    }
    let key = KEY_SCOPE.replace(iteration.key_path.as_deref().unwrap_or_default(), "");
    if !key.is_empty() {
        out.push_str(&format!(" wx:key=\"{key}\""));
    }
    Ok(out)
}

/// Repetition guard followed by the conditional guard, in that order.
pub fn directive_attrs(el: &Element, guard: Option<GuardKind>) -> Result<String, GenerateError> {
    let mut out = String::new();
    if let Some(iteration) = &el.iteration {
        out.push_str(&iteration_attrs(el, iteration)?);
    }
    if let Some(guard) = guard {
        out.push_str(&guard_attr(el, guard)?);
    }
    Ok(out)
}
