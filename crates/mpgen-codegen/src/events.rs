//! Event binder.
//!
//! Every bound event becomes a bind attribute pointing at the shared runtime
//! dispatcher. The dispatcher finds the handler through `data-cid` (component
//! instance) and `data-hid` (binding handle) on the element that fired.

use mpgen_ast::{Element, Modifiers};

use crate::{require_handle, GenerateError};

/// Runtime handler every event attribute points at.
pub const DISPATCH_HANDLER: &str = "proxyEvent";

/// Event attribute prefix, selecting propagation semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binder {
    Bind,
    /// Stops propagation.
    Catch,
    /// Fires during the capture phase.
    Capture,
}

impl Binder {
    pub fn for_modifiers(modifiers: &Modifiers) -> Self {
        if modifiers.stop {
            Binder::Catch
        } else if modifiers.capture {
            Binder::Capture
        } else {
            Binder::Bind
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            Binder::Bind => "bind",
            Binder::Catch => "catchbind",
            Binder::Capture => "capturebind",
        }
    }
}

/// Map a source event type onto the host's event name.
pub fn target_event_type<'a>(tag: &str, event_type: &'a str) -> &'a str {
    match event_type {
        "change" if matches!(tag, "input" | "textarea") => "blur",
        "click" => "tap",
        other => other,
    }
}

/// ` data-cid=… data-hid=… bindtap="proxyEvent" …`, or nothing without events.
pub fn event_attrs(el: &Element) -> Result<String, GenerateError> {
    let events = match &el.events {
        Some(events) if !events.is_empty() => events,
        _ => return Ok(String::new()),
    };
    let handle = require_handle(el, "event binding")?;

    let bindings: Vec<String> = events
        .iter()
        .map(|(event_type, binding)| {
            format!(
                "{}{}=\"{DISPATCH_HANDLER}\"",
                Binder::for_modifiers(&binding.modifiers).prefix(),
                target_event_type(&el.tag, event_type),
            )
        })
        .collect();

    Ok(format!(
        " data-cid=\"{{{{ cid }}}}\" data-hid=\"{{{{ {handle} }}}}\" {}",
        bindings.join(" ")
    ))
}
