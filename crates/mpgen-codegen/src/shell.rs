//! Import preamble, template envelope and the failure boundary.
//!
//! Templates are compiled in batches; one broken template must not take the
//! batch down. Anything raised while walking the tree (including a panic)
//! stops here and becomes a diagnostic document under the same template name.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use mpgen_ast::{GeneratorOptions, Node};

use crate::{GenerateError, GenerationPass};

/// Marker opening every diagnostic document body.
pub const DIAGNOSTIC_MARKER: &str = "compile error";

/// A generated document and, when it is a diagnostic, the failure behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub document: String,
    pub failure: Option<GenerateError>,
}

impl Generated {
    pub fn is_ok(&self) -> bool {
        self.failure.is_none()
    }
}

/// Generates complete template documents for one set of options.
pub struct TemplateGenerator<'o> {
    options: &'o GeneratorOptions,
}

impl<'o> TemplateGenerator<'o> {
    pub fn new(options: &'o GeneratorOptions) -> Self {
        Self { options }
    }

    /// Imports followed by the named template. Never fails: on error the
    /// template body is replaced by a diagnostic.
    pub fn generate(&self, ast: &Node) -> String {
        self.generate_checked(ast).document
    }

    /// Like [`generate`](Self::generate), but also hands back the failure
    /// that produced a diagnostic document, if any.
    pub fn generate_checked(&self, ast: &Node) -> Generated {
        let name = &self.options.template_name;
        tracing::debug!(template = %name, "generating template");

        match self.try_generate(ast) {
            Ok(body) => {
                let document = format!("{}{}", imports(self.options), envelope(name, &body));
                tracing::debug!(template = %name, bytes = document.len(), "template generated");
                Generated {
                    document,
                    failure: None,
                }
            }
            Err(err) => {
                tracing::warn!(
                    template = %name,
                    error = %err,
                    trace = %err.trace(),
                    "template generation failed, emitting diagnostic document"
                );
                Generated {
                    document: diagnostic_document(name, &err),
                    failure: Some(err),
                }
            }
        }
    }

    /// The template body alone, or the error that stopped it.
    ///
    /// Each call is a fresh pass, so repeated calls on the same tree agree.
    pub fn try_generate(&self, ast: &Node) -> Result<String, GenerateError> {
        let mut pass = GenerationPass::new(self.options);
        panic::catch_unwind(AssertUnwindSafe(|| pass.generate_node(ast)))
            .unwrap_or_else(|payload| Err(GenerateError::internal(panic_message(payload.as_ref()))))
    }
}

/// One `<import src="…"/>` per import table entry, in table order.
pub fn imports(options: &GeneratorOptions) -> String {
    options
        .import_table
        .values()
        .map(|entry| format!("<import src=\"{}\"/>", entry.source_path))
        .collect()
}

pub fn envelope(name: &str, body: &str) -> String {
    format!("<template name=\"{name}\">{body}</template>")
}

/// Replacement document carrying the failure message and its origin trace.
pub fn diagnostic_document(name: &str, err: &GenerateError) -> String {
    envelope(
        name,
        &format!("{DIAGNOSTIC_MARKER}: {err}\n{}", err.trace()),
    )
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
