//! WASM bindings for the mpgen template generator.
//!
//! Exposes `generateTemplate()` to JavaScript via wasm-bindgen. The AST and
//! options are passed as plain JS objects in the same shape as the JSON
//! hand-off. Returns `{ template, ok }`; only malformed input throws.

use mpgen_ast::{GeneratorOptions, Node};
use mpgen_codegen::{Generated, TemplateGenerator};
use wasm_bindgen::prelude::*;

/// Generate a template document from an annotated AST.
///
/// `options` may be `undefined`/`null`, in which case defaults apply.
#[wasm_bindgen(js_name = generateTemplate)]
pub fn generate_template(ast: JsValue, options: JsValue) -> Result<JsValue, JsError> {
    let ast: Node =
        serde_wasm_bindgen::from_value(ast).map_err(|e| JsError::new(&e.to_string()))?;
    let options: GeneratorOptions = if options.is_undefined() || options.is_null() {
        GeneratorOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsError::new(&e.to_string()))?
    };

    let generated = generate(&ast, &options);

    let js_obj = js_sys::Object::new();
    js_sys::Reflect::set(&js_obj, &"template".into(), &generated.document.into())
        .map_err(|_| JsError::new("Failed to set template property"))?;
    js_sys::Reflect::set(&js_obj, &"ok".into(), &generated.failure.is_none().into())
        .map_err(|_| JsError::new("Failed to set ok property"))?;

    Ok(js_obj.into())
}

fn generate(ast: &Node, options: &GeneratorOptions) -> Generated {
    TemplateGenerator::new(options).generate_checked(ast)
}

/// Get the generator version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // =========================================================================
    // Native tests (non-WASM) — verify the generation pipeline works
    // =========================================================================

    fn native_generate(ast: &str, options: &str) -> Generated {
        let ast = Node::from_json(ast).unwrap();
        let options = GeneratorOptions::from_json(options).unwrap();
        generate(&ast, &options)
    }

    #[test]
    fn test_static_text() {
        let out = native_generate(r#"{"type": "text", "text": "hi", "isStatic": true}"#, "{}");
        assert!(out.is_ok());
        assert_eq!(out.document, "<template name=\"defaultName\">hi</template>");
    }

    #[test]
    fn test_component_page() {
        let out = native_generate(
            r#"{
                "type": "element",
                "tag": "div",
                "children": [
                    {"type": "element", "tag": "counter", "componentRefId": 2},
                    {"type": "text", "bindingHandleId": 0}
                ]
            }"#,
            r#"{
                "templateName": "index",
                "importTable": {"counter": {"sourcePath": "counter.wxml", "contentHash": "f00d"}}
            }"#,
        );
        assert!(out.is_ok());
        assert_eq!(
            out.document,
            "<import src=\"counter.wxml\"/><template name=\"index\"><view class=\"_div\">\
             <template is=\"counterf00d\" data=\"{{...$root[ $kk + 2 ], $root, $defaultSlot: 'defaultSlot'}}\"/>\
             {{ _h[ 0 ].t }}</view></template>"
        );
    }

    #[test]
    fn test_failure_is_not_an_error() {
        let out = native_generate(r#"{"type": "text"}"#, r#"{"templateName": "bad"}"#);
        assert!(!out.is_ok());
        assert!(out.document.starts_with("<template name=\"bad\">compile error: "));
    }

    #[test]
    fn test_version() {
        let v = version();
        assert!(!v.is_empty());
        assert!(v.contains('.'));
    }

    #[test]
    fn test_multiple_generations() {
        // Verify no state leakage between passes
        let ast = r#"{"type": "element", "tag": "view", "bindingHandleId": 1,
            "conditionalChain": [{"guardKind": "else", "body": {"type": "element", "tag": "view"}}]}"#;
        let out1 = native_generate(ast, "{}");
        let out2 = native_generate(ast, "{}");
        assert_eq!(out1, out2);
        assert!(out2.document.contains("wx:else"));
    }
}
