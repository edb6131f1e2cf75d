//! Class, style and generic attribute emission.
//!
//! Static parts are copied through (with source quoting removed); dynamic
//! parts become lookups on the element's binding handle.

use mpgen_ast::Element;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{handle_lookup, require_handle, GenerateError};

/// `v-bind:name` / `:name`
static BIND_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(v-bind)?:").unwrap());

/// `v-on:name` / `@name`. Event attributes are rendered by the event binder.
static EVENT_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^v-on:|@").unwrap());

static STYLE_QUOTING: Lazy<Regex> = Lazy::new(|| Regex::new(r#"["{}]"#).unwrap());

/// ` class="_tag static {{ _h[ n ].cl }}"`. Always present.
pub fn class_attr(el: &Element) -> Result<String, GenerateError> {
    let mut tokens = vec![format!("_{}", el.tag)];

    let static_class = el.static_class.as_deref().unwrap_or_default().replace('"', "");
    if !static_class.is_empty() {
        tokens.push(static_class);
    }
    if el.class_binding {
        let handle = require_handle(el, "class binding")?;
        tokens.push(handle_lookup(handle, "cl"));
    }

    Ok(format!(" class=\"{}\"", tokens.join(" ")))
}

/// ` style="a:b; c:d {{ _h[ n ].st }}"`, or nothing when there is no style.
pub fn style_attr(el: &Element) -> Result<String, GenerateError> {
    let mut parts = Vec::new();

    let static_style = normalize_static_style(el.static_style.as_deref().unwrap_or_default());
    if !static_style.is_empty() {
        parts.push(static_style);
    }
    if el.style_binding {
        let handle = require_handle(el, "style binding")?;
        parts.push(handle_lookup(handle, "st"));
    }

    if parts.is_empty() {
        return Ok(String::new());
    }
    Ok(format!(" style=\"{}\"", parts.join(" ")))
}

/// `{"color":"red","width":"10px"}` → `color:red; width:10px`
fn normalize_static_style(style: &str) -> String {
    STYLE_QUOTING
        .replace_all(style, "")
        .split(',')
        .collect::<Vec<_>>()
        .join("; ")
}

/// Every remaining attribute, space separated with a leading space, or nothing.
pub fn generic_attrs(el: &Element) -> Result<String, GenerateError> {
    let mut rendered = Vec::new();

    for attr in &el.attributes_list {
        if EVENT_PREFIX.is_match(&attr.name) {
            continue;
        }
        if BIND_PREFIX.is_match(&attr.name) {
            let name = BIND_PREFIX.replace(&attr.name, "");
            let handle = require_handle(el, "bound attribute")?;
            rendered.push(format!("{name}=\"{{{{ _h[ {handle} ][ '{name}' ] }}}}\""));
        } else {
            rendered.push(format!("{}=\"{}\"", attr.name, attr.value));
        }
    }

    if rendered.is_empty() {
        return Ok(String::new());
    }
    Ok(format!(" {}", rendered.join(" ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use mpgen_ast::Attr;
    use pretty_assertions::assert_eq;

    fn element(tag: &str, handle: Option<u32>) -> Element {
        let mut el = Element::new(tag);
        el.binding_handle_id = handle;
        el
    }

    // =========================================================================
    // class
    // =========================================================================

    #[test]
    fn test_class_tag_token_only() {
        assert_eq!(class_attr(&element("view", None)).unwrap(), " class=\"_view\"");
    }

    #[test]
    fn test_class_static_quotes_stripped() {
        let mut el = element("div", None);
        el.static_class = Some("\"card active\"".into());
        assert_eq!(class_attr(&el).unwrap(), " class=\"_div card active\"");
    }

    #[test]
    fn test_class_binding() {
        let mut el = element("div", Some(2));
        el.static_class = Some("card".into());
        el.class_binding = true;
        assert_eq!(
            class_attr(&el).unwrap(),
            " class=\"_div card {{ _h[ 2 ].cl }}\""
        );
    }

    #[test]
    fn test_class_binding_needs_handle() {
        let mut el = element("div", None);
        el.class_binding = true;
        let err = class_attr(&el).unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::MissingHandle {
                tag: "div".into(),
                what: "class binding"
            }
        );
    }

    // =========================================================================
    // style
    // =========================================================================

    #[test]
    fn test_style_absent() {
        assert_eq!(style_attr(&element("view", Some(1))).unwrap(), "");
    }

    #[test]
    fn test_style_empty_static() {
        let mut el = element("view", None);
        el.static_style = Some(String::new());
        assert_eq!(style_attr(&el).unwrap(), "");
    }

    #[test]
    fn test_style_static_normalized() {
        let mut el = element("view", None);
        el.static_style = Some("{\"color\":\"red\",\"font-size\":\"12px\"}".into());
        assert_eq!(
            style_attr(&el).unwrap(),
            " style=\"color:red; font-size:12px\""
        );
    }

    #[test]
    fn test_style_binding_only() {
        let mut el = element("view", Some(6));
        el.style_binding = true;
        assert_eq!(style_attr(&el).unwrap(), " style=\"{{ _h[ 6 ].st }}\"");
    }

    #[test]
    fn test_style_static_and_binding() {
        let mut el = element("view", Some(6));
        el.static_style = Some("{\"margin\":\"0\"}".into());
        el.style_binding = true;
        assert_eq!(
            style_attr(&el).unwrap(),
            " style=\"margin:0 {{ _h[ 6 ].st }}\""
        );
    }

    // =========================================================================
    // generic attributes
    // =========================================================================

    #[test]
    fn test_attrs_none() {
        assert_eq!(generic_attrs(&element("view", None)).unwrap(), "");
    }

    #[test]
    fn test_attrs_literal() {
        let mut el = element("image", None);
        el.attributes_list.push(Attr::new("src", "logo.png"));
        el.attributes_list.push(Attr::new("mode", "aspectFit"));
        assert_eq!(
            generic_attrs(&el).unwrap(),
            " src=\"logo.png\" mode=\"aspectFit\""
        );
    }

    #[test]
    fn test_attrs_bound() {
        let mut el = element("image", Some(3));
        el.attributes_list.push(Attr::new(":src", "url"));
        el.attributes_list.push(Attr::new("v-bind:alt", "label"));
        assert_eq!(
            generic_attrs(&el).unwrap(),
            " src=\"{{ _h[ 3 ][ 'src' ] }}\" alt=\"{{ _h[ 3 ][ 'alt' ] }}\""
        );
    }

    #[test]
    fn test_attrs_events_dropped() {
        let mut el = element("button", Some(1));
        el.attributes_list.push(Attr::new("@click", "go"));
        el.attributes_list.push(Attr::new("v-on:touchstart", "press"));
        el.attributes_list.push(Attr::new("type", "primary"));
        assert_eq!(generic_attrs(&el).unwrap(), " type=\"primary\"");
    }

    #[test]
    fn test_attrs_bound_needs_handle() {
        let mut el = element("image", None);
        el.attributes_list.push(Attr::new(":src", "url"));
        assert!(generic_attrs(&el).is_err());
    }
}
