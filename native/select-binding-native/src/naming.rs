//! Key & Reference Builder
//!
//! Stable identifiers derived from the attribute key. All of these are pure
//! string functions: the same inputs always produce the same names, so the
//! client runtime can attach listeners and refs idempotently across renders.

use crate::option::OptionValue;

pub const REF_PREFIX: &str = "select";
pub const CHANGE_HANDLER: &str = "inputChanged";
pub const MODEL_SCOPE: &str = "data";

/// Name the render engine uses to get a handle on the rendered control.
///
/// `select.color` for a single select, `select.multiple.color` otherwise.
pub fn reference_name(attr_key: &str, multiple: bool) -> String {
    if multiple {
        format!("{}.multiple.{}", REF_PREFIX, attr_key)
    } else {
        format!("{}.{}", REF_PREFIX, attr_key)
    }
}

pub fn change_event_key(attr_key: &str) -> String {
    format!("{}({})", CHANGE_HANDLER, attr_key)
}

/// Per-option DOM id. Falls back to the attribute key when the control has
/// no `id` of its own. Two options with equal values collide; that is a
/// configuration mistake of the caller.
pub fn option_dom_id(base_dom_id: Option<&str>, attr_key: &str, value: &OptionValue) -> String {
    format!("{}_{}", base_dom_id.unwrap_or(attr_key), value)
}

pub fn option_internal_name(attr_key: &str, value: &OptionValue) -> String {
    format!("{}_{}", attr_key, value)
}

/// Live reference to the bound model field, e.g. `data['color']`.
pub fn model_target(attr_key: &str) -> String {
    format!("{}[{}]", MODEL_SCOPE, js_string(attr_key))
}

/// Quotes `raw` as a single-quoted JavaScript string literal.
pub fn js_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('\'');
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_name() {
        assert_eq!(reference_name("color", false), "select.color");
        assert_eq!(reference_name("level", true), "select.multiple.level");
    }

    #[test]
    fn test_reference_name_depends_on_multiplicity() {
        for key in ["color", "user.role", "a"] {
            let single = reference_name(key, false);
            let multi = reference_name(key, true);
            assert_ne!(single, multi);
            assert!(single.ends_with(key));
            assert!(multi.ends_with(key));
        }
    }

    #[test]
    fn test_change_event_key_is_stable() {
        let first = change_event_key("color");
        assert_eq!(first, "inputChanged(color)");
        for _ in 0..3 {
            assert_eq!(change_event_key("color"), first);
        }
    }

    #[test]
    fn test_option_identifiers() {
        let value = OptionValue::Integer(2);
        assert_eq!(option_dom_id(None, "level", &value), "level_2");
        assert_eq!(option_dom_id(Some("lvl"), "level", &value), "lvl_2");
        assert_eq!(option_internal_name("level", &value), "level_2");
        assert_eq!(
            option_internal_name("color", &OptionValue::from("red")),
            "color_red"
        );
    }

    #[test]
    fn test_model_target_escapes_key() {
        assert_eq!(model_target("color"), "data['color']");
        assert_eq!(model_target("it's"), "data['it\\'s']");
        assert_eq!(js_string("a\\b"), "'a\\\\b'");
    }
}
