//! Error State Binder
//!
//! Wires a select to the form's validation state. The binding is a class
//! template (`{ 'error': errors['color'] }`) that the client runtime
//! re-evaluates whenever validation state changes. Resolution only reads the
//! lookup's class name; the error flag itself is never evaluated here.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

use crate::config::ErrorConfig;
use crate::error::BindingError;
use crate::naming::js_string;

pub const ERROR_SCOPE: &str = "errors";

lazy_static! {
    static ref CSS_CLASS: Regex = Regex::new(r"^-?[_a-zA-Z][_a-zA-Z0-9-]*$").unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════════
// ERROR LOOKUP CAPABILITY
// ═══════════════════════════════════════════════════════════════════════════════

/// Read side of the form's validation state.
///
/// Implementations must tolerate concurrent reads: independent selects may be
/// resolved on different threads against the same lookup.
pub trait ErrorLookup: Send + Sync {
    fn has_error(&self, attr_key: &str) -> bool;

    /// Class applied to the control while its field has an error.
    fn error_class_name(&self) -> &str;

    /// Client expression the runtime evaluates to get the live error flag.
    fn error_flag_expression(&self, attr_key: &str) -> String {
        format!("{}[{}]", ERROR_SCOPE, js_string(attr_key))
    }
}

/// In-process validation state: field key to error messages.
#[derive(Debug, Default)]
pub struct FormErrors {
    config: ErrorConfig,
    errors: RwLock<HashMap<String, Vec<String>>>,
}

impl FormErrors {
    pub fn new(config: ErrorConfig) -> Self {
        Self {
            config,
            errors: RwLock::new(HashMap::new()),
        }
    }

    pub fn set(&self, attr_key: &str, messages: Vec<String>) {
        let mut errors = self.errors.write().unwrap_or_else(|e| e.into_inner());
        if messages.is_empty() {
            errors.remove(attr_key);
        } else {
            errors.insert(attr_key.to_string(), messages);
        }
    }

    pub fn add(&self, attr_key: &str, message: impl Into<String>) {
        let mut errors = self.errors.write().unwrap_or_else(|e| e.into_inner());
        errors
            .entry(attr_key.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn clear(&self, attr_key: &str) {
        let mut errors = self.errors.write().unwrap_or_else(|e| e.into_inner());
        errors.remove(attr_key);
    }

    pub fn clear_all(&self) {
        let mut errors = self.errors.write().unwrap_or_else(|e| e.into_inner());
        errors.clear();
    }

    pub fn messages(&self, attr_key: &str) -> Vec<String> {
        let errors = self.errors.read().unwrap_or_else(|e| e.into_inner());
        errors.get(attr_key).cloned().unwrap_or_default()
    }
}

impl ErrorLookup for FormErrors {
    fn has_error(&self, attr_key: &str) -> bool {
        let errors = self.errors.read().unwrap_or_else(|e| e.into_inner());
        errors.get(attr_key).is_some_and(|m| !m.is_empty())
    }

    fn error_class_name(&self) -> &str {
        &self.config.input_class
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ERROR BINDING
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBinding {
    pub attr_key: String,
    pub class_name: String,
    /// Unevaluated flag expression, e.g. `errors['color']`.
    pub flag_expression: String,
}

impl ErrorBinding {
    /// The `v-bind:class` template.
    pub fn render(&self) -> String {
        format!(
            "{{ {}: {} }}",
            js_string(&self.class_name),
            self.flag_expression
        )
    }

    /// Classes the client would apply right now, given the lookup's current state.
    pub fn evaluate(&self, lookup: &dyn ErrorLookup) -> Vec<String> {
        if lookup.has_error(&self.attr_key) {
            vec![self.class_name.clone()]
        } else {
            Vec::new()
        }
    }
}

pub fn is_valid_class_name(name: &str) -> bool {
    CSS_CLASS.is_match(name)
}

/// Builds the error class template for `attr_key` without querying the flag.
pub fn error_binding(attr_key: &str, lookup: &dyn ErrorLookup) -> Result<ErrorBinding, BindingError> {
    let class_name = lookup.error_class_name();
    if !is_valid_class_name(class_name) {
        return Err(BindingError::InvalidErrorClass {
            class_name: class_name.to_string(),
        });
    }

    Ok(ErrorBinding {
        attr_key: attr_key.to_string(),
        class_name: class_name.to_string(),
        flag_expression: lookup.error_flag_expression(attr_key),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingLookup {
        calls: AtomicUsize,
    }

    impl ErrorLookup for CountingLookup {
        fn has_error(&self, _attr_key: &str) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            true
        }

        fn error_class_name(&self) -> &str {
            "is-invalid"
        }
    }

    #[test]
    fn test_binding_is_a_template() {
        let errors = FormErrors::default();
        let binding = error_binding("color", &errors).unwrap();
        assert_eq!(binding.render(), "{ 'error': errors['color'] }");
        assert!(!binding.render().contains("true"));
        assert!(!binding.render().contains("false"));
    }

    #[test]
    fn test_binding_does_not_query_the_flag() {
        let lookup = CountingLookup {
            calls: AtomicUsize::new(0),
        };
        let binding = error_binding("color", &lookup).unwrap();
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
        assert_eq!(binding.class_name, "is-invalid");

        assert_eq!(binding.evaluate(&lookup), vec!["is-invalid".to_string()]);
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_evaluation_follows_lookup_changes() {
        let errors = FormErrors::default();
        let binding = error_binding("color", &errors).unwrap();
        assert!(binding.evaluate(&errors).is_empty());

        errors.add("color", "can't be blank");
        assert_eq!(binding.evaluate(&errors), vec!["error".to_string()]);

        errors.clear("color");
        assert!(binding.evaluate(&errors).is_empty());
    }

    #[test]
    fn test_form_errors_bookkeeping() {
        let errors = FormErrors::new(ErrorConfig {
            input_class: "has-error".to_string(),
        });
        errors.set("a", vec!["x".to_string(), "y".to_string()]);
        errors.add("b", "z");
        assert_eq!(errors.messages("a").len(), 2);
        assert!(errors.has_error("b"));

        errors.set("a", vec![]);
        assert!(!errors.has_error("a"));

        errors.clear_all();
        assert!(!errors.has_error("b"));
        assert!(errors.messages("b").is_empty());
        assert_eq!(errors.error_class_name(), "has-error");
    }

    #[test]
    fn test_rejects_invalid_class_name() {
        let errors = FormErrors::new(ErrorConfig {
            input_class: "bad class".to_string(),
        });
        let err = error_binding("color", &errors).unwrap_err();
        assert_eq!(
            err,
            BindingError::InvalidErrorClass {
                class_name: "bad class".to_string()
            }
        );
        assert!(is_valid_class_name("is-invalid"));
        assert!(is_valid_class_name("_x1"));
        assert!(!is_valid_class_name("1abc"));
    }

    #[test]
    fn test_flag_expression_escapes_key() {
        let errors = FormErrors::default();
        let binding = error_binding("o'neil", &errors).unwrap();
        assert_eq!(binding.flag_expression, "errors['o\\'neil']");
    }
}
