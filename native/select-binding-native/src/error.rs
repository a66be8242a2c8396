//! Binding Errors
//!
//! Every fatal configuration problem the resolver can report. Each variant
//! carries a stable diagnostic code so the rendering engine can surface it
//! next to the control that caused it.

use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// DIAGNOSTIC CODES
// ═══════════════════════════════════════════════════════════════════════════════

pub const ERR_MISSING_KEY: &str = "SEL-ERR-KEY-001";
pub const ERR_MISSING_OPTIONS: &str = "SEL-ERR-OPTIONS-001";
pub const ERR_OPTIONS_NOT_LIST: &str = "SEL-ERR-OPTIONS-002";
pub const ERR_EMPTY_OPTIONS: &str = "SEL-ERR-OPTIONS-003";
pub const ERR_INVALID_OPTION: &str = "SEL-ERR-OPTIONS-004";
pub const ERR_INVALID_ERROR_CLASS: &str = "SEL-ERR-CLASS-001";
pub const ERR_INVALID_EXPRESSION: &str = "SEL-ERR-SYNTAX-001";
pub const ERR_FROZEN_ERROR_BINDING: &str = "SEL-ERR-REACTIVE-001";
pub const ERR_CONFIG: &str = "SEL-ERR-CONFIG-001";

// ═══════════════════════════════════════════════════════════════════════════════
// BINDING ERROR
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindingError {
    #[error("SEL-ERR-KEY-001: select requires a non-empty `key`")]
    MissingAttrKey,

    #[error("SEL-ERR-OPTIONS-001: select `{attr_key}` requires `options`")]
    MissingOptions { attr_key: String },

    #[error("SEL-ERR-OPTIONS-002: `options` of select `{attr_key}` must be a list, got {found}")]
    OptionsNotAList { attr_key: String, found: String },

    #[error("SEL-ERR-OPTIONS-003: select `{attr_key}` has an empty option list")]
    EmptyOptions { attr_key: String },

    #[error("SEL-ERR-OPTIONS-004: option #{index} of select `{attr_key}` is neither a scalar nor a [label, value] pair: {found}")]
    InvalidOption {
        attr_key: String,
        index: usize,
        found: String,
    },

    #[error("SEL-ERR-CLASS-001: '{class_name}' is not a valid CSS class name")]
    InvalidErrorClass { class_name: String },

    #[error("SEL-ERR-SYNTAX-001: binding `{attribute}` is not a valid expression: {details}")]
    InvalidExpression { attribute: String, details: String },

    #[error("SEL-ERR-REACTIVE-001: error class binding `{expression}` does not reference a live error flag")]
    FrozenErrorBinding { expression: String },

    #[error("SEL-ERR-CONFIG-001: invalid select configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for BindingError {
    fn from(e: serde_json::Error) -> Self {
        BindingError::Config(e.to_string())
    }
}

impl BindingError {
    pub fn code(&self) -> &'static str {
        match self {
            BindingError::MissingAttrKey => ERR_MISSING_KEY,
            BindingError::MissingOptions { .. } => ERR_MISSING_OPTIONS,
            BindingError::OptionsNotAList { .. } => ERR_OPTIONS_NOT_LIST,
            BindingError::EmptyOptions { .. } => ERR_EMPTY_OPTIONS,
            BindingError::InvalidOption { .. } => ERR_INVALID_OPTION,
            BindingError::InvalidErrorClass { .. } => ERR_INVALID_ERROR_CLASS,
            BindingError::InvalidExpression { .. } => ERR_INVALID_EXPRESSION,
            BindingError::FrozenErrorBinding { .. } => ERR_FROZEN_ERROR_BINDING,
            BindingError::Config(_) => ERR_CONFIG,
        }
    }

    /// Fix suggestions shown alongside the message.
    pub fn hints(&self) -> Vec<String> {
        match self {
            BindingError::MissingAttrKey => vec![
                "Pass the model field this select writes to, e.g. `key: \"color\"`.".to_string(),
            ],
            BindingError::MissingOptions { .. } | BindingError::EmptyOptions { .. } => vec![
                "Provide at least one option: `options: [\"red\", \"green\"]`.".to_string(),
                "Use [label, value] pairs to show a label different from the value.".to_string(),
            ],
            BindingError::OptionsNotAList { .. } => {
                vec!["`options` must be a JSON array of scalars or [label, value] pairs.".to_string()]
            }
            BindingError::InvalidOption { .. } => vec![
                "Each option is either a scalar (\"red\", 1) or a pair [\"Red\", 1].".to_string(),
            ],
            BindingError::InvalidErrorClass { .. } => {
                vec!["Configure an input error class such as `error` or `is-invalid`.".to_string()]
            }
            BindingError::InvalidExpression { .. } => {
                vec!["Use a key made of identifier characters, dots or dashes.".to_string()]
            }
            BindingError::FrozenErrorBinding { .. } => vec![
                "The error flag must stay a runtime reference so validation can toggle it."
                    .to_string(),
            ],
            BindingError::Config(_) => vec![],
        }
    }
}
