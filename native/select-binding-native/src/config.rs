//! Select Configuration
//!
//! The immutable input of one binding resolution. The rendering engine hands
//! over a JSON object using the declared keys of the select control
//! (`key`, `options`, `multiple`, `init`, `placeholder`, `disabledValues`,
//! `for`, `label`) plus the optional `id` html attribute and raw `attributes`
//! overrides. Rust callers can build the same value with [`SelectConfig::new`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::BindingError;
use crate::option::{normalize_options, OptionValue, SelectOption};

// ═══════════════════════════════════════════════════════════════════════════════
// RAW INPUT
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSelectConfig {
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    options: Option<Value>,
    #[serde(default)]
    multiple: bool,
    #[serde(default, alias = "initValue")]
    init: Option<Value>,
    #[serde(default)]
    placeholder: Option<String>,
    #[serde(default, alias = "disabled_values")]
    disabled_values: Option<Vec<Value>>,
    #[serde(default, rename = "for")]
    input_for: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    attributes: Map<String, Value>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// SELECT CONFIG
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct SelectConfig {
    /// Model field the select writes to.
    pub attr_key: String,
    pub options: Vec<SelectOption>,
    pub multiple: bool,
    pub disabled_values: Vec<OptionValue>,
    /// Always a list; a scalar `init` becomes a one-element list.
    pub init_value: Vec<OptionValue>,
    pub placeholder: Option<String>,
    pub label: Option<String>,
    pub input_for: Option<String>,
    /// Base for per-option DOM ids, taken from the `id` html attribute.
    pub dom_id: Option<String>,
    /// Caller overrides, applied on top of the computed bindings.
    pub attributes: Map<String, Value>,
}

impl SelectConfig {
    pub fn new(attr_key: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            attr_key: attr_key.into(),
            options,
            multiple: false,
            disabled_values: Vec::new(),
            init_value: Vec::new(),
            placeholder: None,
            label: None,
            input_for: None,
            dom_id: None,
            attributes: Map::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, BindingError> {
        let raw: RawSelectConfig = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    pub fn from_value(value: Value) -> Result<Self, BindingError> {
        let raw: RawSelectConfig = serde_json::from_value(value)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawSelectConfig) -> Result<Self, BindingError> {
        let attr_key = match raw.key {
            Some(key) if !key.trim().is_empty() => key,
            _ => return Err(BindingError::MissingAttrKey),
        };

        let options = match &raw.options {
            Some(options) => normalize_options(&attr_key, options)?,
            None => return Err(BindingError::MissingOptions { attr_key }),
        };

        let init_value = init_values(raw.init.as_ref())?;
        let disabled_values = disabled_scalars(&attr_key, raw.disabled_values.unwrap_or_default());

        Ok(Self {
            attr_key,
            options,
            multiple: raw.multiple,
            disabled_values,
            init_value,
            placeholder: raw.placeholder,
            label: raw.label,
            input_for: raw.input_for,
            dom_id: raw.id,
            attributes: raw.attributes,
        })
    }

    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn with_disabled_values<V: Into<OptionValue>>(
        mut self,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.disabled_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_init_value<V: Into<OptionValue>>(
        mut self,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.init_value = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_for(mut self, input_for: impl Into<String>) -> Self {
        self.input_for = Some(input_for.into());
        self
    }

    pub fn with_dom_id(mut self, id: impl Into<String>) -> Self {
        self.dom_id = Some(id.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn is_disabled(&self, value: &OptionValue) -> bool {
        self.disabled_values.iter().any(|d| d.loosely_eq(value))
    }
}

/// Keeps the scalar entries; anything else can never match an option.
fn disabled_scalars(attr_key: &str, raw: Vec<Value>) -> Vec<OptionValue> {
    raw.iter()
        .filter_map(|entry| {
            let value = OptionValue::from_json(entry);
            if value.is_none() {
                debug!(attr_key, entry = %entry, "ignoring non-scalar disabled value");
            }
            value
        })
        .collect()
}

fn init_values(init: Option<&Value>) -> Result<Vec<OptionValue>, BindingError> {
    match init {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items.iter().map(init_scalar).collect(),
        Some(other) => Ok(vec![init_scalar(other)?]),
    }
}

fn init_scalar(value: &Value) -> Result<OptionValue, BindingError> {
    OptionValue::from_json(value)
        .ok_or_else(|| BindingError::Config(format!("`init` entry {} is not a scalar", value)))
}

// ═══════════════════════════════════════════════════════════════════════════════
// RESOLVER SETTINGS
// ═══════════════════════════════════════════════════════════════════════════════

/// Class applied to a select whose field currently fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorConfig {
    #[serde(default = "default_input_class")]
    pub input_class: String,
}

fn default_input_class() -> String {
    "error".to_string()
}

impl Default for ErrorConfig {
    fn default() -> Self {
        Self {
            input_class: default_input_class(),
        }
    }
}

impl ErrorConfig {
    pub fn from_json(json: &str) -> Result<Self, BindingError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveOptions {
    /// Resolve an empty option list with no type preference instead of failing.
    #[serde(default)]
    pub allow_empty_options: bool,
    /// Parse every generated expression before handing it out.
    #[serde(default = "default_true")]
    pub verify_expressions: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            allow_empty_options: false,
            verify_expressions: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_reads_declared_keys() {
        let config = SelectConfig::from_value(json!({
            "key": "level",
            "options": [["Low", 1], ["High", 2]],
            "multiple": true,
            "init": 1,
            "placeholder": "Pick one",
            "disabledValues": [2],
            "for": "level-select",
            "label": "Level",
            "id": "level_id",
            "attributes": { "class": "wide" }
        }))
        .unwrap();

        assert_eq!(config.attr_key, "level");
        assert_eq!(config.options.len(), 2);
        assert!(config.multiple);
        assert_eq!(config.init_value, vec![OptionValue::Integer(1)]);
        assert_eq!(config.placeholder.as_deref(), Some("Pick one"));
        assert_eq!(config.disabled_values, vec![OptionValue::Integer(2)]);
        assert_eq!(config.input_for.as_deref(), Some("level-select"));
        assert_eq!(config.label.as_deref(), Some("Level"));
        assert_eq!(config.dom_id.as_deref(), Some("level_id"));
        assert_eq!(config.attributes.get("class"), Some(&json!("wide")));
    }

    #[test]
    fn test_optional_keys_default() {
        let config = SelectConfig::from_json(r#"{"key": "color", "options": ["red"]}"#).unwrap();
        assert!(!config.multiple);
        assert!(config.disabled_values.is_empty());
        assert!(config.init_value.is_empty());
        assert!(config.attributes.is_empty());
        assert_eq!(config, SelectConfig::new("color", vec![SelectOption::plain("red")]));
    }

    #[test]
    fn test_missing_or_blank_key_fails() {
        let err = SelectConfig::from_value(json!({ "options": ["red"] })).unwrap_err();
        assert_eq!(err, BindingError::MissingAttrKey);

        let err = SelectConfig::from_value(json!({ "key": "  ", "options": ["red"] })).unwrap_err();
        assert_eq!(err, BindingError::MissingAttrKey);
    }

    #[test]
    fn test_missing_or_non_list_options_fail() {
        let err = SelectConfig::from_value(json!({ "key": "color" })).unwrap_err();
        assert_eq!(
            err,
            BindingError::MissingOptions {
                attr_key: "color".to_string()
            }
        );

        let err = SelectConfig::from_value(json!({ "key": "color", "options": { "red": 1 } }))
            .unwrap_err();
        assert!(matches!(err, BindingError::OptionsNotAList { .. }));
    }

    #[test]
    fn test_disabled_values_degrade() {
        let config = SelectConfig::from_value(json!({
            "key": "level",
            "options": [1, 2],
            "disabledValues": [2.0, null, [3]]
        }))
        .unwrap();
        assert_eq!(config.disabled_values, vec![OptionValue::Float(2.0)]);
        assert!(config.is_disabled(&OptionValue::Integer(2)));
        assert!(!config.is_disabled(&OptionValue::Integer(1)));
    }

    #[test]
    fn test_init_list_is_kept() {
        let config = SelectConfig::from_value(json!({
            "key": "tags",
            "options": ["a", "b"],
            "initValue": ["a", "b"]
        }))
        .unwrap();
        assert_eq!(config.init_value, vec![OptionValue::from("a"), OptionValue::from("b")]);

        let err = SelectConfig::from_value(json!({
            "key": "tags",
            "options": ["a"],
            "init": [{ "a": 1 }]
        }))
        .unwrap_err();
        assert!(matches!(err, BindingError::Config(_)));
    }

    #[test]
    fn test_settings_defaults() {
        assert_eq!(ErrorConfig::default().input_class, "error");
        assert_eq!(ErrorConfig::from_json("{}").unwrap().input_class, "error");
        assert_eq!(
            ErrorConfig::from_json(r#"{"inputClass": "is-invalid"}"#).unwrap().input_class,
            "is-invalid"
        );

        let options: ResolveOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ResolveOptions::default());
        assert!(options.verify_expressions);
        assert!(!options.allow_empty_options);
    }
}
