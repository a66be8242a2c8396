//! Select Binding Resolver
//!
//! Composes option normalization, model-mode selection, key building and the
//! error binder into one [`BindingDescriptor`]. Resolution is a pure function
//! of the configuration and the error lookup's class name; it performs no I/O
//! and keeps no state between calls.

#[cfg(feature = "napi")]
use napi_derive::napi;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use crate::config::{ErrorConfig, ResolveOptions, SelectConfig};
use crate::error::BindingError;
use crate::error_state::{error_binding, ErrorBinding, ErrorLookup, FormErrors};
use crate::expression::{verify_error_binding, verify_expression};
use crate::model::{select_model_mode, ModelDirective, ValueType};
use crate::naming::{
    change_event_key, model_target, option_dom_id, option_internal_name, reference_name,
};
use crate::option::{OptionValue, RawForm};

// ═══════════════════════════════════════════════════════════════════════════════
// ATTRIBUTE NAMES
// ═══════════════════════════════════════════════════════════════════════════════

pub const ATTR_CHANGE: &str = "@change";
pub const ATTR_REF: &str = "ref";
pub const ATTR_INIT_VALUE: &str = "init-value";
pub const ATTR_CLASS: &str = "v-bind:class";
pub const ATTR_VALUE_TYPE: &str = "value-type";

// ═══════════════════════════════════════════════════════════════════════════════
// OUTPUT TYPES
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionBinding {
    pub label: String,
    pub value: OptionValue,
    pub raw_form: RawForm,
    pub dom_id: String,
    pub name: String,
    pub disabled: bool,
}

/// Leading, unselectable entry shown before the user picks a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderBinding {
    pub label: String,
    pub disabled: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelBinding {
    pub text: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingDescriptor {
    /// Element attributes, computed bindings with caller overrides on top.
    pub attributes: Map<String, Value>,
    pub reference_name: String,
    pub change_event_key: String,
    pub model_directive: ModelDirective,
    pub coerce_numeric: bool,
    pub value_type: Option<ValueType>,
    pub error: ErrorBinding,
    pub options: Vec<OptionBinding>,
    pub placeholder: Option<PlaceholderBinding>,
    pub label: Option<LabelBinding>,
}

impl BindingDescriptor {
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn option(&self, value: &OptionValue) -> Option<&OptionBinding> {
        self.options.iter().find(|o| o.value.loosely_eq(value))
    }

    pub fn is_disabled(&self, value: &OptionValue) -> bool {
        self.option(value).is_some_and(|o| o.disabled)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// RESOLVER
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, Default)]
pub struct SelectBindingResolver {
    options: ResolveOptions,
}

impl SelectBindingResolver {
    pub fn new(options: ResolveOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ResolveOptions {
        self.options
    }

    pub fn resolve(
        &self,
        config: &SelectConfig,
        lookup: &dyn ErrorLookup,
    ) -> Result<BindingDescriptor, BindingError> {
        resolve_with(config, lookup, self.options)
    }
}

pub fn resolve(
    config: &SelectConfig,
    lookup: &dyn ErrorLookup,
) -> Result<BindingDescriptor, BindingError> {
    resolve_with(config, lookup, ResolveOptions::default())
}

pub fn resolve_with(
    config: &SelectConfig,
    lookup: &dyn ErrorLookup,
    options: ResolveOptions,
) -> Result<BindingDescriptor, BindingError> {
    let attr_key = config.attr_key.as_str();
    if attr_key.trim().is_empty() {
        return Err(BindingError::MissingAttrKey);
    }

    debug!(
        attr_key,
        multiple = config.multiple,
        option_count = config.options.len(),
        "resolving select bindings"
    );

    if config.options.is_empty() {
        if !options.allow_empty_options {
            return Err(BindingError::EmptyOptions {
                attr_key: attr_key.to_string(),
            });
        }
        debug!(attr_key, "select has no options; no type preference");
    }

    let unmatched = config
        .disabled_values
        .iter()
        .filter(|d| !config.options.iter().any(|o| o.value().loosely_eq(d)))
        .count();
    if unmatched > 0 {
        debug!(attr_key, unmatched, "disabled values match no option");
    }

    let mode = select_model_mode(&config.options, config.multiple);
    let error = error_binding(attr_key, lookup)?;

    let reference = reference_name(attr_key, config.multiple);
    let change_event = change_event_key(attr_key);
    let directive = mode.directive.attribute_name();
    let target = model_target(attr_key);
    let class_binding = error.render();

    if options.verify_expressions {
        // An odd key only degrades its own handlers; a frozen error flag is fatal.
        for (attribute, code) in [(ATTR_CHANGE, &change_event), (directive, &target)] {
            if let Err(e) = verify_expression(attribute, code) {
                warn!(attr_key, attribute, error = %e, "select binding does not parse");
            }
        }
        verify_error_binding(ATTR_CLASS, &class_binding)?;
    }

    let mut attributes = Map::new();
    attributes.insert(ATTR_CHANGE.to_string(), Value::String(change_event.clone()));
    attributes.insert(ATTR_REF.to_string(), Value::String(reference.clone()));
    attributes.insert(
        ATTR_INIT_VALUE.to_string(),
        Value::Array(config.init_value.iter().map(OptionValue::to_json).collect()),
    );
    attributes.insert(ATTR_CLASS.to_string(), Value::String(class_binding));
    attributes.insert(
        ATTR_VALUE_TYPE.to_string(),
        mode.value_type
            .map(|t| Value::String(t.tag().to_string()))
            .unwrap_or(Value::Null),
    );
    attributes.insert(directive.to_string(), Value::String(target));

    for (name, value) in &config.attributes {
        attributes.insert(name.clone(), value.clone());
    }

    trace!(attr_key, attribute_count = attributes.len(), "merged select attributes");

    let option_bindings = config
        .options
        .iter()
        .map(|option| {
            let (label, value, raw_form) = option.normalize();
            OptionBinding {
                label,
                value: value.clone(),
                raw_form,
                dom_id: option_dom_id(config.dom_id.as_deref(), attr_key, value),
                name: option_internal_name(attr_key, value),
                disabled: config.is_disabled(value),
            }
        })
        .collect();

    let placeholder = config.placeholder.as_ref().map(|label| PlaceholderBinding {
        label: label.clone(),
        disabled: true,
        selected: config.init_value.is_empty(),
    });

    let label = config.label.as_ref().map(|text| LabelBinding {
        text: text.clone(),
        target: config
            .input_for
            .clone()
            .or_else(|| config.dom_id.clone())
            .unwrap_or_else(|| attr_key.to_string()),
    });

    Ok(BindingDescriptor {
        attributes,
        reference_name: reference,
        change_event_key: change_event,
        model_directive: mode.directive,
        coerce_numeric: mode.coerce_numeric,
        value_type: mode.value_type,
        error,
        options: option_bindings,
        placeholder,
        label,
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAPI ENTRY POINT
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "napi")]
#[napi]
pub fn resolve_select_native(
    config_json: String,
    error_config_json: Option<String>,
) -> napi::Result<serde_json::Value> {
    let config = SelectConfig::from_json(&config_json)
        .map_err(|e| napi::Error::from_reason(e.to_string()))?;
    let error_config = match error_config_json {
        Some(json) => {
            ErrorConfig::from_json(&json).map_err(|e| napi::Error::from_reason(e.to_string()))?
        }
        None => ErrorConfig::default(),
    };

    let lookup = FormErrors::new(error_config);
    let descriptor = resolve(&config, &lookup).map_err(|e| napi::Error::from_reason(e.to_string()))?;
    serde_json::to_value(descriptor).map_err(|e| napi::Error::from_reason(e.to_string()))
}

/// Resolves a JSON configuration against a fresh validation state.
pub fn resolve_json(
    config_json: &str,
    error_config: ErrorConfig,
) -> Result<BindingDescriptor, BindingError> {
    let config = SelectConfig::from_json(config_json)?;
    let lookup = FormErrors::new(error_config);
    resolve(&config, &lookup)
}
