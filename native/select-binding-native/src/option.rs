//! Option Normalizer
//!
//! Raw option entries arrive either as a bare scalar (`"red"`, `1`) or as a
//! `[label, value]` pair. They are classified exactly once, here, into a
//! [`SelectOption`]; every later consumer (value, label, name, disabled state)
//! reads the variant instead of re-inspecting the raw shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::BindingError;

// ═══════════════════════════════════════════════════════════════════════════════
// OPTION VALUE
// ═══════════════════════════════════════════════════════════════════════════════

/// A scalar option value as the client runtime sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl OptionValue {
    /// Integral values are the only ones that trigger numeric coercion.
    pub fn is_integral(&self) -> bool {
        matches!(self, OptionValue::Integer(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            OptionValue::Integer(_) => "integer",
            OptionValue::Float(_) => "float",
            OptionValue::Bool(_) => "bool",
            OptionValue::Text(_) => "text",
        }
    }

    /// Converts a JSON scalar. Arrays, objects and null are not option values.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .map(OptionValue::Integer)
                .or_else(|| n.as_f64().map(OptionValue::Float)),
            Value::Bool(b) => Some(OptionValue::Bool(*b)),
            Value::String(s) => Some(OptionValue::Text(s.clone())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Equality with `2 == 2.0` across the numeric variants.
    pub fn loosely_eq(&self, other: &OptionValue) -> bool {
        match (self, other) {
            (OptionValue::Integer(i), OptionValue::Float(x))
            | (OptionValue::Float(x), OptionValue::Integer(i)) => *i as f64 == *x,
            _ => self == other,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            OptionValue::Integer(i) => Value::from(*i),
            OptionValue::Float(f) => Value::from(*f),
            OptionValue::Bool(b) => Value::Bool(*b),
            OptionValue::Text(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Integer(i) => write!(f, "{}", i),
            OptionValue::Float(x) => write!(f, "{}", x),
            OptionValue::Bool(b) => write!(f, "{}", b),
            OptionValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for OptionValue {
    fn from(i: i64) -> Self {
        OptionValue::Integer(i)
    }
}

impl From<i32> for OptionValue {
    fn from(i: i32) -> Self {
        OptionValue::Integer(i64::from(i))
    }
}

impl From<f64> for OptionValue {
    fn from(x: f64) -> Self {
        OptionValue::Float(x)
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Text(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Text(s)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SELECT OPTION
// ═══════════════════════════════════════════════════════════════════════════════

/// Which raw shape an option was declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawForm {
    Scalar,
    Pair,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectOption {
    /// The value doubles as its own label.
    Plain(OptionValue),
    Labeled { label: String, value: OptionValue },
}

impl SelectOption {
    pub fn plain(value: impl Into<OptionValue>) -> Self {
        SelectOption::Plain(value.into())
    }

    pub fn labeled(label: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        SelectOption::Labeled {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn value(&self) -> &OptionValue {
        match self {
            SelectOption::Plain(value) => value,
            SelectOption::Labeled { value, .. } => value,
        }
    }

    pub fn label(&self) -> String {
        match self {
            SelectOption::Plain(value) => value.to_string(),
            SelectOption::Labeled { label, .. } => label.clone(),
        }
    }

    pub fn raw_form(&self) -> RawForm {
        match self {
            SelectOption::Plain(_) => RawForm::Scalar,
            SelectOption::Labeled { .. } => RawForm::Pair,
        }
    }

    /// `(label, value, raw form)` in one call.
    pub fn normalize(&self) -> (String, &OptionValue, RawForm) {
        (self.label(), self.value(), self.raw_form())
    }

    /// Classifies one raw entry. A two-element array is `[label, value]`;
    /// any JSON scalar is a plain option.
    pub fn from_json(attr_key: &str, index: usize, raw: &Value) -> Result<Self, BindingError> {
        let invalid = || BindingError::InvalidOption {
            attr_key: attr_key.to_string(),
            index,
            found: raw.to_string(),
        };

        match raw {
            Value::Array(pair) if pair.len() == 2 => {
                let label = OptionValue::from_json(&pair[0]).ok_or_else(invalid)?;
                let value = OptionValue::from_json(&pair[1]).ok_or_else(invalid)?;
                Ok(SelectOption::Labeled {
                    label: label.to_string(),
                    value,
                })
            }
            other => OptionValue::from_json(other)
                .map(SelectOption::Plain)
                .ok_or_else(invalid),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            SelectOption::Plain(value) => value.to_json(),
            SelectOption::Labeled { label, value } => {
                Value::Array(vec![Value::String(label.clone()), value.to_json()])
            }
        }
    }
}

/// Normalizes the raw `options` entry of a select configuration.
pub fn normalize_options(attr_key: &str, raw: &Value) -> Result<Vec<SelectOption>, BindingError> {
    let entries = raw.as_array().ok_or_else(|| BindingError::OptionsNotAList {
        attr_key: attr_key.to_string(),
        found: json_kind(raw).to_string(),
    })?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| SelectOption::from_json(attr_key, index, entry))
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
