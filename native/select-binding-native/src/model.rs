//! Type & Model-Mode Selector
//!
//! Decides how the bound model value is synchronized. Only the first option's
//! value is sampled: an integral first value on a single select requests
//! numeric coercion (`v-model.number`). Multi selects bind an array of raw
//! tokens through plain `v-model`, since the client's multi-value directive
//! cannot coerce. Mixed option lists keep the first-value rule.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::option::SelectOption;

pub const DIRECTIVE: &str = "v-model";
pub const DIRECTIVE_NUMBER: &str = "v-model.number";
pub const VALUE_TYPE_INTEGER: &str = "Integer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelDirective {
    Single,
    SingleNumeric,
    Multiple,
}

impl ModelDirective {
    /// Attribute name of the directive on the rendered element.
    pub fn attribute_name(&self) -> &'static str {
        match self {
            ModelDirective::SingleNumeric => DIRECTIVE_NUMBER,
            ModelDirective::Single | ModelDirective::Multiple => DIRECTIVE,
        }
    }

    pub fn coerces_numeric(&self) -> bool {
        matches!(self, ModelDirective::SingleNumeric)
    }
}

/// Value type inferred from the first option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueType {
    Integer,
}

impl ValueType {
    pub fn tag(&self) -> &'static str {
        match self {
            ValueType::Integer => VALUE_TYPE_INTEGER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelMode {
    pub coerce_numeric: bool,
    pub directive: ModelDirective,
    /// `None` means no type preference.
    pub value_type: Option<ValueType>,
}

/// Samples the first option's value. `None` for an empty list.
pub fn infer_value_type(options: &[SelectOption]) -> Option<ValueType> {
    let first = options.first()?;
    if first.value().is_integral() {
        Some(ValueType::Integer)
    } else {
        None
    }
}

pub fn select_model_mode(options: &[SelectOption], multiple: bool) -> ModelMode {
    let value_type = infer_value_type(options);

    if let Some(first) = options.first() {
        let first_kind = first.value().kind();
        if options.iter().any(|o| o.value().kind() != first_kind) {
            debug!(
                first_kind = first_kind,
                "select options mix value types; inference samples the first option only"
            );
        }
    }

    let directive = match (multiple, value_type) {
        (true, _) => ModelDirective::Multiple,
        (false, Some(ValueType::Integer)) => ModelDirective::SingleNumeric,
        (false, None) => ModelDirective::Single,
    };

    ModelMode {
        coerce_numeric: directive.coerces_numeric(),
        directive,
        value_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels() -> Vec<SelectOption> {
        vec![SelectOption::labeled("Red", 1), SelectOption::labeled("Green", 2)]
    }

    #[test]
    fn test_text_options_bind_plainly() {
        let options = vec![SelectOption::plain("red"), SelectOption::plain("green")];
        let mode = select_model_mode(&options, false);
        assert_eq!(mode.directive, ModelDirective::Single);
        assert!(!mode.coerce_numeric);
        assert_eq!(mode.value_type, None);
        assert_eq!(mode.directive.attribute_name(), "v-model");
    }

    #[test]
    fn test_integer_single_select_coerces() {
        let mode = select_model_mode(&levels(), false);
        assert_eq!(mode.directive, ModelDirective::SingleNumeric);
        assert!(mode.coerce_numeric);
        assert_eq!(mode.directive.attribute_name(), "v-model.number");
    }

    #[test]
    fn test_multiple_never_coerces() {
        let mode = select_model_mode(&levels(), true);
        assert_eq!(mode.directive, ModelDirective::Multiple);
        assert!(!mode.coerce_numeric);
        assert_eq!(mode.directive.attribute_name(), "v-model");
        // the value type is still reported
        assert_eq!(mode.value_type, Some(ValueType::Integer));
    }

    #[test]
    fn test_only_first_value_is_sampled() {
        let mixed = vec![SelectOption::plain(1), SelectOption::plain("two")];
        assert!(select_model_mode(&mixed, false).coerce_numeric);

        let mixed = vec![SelectOption::plain("one"), SelectOption::plain(2)];
        assert!(!select_model_mode(&mixed, false).coerce_numeric);
    }

    #[test]
    fn test_empty_list_has_no_preference() {
        let mode = select_model_mode(&[], false);
        assert_eq!(mode.value_type, None);
        assert_eq!(mode.directive, ModelDirective::Single);
        assert!(!mode.coerce_numeric);
    }

    #[test]
    fn test_float_is_not_integral() {
        let options = vec![SelectOption::plain(1.5)];
        assert!(!select_model_mode(&options, false).coerce_numeric);
    }
}
