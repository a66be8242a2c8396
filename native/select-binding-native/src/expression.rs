//! Expression Verification
//!
//! Generated bindings end up as client-side expressions. They are parsed with
//! oxc before leaving the resolver, so an odd key is logged at resolution time
//! instead of first showing up as a runtime template error. The error class
//! binding gets one more check: it must be an object literal whose flag is a
//! live reference, never a boolean literal.

use oxc_allocator::Allocator;
use oxc_ast::ast::{BooleanLiteral, Expression, IdentifierReference};
use oxc_ast_visit::Visit;
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::error::BindingError;

/// Parses `code` as a single expression.
pub fn verify_expression(attribute: &str, code: &str) -> Result<(), BindingError> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, code, SourceType::default()).parse_expression();

    match ret {
        Ok(_) => Ok(()),
        Err(errors) => Err(BindingError::InvalidExpression {
            attribute: attribute.to_string(),
            details: format!("{:?}", errors),
        }),
    }
}

/// Checks that a class binding stays reactive: an object literal whose values
/// reference runtime state and contain no boolean literal.
pub fn verify_error_binding(attribute: &str, code: &str) -> Result<(), BindingError> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, code, SourceType::default()).parse_expression();

    let expr = match ret {
        Ok(expr) => expr,
        Err(errors) => {
            return Err(BindingError::InvalidExpression {
                attribute: attribute.to_string(),
                details: format!("{:?}", errors),
            })
        }
    };

    let Expression::ObjectExpression(obj) = &expr else {
        return Err(BindingError::InvalidExpression {
            attribute: attribute.to_string(),
            details: "class binding must be an object literal".to_string(),
        });
    };

    let mut collector = FlagCollector::default();
    collector.visit_object_expression(obj);

    if collector.boolean_literals > 0 || collector.references.is_empty() {
        return Err(BindingError::FrozenErrorBinding {
            expression: code.to_string(),
        });
    }

    Ok(())
}

/// Identifiers referenced by an expression, in source order.
#[cfg(test)]
pub(crate) fn referenced_identifiers(code: &str) -> Vec<String> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, code, SourceType::default()).parse_expression();

    match ret {
        Ok(expr) => {
            let mut collector = FlagCollector::default();
            collector.visit_expression(&expr);
            collector.references
        }
        Err(_) => Vec::new(),
    }
}

#[derive(Default)]
struct FlagCollector {
    references: Vec<String>,
    boolean_literals: usize,
}

impl<'a> Visit<'a> for FlagCollector {
    fn visit_identifier_reference(&mut self, ident: &IdentifierReference<'a>) {
        self.references.push(ident.name.to_string());
    }

    fn visit_boolean_literal(&mut self, _lit: &BooleanLiteral) {
        self.boolean_literals += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_expressions_parse() {
        assert!(verify_expression("@change", "inputChanged(color)").is_ok());
        assert!(verify_expression("v-model", "data['color']").is_ok());
        assert!(verify_expression("v-model", "data['it\\'s']").is_ok());
    }

    #[test]
    fn test_broken_expression_is_reported() {
        let err = verify_expression("@change", "inputChanged(first name)").unwrap_err();
        assert!(matches!(
            err,
            BindingError::InvalidExpression { ref attribute, .. } if attribute == "@change"
        ));
    }

    #[test]
    fn test_live_error_binding_passes() {
        assert!(verify_error_binding("v-bind:class", "{ 'error': errors['color'] }").is_ok());
    }

    #[test]
    fn test_frozen_error_binding_is_rejected() {
        for code in ["{ 'error': true }", "{ 'error': false }", "{ 'error': 'x' }"] {
            let err = verify_error_binding("v-bind:class", code).unwrap_err();
            assert!(matches!(err, BindingError::FrozenErrorBinding { .. }), "{}", code);
        }
    }

    #[test]
    fn test_error_binding_must_be_object() {
        let err = verify_error_binding("v-bind:class", "errors['color']").unwrap_err();
        assert!(matches!(err, BindingError::InvalidExpression { .. }));
    }

    #[test]
    fn test_referenced_identifiers() {
        assert_eq!(referenced_identifiers("{ 'error': errors['color'] }"), vec!["errors"]);
        assert_eq!(referenced_identifiers("inputChanged(color)"), vec!["inputChanged", "color"]);
        assert!(referenced_identifiers("(").is_empty());
    }
}
