//! Flavor count validator

use geladaria_ast::{OrderField, OrderFormData};
use geladaria_core::diagnostics::Diagnostic;

use crate::Validator;

/// Validates that the flavor count is not negative
///
/// Zero is a valid count and is printed on the invoice as `0`.
///
/// # Diagnostic Codes
///
/// - `ORD102`: Negative flavor count
pub struct FlavorCountValidator;

impl Validator for FlavorCountValidator {
    fn code(&self) -> &'static str {
        "ORD102"
    }

    fn name(&self) -> &'static str {
        "flavor-count"
    }

    fn validate(&self, order: &OrderFormData) -> Vec<Diagnostic> {
        if order.flavors >= 0 {
            return Vec::new();
        }

        vec![Diagnostic::error(format!(
            "Flavor count cannot be negative (got {})",
            order.flavors
        ))
        .with_code(self.code())
        .with_field(OrderField::Flavors)]
    }
}
