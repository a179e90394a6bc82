//! Payment fields validator

use geladaria_ast::{OrderField, OrderFormData};
use geladaria_core::diagnostics::Diagnostic;

use crate::Validator;

/// Warns when the payment total or method is blank
///
/// The invoice still prints an empty value for these lines, so they are
/// warnings rather than errors.
///
/// # Diagnostic Codes
///
/// - `ORD103`: Payment field is blank
pub struct PaymentValidator;

impl Validator for PaymentValidator {
    fn code(&self) -> &'static str {
        "ORD103"
    }

    fn name(&self) -> &'static str {
        "payment"
    }

    fn validate(&self, order: &OrderFormData) -> Vec<Diagnostic> {
        [OrderField::Payment, OrderField::PaymentMethod]
            .into_iter()
            .filter(|&field| order.value_of(field).trim().is_empty())
            .map(|field| {
                Diagnostic::warning(format!("{} is blank", field.label()))
                    .with_code(self.code())
                    .with_field(field)
            })
            .collect()
    }
}
