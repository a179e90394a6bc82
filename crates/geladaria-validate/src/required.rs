//! Required field validator
//!
//! The customer name, phone number and delivery area must be present.

use geladaria_ast::{OrderField, OrderFormData};
use geladaria_core::diagnostics::Diagnostic;

use crate::Validator;

/// Fields that must not be blank
const REQUIRED: [OrderField; 3] = [
    OrderField::Name,
    OrderField::Number,
    OrderField::CityOrNeighborhood,
];

/// Validates that required customer fields are filled in
///
/// A value made only of whitespace counts as blank.
///
/// # Diagnostic Codes
///
/// - `ORD101`: Required field is blank
///
/// # Example
///
/// ```
/// use geladaria_ast::OrderFormData;
/// use geladaria_validate::{RequiredFieldsValidator, Validator};
///
/// let order = OrderFormData::new("Maria", "923000000", "  ");
/// let diagnostics = RequiredFieldsValidator.validate(&order);
/// assert_eq!(diagnostics.len(), 1);
/// ```
pub struct RequiredFieldsValidator;

impl Validator for RequiredFieldsValidator {
    fn code(&self) -> &'static str {
        "ORD101"
    }

    fn name(&self) -> &'static str {
        "required-fields"
    }

    fn validate(&self, order: &OrderFormData) -> Vec<Diagnostic> {
        REQUIRED
            .iter()
            .filter(|&&field| order.value_of(field).trim().is_empty())
            .map(|&field| {
                Diagnostic::error(format!("{} is required", field.label()))
                    .with_code(self.code())
                    .with_field(field)
                    .with_help(format!("Fill in `{}` on the order form", field.key()))
            })
            .collect()
    }
}
