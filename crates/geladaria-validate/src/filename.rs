//! Download file name validator
//!
//! The invoice is downloaded as `Fatura_<name>.pdf`, so characters in the
//! customer name that cannot appear in a file name get rewritten by the
//! download target. This validator reports them up front.

use std::collections::BTreeSet;

use geladaria_ast::{OrderField, OrderFormData};
use geladaria_core::diagnostics::Diagnostic;

use crate::Validator;

/// Characters rejected by at least one common filesystem
const RESERVED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Warns about customer names that are not file-name safe
///
/// # Diagnostic Codes
///
/// - `ORD104`: Name contains characters not allowed in file names
pub struct FilenameSafetyValidator;

impl Validator for FilenameSafetyValidator {
    fn code(&self) -> &'static str {
        "ORD104"
    }

    fn name(&self) -> &'static str {
        "filename-safety"
    }

    fn validate(&self, order: &OrderFormData) -> Vec<Diagnostic> {
        let offending: BTreeSet<char> = order
            .name
            .chars()
            .filter(|c| RESERVED.contains(c) || c.is_control())
            .collect();

        if offending.is_empty() {
            return Vec::new();
        }

        let shown: String = offending.iter().filter(|c| !c.is_control()).collect();
        vec![Diagnostic::warning(format!(
            "Customer name contains characters not allowed in file names: {:?}",
            shown
        ))
        .with_code(self.code())
        .with_field(OrderField::Name)
        .with_help("The downloaded file name will have these characters replaced")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> OrderFormData {
        OrderFormData::new(name, "1", "Luanda")
    }

    #[test]
    fn test_plain_names() {
        assert!(FilenameSafetyValidator.validate(&named("Maria")).is_empty());
        assert!(FilenameSafetyValidator
            .validate(&named("João Manuel dos Santos"))
            .is_empty());
    }

    #[test]
    fn test_path_separator() {
        let diagnostics = FilenameSafetyValidator.validate(&named("../Maria"));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code.as_deref(), Some("ORD104"));
        assert!(diagnostics[0].is_warning());
    }

    #[test]
    fn test_control_character() {
        let diagnostics = FilenameSafetyValidator.validate(&named("Maria\n"));
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_each_character_reported_once() {
        let diagnostics = FilenameSafetyValidator.validate(&named("a/b:c/"));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.ends_with("\"/:\""));
    }
}
