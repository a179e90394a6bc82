//! geladaria-core - Invoice template
//!
//! Core library for geladaria: maps an [`OrderFormData`] to the
//! [`DocumentDescription`] of a one-page invoice.
//!
//! # Example
//!
//! ```
//! use geladaria_ast::{OrderField, OrderFormData, SectionRole};
//! use geladaria_core::generate;
//!
//! let order = OrderFormData::new("Maria", "923000000", "Maianga")
//!     .with_flavors(3)
//!     .with_payment("2 500 Kz")
//!     .with_payment_method("Multicaixa");
//!
//! let doc = generate(&order);
//! let customer = doc.fields_in(SectionRole::CustomerData);
//! assert_eq!(customer[0].field, OrderField::Name);
//! assert_eq!(customer[0].value, "Maria");
//! ```
//!
//! [`OrderFormData`]: geladaria_ast::OrderFormData
//! [`DocumentDescription`]: geladaria_ast::DocumentDescription

pub mod diagnostics;
pub mod profile;
pub mod stylesheet;
pub mod template;

// Re-export main types and functions
pub use profile::ShopProfile;
pub use stylesheet::InvoiceStyles;
pub use template::{generate, InvoiceTemplate};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
