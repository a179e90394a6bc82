//! geladaria-validate - Order validation boundary
//!
//! The invoice template prints whatever it is given. This crate is the
//! explicit, separately testable step that decides whether an order is fit
//! to be exported.
//!
//! # Architecture
//!
//! Individual rules implement the [`Validator`] trait. The
//! [`ValidationEngine`] runs all registered validators and collects their
//! diagnostics; [`ValidationEngine::check`] turns error diagnostics into a
//! [`ValidationError`].
//!
//! # Example
//!
//! ```
//! use geladaria_ast::OrderFormData;
//! use geladaria_validate::ValidationEngine;
//!
//! let engine = ValidationEngine::with_defaults();
//!
//! let order = OrderFormData::new("", "923000000", "Maianga");
//! let err = engine.check(&order).unwrap_err();
//! assert_eq!(err.diagnostics()[0].code.as_deref(), Some("ORD101"));
//! ```

pub mod filename;
pub mod payment;
pub mod quantity;
pub mod required;

use geladaria_ast::OrderFormData;
use geladaria_core::diagnostics::Diagnostic;
use thiserror::Error;

// Re-export validators
pub use filename::FilenameSafetyValidator;
pub use payment::PaymentValidator;
pub use quantity::FlavorCountValidator;
pub use required::RequiredFieldsValidator;

/// Trait for order validators
///
/// Validators inspect an order and return a list of diagnostics for any
/// issues found. Each validator tags its diagnostics with its own code.
pub trait Validator: Send + Sync {
    /// Get the validator's unique diagnostic code (e.g., "ORD101")
    fn code(&self) -> &'static str;

    /// Get a human-readable name for this validator
    fn name(&self) -> &'static str {
        "unnamed"
    }

    /// Validate the order and return any diagnostics
    fn validate(&self, order: &OrderFormData) -> Vec<Diagnostic>;
}

/// An order was rejected by the validation boundary
#[derive(Debug, Clone, Error)]
#[error("{}", summarize(.diagnostics))]
pub struct ValidationError {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationError {
    /// Create an error from error-level diagnostics
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// The error diagnostics that rejected the order
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

fn summarize(diagnostics: &[Diagnostic]) -> String {
    let messages: Vec<&str> = diagnostics.iter().map(|d| d.message.as_str()).collect();
    format!("invalid order: {}", messages.join("; "))
}

/// Validation engine that orchestrates multiple validators
pub struct ValidationEngine {
    /// Registered validators
    validators: Vec<Box<dyn Validator>>,
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ValidationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationEngine")
            .field("validators", &self.validator_names())
            .finish()
    }
}

impl ValidationEngine {
    /// Create a new empty validation engine
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Create an engine with the built-in validators
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_validator(Box::new(RequiredFieldsValidator));
        engine.add_validator(Box::new(FlavorCountValidator));
        engine.add_validator(Box::new(PaymentValidator));
        engine.add_validator(Box::new(FilenameSafetyValidator));
        engine
    }

    /// Add a validator to the engine
    pub fn add_validator(&mut self, validator: Box<dyn Validator>) {
        self.validators.push(validator);
    }

    /// Get the number of registered validators
    pub fn validator_count(&self) -> usize {
        self.validators.len()
    }

    /// Get the names of all registered validators
    pub fn validator_names(&self) -> Vec<&'static str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    /// Get the diagnostic codes of all registered validators
    pub fn validator_codes(&self) -> Vec<&'static str> {
        self.validators.iter().map(|v| v.code()).collect()
    }

    /// Validate an order using all registered validators
    pub fn validate(&self, order: &OrderFormData) -> Vec<Diagnostic> {
        self.validators
            .iter()
            .flat_map(|validator| validator.validate(order))
            .collect()
    }

    /// Check if an order has any errors
    pub fn has_errors(&self, order: &OrderFormData) -> bool {
        self.validate(order).iter().any(|d| d.is_error())
    }

    /// Accept or reject an order
    ///
    /// Warnings never reject an order; they are only reported by
    /// [`validate`](Self::validate).
    pub fn check(&self, order: &OrderFormData) -> Result<(), ValidationError> {
        let errors: Vec<Diagnostic> = self
            .validate(order)
            .into_iter()
            .filter(|d| d.is_error())
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(errors))
        }
    }
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
