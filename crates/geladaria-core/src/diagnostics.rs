//! Order diagnostics
//!
//! Structures for reporting problems found in an order before it is turned
//! into an invoice.

use geladaria_ast::OrderField;
use serde::{Deserialize, Serialize};

/// A diagnostic message about an order
///
/// # Example
///
/// ```
/// use geladaria_ast::OrderField;
/// use geladaria_core::diagnostics::{Diagnostic, Severity};
///
/// let diag = Diagnostic::error("Customer name is required")
///     .with_code("ORD101")
///     .with_field(OrderField::Name)
///     .with_help("Fill in the name before generating the invoice");
///
/// assert_eq!(diag.severity, Severity::Error);
/// assert!(diag.to_string().starts_with("error[ORD101]"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level of the diagnostic
    pub severity: Severity,

    /// The diagnostic message
    pub message: String,

    /// Diagnostic code (e.g., "ORD101")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Order field the diagnostic is about
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<OrderField>,

    /// Additional help text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message
    Info,

    /// Potential issue, does not block an export
    Warning,

    /// The order must be fixed before exporting
    Error,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            code: None,
            field: None,
            help: None,
        }
    }

    /// Create an error diagnostic
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Create an info diagnostic
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    /// Set the diagnostic code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the offending field
    pub fn with_field(mut self, field: OrderField) -> Self {
        self.field = Some(field);
        self
    }

    /// Set help text
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Check if this is an error-level diagnostic
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    /// Check if this is a warning-level diagnostic
    pub fn is_warning(&self) -> bool {
        matches!(self.severity, Severity::Warning)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: severity[code]: message
        write!(f, "{}", self.severity)?;
        if let Some(ref code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)?;

        if let Some(field) = self.field {
            write!(f, "\n  --> field `{}`", field)?;
        }

        if let Some(ref help) = self.help {
            write!(f, "\n  = help: {}", help)?;
        }

        Ok(())
    }
}
