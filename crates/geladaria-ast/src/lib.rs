//! geladaria-ast - Order and document model
//!
//! This crate provides the plain data types shared by every stage of the
//! invoice pipeline:
//!
//! - [`OrderFormData`]: the customer order as submitted by the order form
//! - [`DocumentDescription`]: the structured, single-page invoice layout
//!   produced by the template and consumed by the renderer
//!
//! None of these types carry behavior beyond construction and queries.

pub mod document;
pub mod node;
pub mod order;
pub mod style;

pub use document::{DocumentDescription, DocumentMeta, Page, PageSize};
pub use node::{AssetId, FieldLine, ImageNode, Node, SectionRole, Text, TextRun, View};
pub use order::{OrderField, OrderFormData};
pub use style::{Align, Color, ColorParseError, FlexDirection, Justify, Position, Style};

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
