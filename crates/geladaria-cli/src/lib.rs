//! geladaria CLI - Command-line interface library
//!
//! This library provides the CLI functionality for geladaria:
//! - Export: Render an order to `Fatura_<name>.pdf`
//! - Preview: Print the document description or its Typst markup
//! - Check: Validate an order
//! - Config: Print the default `geladaria.toml`
//!
//! # Binary Usage
//!
//! ```bash
//! # Write Fatura_Maria.pdf into ./faturas
//! geladaria export maria.json --output faturas
//!
//! # Inspect the generated layout
//! geladaria preview maria.json --format typst
//!
//! # Check an order before exporting
//! geladaria check maria.json --format json
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{check_command, config_command, export_command, preview_command, read_order};
pub use app::{run_cli, OutputFormat, PreviewFormat};
