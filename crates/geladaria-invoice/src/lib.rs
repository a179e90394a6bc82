//! geladaria-invoice - Invoice export service
//!
//! Ties the pipeline together for hosts:
//!
//! ```text
//! OrderFormData --validate--> generate --render (blocking pool)--> Blob
//!     --> BlobHandle --> DownloadTarget ("Fatura_<name>.pdf")
//! ```
//!
//! # Example
//!
//! ```ignore
//! use geladaria_invoice::{DirectoryTarget, InvoiceService, Settings};
//!
//! let service = InvoiceService::new(Settings::default());
//! let receipt = service
//!     .export(&order, &DirectoryTarget::new("faturas"))
//!     .await?;
//! ```

pub mod blob;
pub mod config;
pub mod download;
pub mod error;
pub mod service;

pub use blob::{Blob, BlobHandle, BlobStore};
pub use config::{ExportSettings, Settings, CONFIG_FILE_NAME};
pub use download::{
    invoice_filename, DirectoryTarget, Download, DownloadReceipt, DownloadTarget, MemoryTarget,
    PDF_MIME,
};
pub use error::{ConfigError, InvoiceError, Result};
pub use service::InvoiceService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
