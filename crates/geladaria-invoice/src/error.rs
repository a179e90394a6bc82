//! Error types for the export service

use std::path::PathBuf;

use geladaria_pdf::RenderError;
use geladaria_validate::ValidationError;
use thiserror::Error;

/// Result type for export operations
pub type Result<T> = std::result::Result<T, InvoiceError>;

/// Errors that can occur while producing or delivering an invoice
#[derive(Error, Debug)]
pub enum InvoiceError {
    /// The order was rejected at the validation boundary
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// PDF serialization failed
    #[error("Render failed: {0}")]
    Render(#[from] RenderError),

    /// The download target could not store the file
    #[error("Download of {filename} failed: {source}")]
    Download {
        filename: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors reading `geladaria.toml`
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or has mistyped keys
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
