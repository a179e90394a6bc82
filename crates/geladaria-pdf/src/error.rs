//! Error types for PDF rendering

use std::path::PathBuf;

use thiserror::Error;

/// Result type for rendering operations
pub type Result<T> = std::result::Result<T, RenderError>;

/// A referenced image or font could not be fetched or decoded
#[derive(Error, Debug)]
pub enum AssetLoadError {
    /// Local file does not exist
    #[error("{asset}: file not found: {}", path.display())]
    NotFound { asset: String, path: PathBuf },

    /// Local file could not be read
    #[error("{asset}: failed to read {}: {source}", path.display())]
    Io {
        asset: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Remote fetch failed before a response arrived
    #[error("{asset}: request to {url} failed: {message}")]
    Http {
        asset: String,
        url: String,
        message: String,
    },

    /// Remote server answered with a non-success status
    #[error("{asset}: {url} returned HTTP {status}")]
    Status {
        asset: String,
        url: String,
        status: u16,
    },

    /// Bytes are not an image/font format the typesetter can decode
    #[error("{asset}: unsupported or corrupt data: {detail}")]
    UnsupportedFormat { asset: String, detail: String },

    /// Source is a URL but remote fetching is not compiled in
    #[error("{asset}: remote asset {url} requires the `remote` feature")]
    RemoteDisabled { asset: String, url: String },
}

impl AssetLoadError {
    /// Name of the asset that failed
    pub fn asset(&self) -> &str {
        match self {
            AssetLoadError::NotFound { asset, .. }
            | AssetLoadError::Io { asset, .. }
            | AssetLoadError::Http { asset, .. }
            | AssetLoadError::Status { asset, .. }
            | AssetLoadError::UnsupportedFormat { asset, .. }
            | AssetLoadError::RemoteDisabled { asset, .. } => asset,
        }
    }
}

/// Errors that can occur while serializing a document to PDF
#[derive(Error, Debug)]
pub enum RenderError {
    /// Typst compilation or PDF export failed
    #[error("Typst compilation failed: {0}")]
    Compilation(String),

    /// A required asset could not be loaded
    #[error("Asset error: {0}")]
    Asset(#[from] AssetLoadError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The render worker did not complete
    #[error("Render task failed: {0}")]
    Task(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_name() {
        let err = AssetLoadError::UnsupportedFormat {
            asset: "background".to_string(),
            detail: "not an image".to_string(),
        };
        assert_eq!(err.asset(), "background");
        assert!(err.to_string().starts_with("background:"));
    }

    #[test]
    fn test_asset_error_converts_to_render_error() {
        let err: RenderError = AssetLoadError::NotFound {
            asset: "logo".to_string(),
            path: PathBuf::from("public/logo.png"),
        }
        .into();
        assert!(matches!(err, RenderError::Asset(_)));
        assert!(err.to_string().contains("public/logo.png"));
    }
}
