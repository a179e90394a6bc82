//! Configuration settings
//!
//! `geladaria.toml` holds three tables:
//!
//! ```toml
//! [shop]
//! footer = "Volte sempre!"
//!
//! [assets]
//! directory = "public"
//! logo = "logo-geladaria.png"
//! policy = "substitute"
//!
//! [export]
//! output_dir = "faturas"
//! validate = true
//! ```
//!
//! Every table and key is optional.

use std::path::{Path, PathBuf};

use geladaria_core::ShopProfile;
use geladaria_pdf::AssetSettings;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "geladaria.toml";

/// Top-level settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Static invoice text
    pub shop: ShopProfile,
    /// Logo, background and font sources
    pub assets: AssetSettings,
    /// Export behaviour
    pub export: ExportSettings,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load settings from a file
    ///
    /// Relative directories are resolved against the file's own directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings = Self::from_toml_str(&content)?;

        if let Some(base) = path.parent() {
            settings.assets.directory = resolve(base, &settings.assets.directory);
            settings.export.output_dir = resolve(base, &settings.export.output_dir);
        }

        debug!(path = %path.display(), "loaded configuration");
        Ok(settings)
    }

    /// Serialize back to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Directory downloads are written to by the command line
    pub output_dir: PathBuf,
    /// Run the validation boundary before exporting
    pub validate: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            validate: true,
        }
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() || base.as_os_str().is_empty() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
