//! Static assets: images and fonts
//!
//! The invoice embeds two raster images and, optionally, custom fonts.
//! Sources are configured as strings: an `http://` or `https://` prefix
//! means a remote URL, anything else is a path relative to the assets
//! directory. Loaded images are sniffed and decoded once so that corrupt
//! data is reported as an [`AssetLoadError`] before it reaches the
//! typesetter.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
#[cfg(feature = "remote")]
use std::time::Duration;

use geladaria_ast::AssetId;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AssetLoadError;

/// Image formats the typesetter can embed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
    Svg,
}

impl ImageFormat {
    /// Detect the format from the leading bytes
    pub fn detect(data: &[u8]) -> Option<Self> {
        if data.starts_with(b"\x89PNG\r\n\x1a\n") {
            return Some(ImageFormat::Png);
        }
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpeg);
        }
        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Some(ImageFormat::Gif);
        }
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Some(ImageFormat::Webp);
        }

        // SVG is text; look for the root element near the start
        let head = &data[..data.len().min(1024)];
        let text = String::from_utf8_lossy(head);
        let text = text.trim_start_matches('\u{feff}').trim_start();
        if (text.starts_with("<svg") || text.starts_with("<?xml")) && text.contains("<svg") {
            return Some(ImageFormat::Svg);
        }

        None
    }

    /// Decode the data fully, discarding the result
    pub fn verify(self, data: &[u8]) -> Result<(), String> {
        let raster = match self {
            ImageFormat::Svg => {
                return usvg::Tree::from_data(data, &usvg::Options::default())
                    .map(|_| ())
                    .map_err(|e| format!("invalid SVG: {}", e));
            }
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Gif => image::ImageFormat::Gif,
            ImageFormat::Webp => image::ImageFormat::WebP,
        };
        image::load_from_memory_with_format(data, raster)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    /// Format name accepted by Typst's `image(format: ..)`
    pub fn typst_name(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Gif => "gif",
            ImageFormat::Webp => "webp",
            ImageFormat::Svg => "svg",
        }
    }
}

/// Font container formats the typesetter can load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFormat {
    TrueType,
    OpenType,
    Collection,
}

impl FontFormat {
    /// Detect the font format from the leading bytes
    pub fn detect(data: &[u8]) -> Result<Self, String> {
        match data.get(0..4) {
            Some([0x00, 0x01, 0x00, 0x00]) | Some(b"true") => Ok(FontFormat::TrueType),
            Some(b"OTTO") => Ok(FontFormat::OpenType),
            Some(b"ttcf") => Ok(FontFormat::Collection),
            Some(b"wOFF") | Some(b"wOF2") => Err("WOFF web fonts are not supported".to_string()),
            Some(_) => Err("not a TrueType/OpenType font".to_string()),
            None => Err("file is too short to be a font".to_string()),
        }
    }
}

/// Where an asset comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetSource(pub String);

impl AssetSource {
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    /// Whether the source is an http(s) URL
    pub fn is_remote(&self) -> bool {
        self.0.starts_with("http://") || self.0.starts_with("https://")
    }

    /// Resolve a local source against the assets directory
    pub fn local_path(&self, directory: &Path) -> PathBuf {
        let path = Path::new(&self.0);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            directory.join(path)
        }
    }
}

impl std::fmt::Display for AssetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What to do when an asset cannot be loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetPolicy {
    /// Log a warning and render a blank region (or skip the font)
    #[default]
    Substitute,
    /// Fail the render
    Fail,
}

/// Asset configuration, the `[assets]` table of `geladaria.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    /// Base directory for relative sources
    pub directory: PathBuf,
    /// Brand logo
    pub logo: AssetSource,
    /// Decorative background graphic
    pub background: AssetSource,
    /// Font files (TTF/OTF/TTC)
    pub fonts: Vec<AssetSource>,
    /// Missing asset handling
    pub policy: AssetPolicy,
    /// Timeout for remote sources, in seconds
    pub timeout_secs: u64,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("public"),
            logo: AssetSource::new("logo-geladaria.png"),
            background: AssetSource::new("ice-cream 2.png"),
            fonts: vec![
                AssetSource::new("fonts/Roboto-Regular.ttf"),
                AssetSource::new("fonts/Roboto-Bold.ttf"),
            ],
            policy: AssetPolicy::Substitute,
            timeout_secs: 30,
        }
    }
}

impl AssetSettings {
    /// Source configured for an image asset
    pub fn source(&self, id: AssetId) -> &AssetSource {
        match id {
            AssetId::Logo => &self.logo,
            AssetId::Background => &self.background,
        }
    }
}

/// An image known to decode, ready for embedding
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    pub format: ImageFormat,
    pub data: Vec<u8>,
}

impl LoadedImage {
    /// Sniff and decode `data`; failures are [`AssetLoadError::UnsupportedFormat`]
    pub fn decode(asset: &str, data: Vec<u8>) -> Result<Self, AssetLoadError> {
        let unsupported = |detail: String| AssetLoadError::UnsupportedFormat {
            asset: asset.to_string(),
            detail,
        };
        let format = ImageFormat::detect(&data)
            .ok_or_else(|| unsupported("not a PNG, JPEG, GIF, WebP or SVG image".to_string()))?;
        format.verify(&data).map_err(unsupported)?;
        Ok(Self { format, data })
    }
}

/// The assets available to one render
#[derive(Debug, Clone, Default)]
pub struct AssetBundle {
    images: BTreeMap<AssetId, LoadedImage>,
    fonts: Vec<Vec<u8>>,
}

impl AssetBundle {
    /// An empty bundle; every image renders as a blank region
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an image after checking that it decodes
    pub fn insert_image(&mut self, id: AssetId, data: Vec<u8>) -> Result<(), AssetLoadError> {
        let image = LoadedImage::decode(id.name(), data)?;
        self.insert_loaded(id, image);
        Ok(())
    }

    /// Add an image that was already checked by [`AssetLoader::load_image`]
    pub fn insert_loaded(&mut self, id: AssetId, image: LoadedImage) {
        self.images.insert(id, image);
    }

    /// Add a font after checking its format
    pub fn add_font(&mut self, data: Vec<u8>) -> Result<(), AssetLoadError> {
        FontFormat::detect(&data).map_err(|detail| AssetLoadError::UnsupportedFormat {
            asset: format!("font #{}", self.fonts.len()),
            detail,
        })?;
        self.fonts.push(data);
        Ok(())
    }

    /// A loaded image
    pub fn image(&self, id: AssetId) -> Option<&LoadedImage> {
        self.images.get(&id)
    }

    /// All loaded images
    pub fn images(&self) -> impl Iterator<Item = (AssetId, &LoadedImage)> {
        self.images.iter().map(|(id, image)| (*id, image))
    }

    /// All loaded fonts
    pub fn fonts(&self) -> &[Vec<u8>] {
        &self.fonts
    }
}

/// Virtual path under which an image is exposed to the typesetter
pub fn virtual_path(id: AssetId) -> &'static str {
    match id {
        AssetId::Logo => "/assets/logo",
        AssetId::Background => "/assets/background",
    }
}

/// Fetches asset bytes from disk or over HTTP
#[derive(Debug, Clone)]
pub struct AssetLoader {
    directory: PathBuf,
    #[cfg(feature = "remote")]
    timeout: Duration,
}

impl AssetLoader {
    /// Create a loader for the configured assets directory
    pub fn new(settings: &AssetSettings) -> Self {
        Self {
            directory: settings.directory.clone(),
            #[cfg(feature = "remote")]
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }

    /// Load and check an image
    pub fn load_image(
        &self,
        id: AssetId,
        source: &AssetSource,
    ) -> Result<LoadedImage, AssetLoadError> {
        let data = self.fetch(id.name(), source)?;
        let image = LoadedImage::decode(id.name(), data).map_err(|e| match e {
            AssetLoadError::UnsupportedFormat { asset, detail } => {
                AssetLoadError::UnsupportedFormat {
                    asset,
                    detail: format!("{}: {}", source, detail),
                }
            }
            other => other,
        })?;
        debug!(asset = %id, %source, bytes = image.data.len(), "loaded image");
        Ok(image)
    }

    /// Load and check a font
    pub fn load_font(&self, index: usize, source: &AssetSource) -> Result<Vec<u8>, AssetLoadError> {
        let asset = format!("font #{}", index);
        let data = self.fetch(&asset, source)?;
        FontFormat::detect(&data).map_err(|detail| AssetLoadError::UnsupportedFormat {
            asset: asset.clone(),
            detail: format!("{}: {}", source, detail),
        })?;
        debug!(%asset, %source, bytes = data.len(), "loaded font");
        Ok(data)
    }

    /// Read the raw bytes of a source
    pub fn fetch(&self, asset: &str, source: &AssetSource) -> Result<Vec<u8>, AssetLoadError> {
        if source.is_remote() {
            self.fetch_remote(asset, &source.0)
        } else {
            self.fetch_local(asset, &source.local_path(&self.directory))
        }
    }

    fn fetch_local(&self, asset: &str, path: &Path) -> Result<Vec<u8>, AssetLoadError> {
        std::fs::read(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                AssetLoadError::NotFound {
                    asset: asset.to_string(),
                    path: path.to_path_buf(),
                }
            } else {
                AssetLoadError::Io {
                    asset: asset.to_string(),
                    path: path.to_path_buf(),
                    source,
                }
            }
        })
    }

    #[cfg(feature = "remote")]
    fn fetch_remote(&self, asset: &str, url: &str) -> Result<Vec<u8>, AssetLoadError> {
        let http_error = |e: reqwest::Error| AssetLoadError::Http {
            asset: asset.to_string(),
            url: url.to_string(),
            message: e.to_string(),
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(http_error)?;

        let response = client.get(url).send().map_err(http_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(AssetLoadError::Status {
                asset: asset.to_string(),
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().map_err(http_error)?;
        Ok(bytes.to_vec())
    }

    #[cfg(not(feature = "remote"))]
    fn fetch_remote(&self, asset: &str, url: &str) -> Result<Vec<u8>, AssetLoadError> {
        Err(AssetLoadError::RemoteDisabled {
            asset: asset.to_string(),
            url: url.to_string(),
        })
    }
}
