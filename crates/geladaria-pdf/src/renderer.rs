//! Document description to PDF
//!
//! The renderer resolves the assets a document references, applies the
//! configured [`AssetPolicy`] to the ones that fail, then transpiles and
//! compiles the document.

use std::collections::BTreeSet;

use geladaria_ast::{AssetId, DocumentDescription};
use tracing::{debug, info, warn};

use crate::assets::{AssetBundle, AssetLoader, AssetPolicy, AssetSettings};
use crate::compiler::Compiler;
use crate::error::{AssetLoadError, Result};
use crate::transpiler::Transpiler;

/// Renders document descriptions to PDF bytes
#[derive(Debug, Clone)]
pub struct Renderer {
    settings: AssetSettings,
    loader: AssetLoader,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(AssetSettings::default())
    }
}

impl Renderer {
    /// Create a renderer for the given asset configuration
    pub fn new(settings: AssetSettings) -> Self {
        let loader = AssetLoader::new(&settings);
        Self { settings, loader }
    }

    /// The asset configuration in use
    pub fn settings(&self) -> &AssetSettings {
        &self.settings
    }

    /// Load every image the document references and every configured font
    pub fn load_assets(&self, doc: &DocumentDescription) -> Result<AssetBundle> {
        let mut bundle = AssetBundle::new();

        let referenced: BTreeSet<AssetId> = doc.images().into_iter().collect();
        for id in referenced {
            let source = self.settings.source(id);
            match self.loader.load_image(id, source) {
                Ok(image) => bundle.insert_loaded(id, image),
                Err(e) => self.substitute(e)?,
            }
        }

        for (index, source) in self.settings.fonts.iter().enumerate() {
            match self.loader.load_font(index, source) {
                Ok(font) => bundle.add_font(font)?,
                Err(e) => self.substitute(e)?,
            }
        }

        debug!(
            images = bundle.images().count(),
            fonts = bundle.fonts().len(),
            "assets loaded"
        );
        Ok(bundle)
    }

    /// Load the assets and render
    pub fn render(&self, doc: &DocumentDescription) -> Result<Vec<u8>> {
        let bundle = self.load_assets(doc)?;
        self.render_with_bundle(doc, &bundle)
    }

    /// Render with an already loaded bundle
    pub fn render_with_bundle(
        &self,
        doc: &DocumentDescription,
        bundle: &AssetBundle,
    ) -> Result<Vec<u8>> {
        let markup = Transpiler::transpile(doc, bundle);
        let pdf = Compiler::compile_with_assets(&markup, bundle)?;
        info!(
            title = doc.metadata.title.as_deref().unwrap_or_default(),
            bytes = pdf.len(),
            "rendered PDF"
        );
        Ok(pdf)
    }

    fn substitute(&self, error: AssetLoadError) -> Result<()> {
        match self.settings.policy {
            AssetPolicy::Fail => Err(error.into()),
            AssetPolicy::Substitute => {
                warn!(asset = error.asset(), error = %error, "asset unavailable, substituting");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetSource;
    use crate::error::RenderError;
    use geladaria_ast::OrderFormData;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="8"><circle cx="4" cy="4" r="4" fill="pink"/></svg>"#;

    fn order() -> OrderFormData {
        OrderFormData::new("Maria", "923000000", "Maianga")
            .with_flavors(2)
            .with_payment("1 800 Kz")
            .with_payment_method("Cash")
    }

    fn settings(dir: PathBuf) -> AssetSettings {
        AssetSettings {
            directory: dir,
            logo: AssetSource::new("logo.svg"),
            background: AssetSource::new("background.svg"),
            fonts: Vec::new(),
            ..Default::default()
        }
    }

    #[test]
    fn test_load_assets_from_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("logo.svg"), SVG).unwrap();
        std::fs::write(dir.path().join("background.svg"), SVG).unwrap();

        let renderer = Renderer::new(settings(dir.path().to_path_buf()));
        let doc = geladaria_core::generate(&order());
        let bundle = renderer.load_assets(&doc).unwrap();

        assert!(bundle.image(AssetId::Logo).is_some());
        assert!(bundle.image(AssetId::Background).is_some());
    }

    #[test]
    fn test_missing_asset_substituted() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("logo.svg"), SVG).unwrap();

        let renderer = Renderer::new(settings(dir.path().to_path_buf()));
        let doc = geladaria_core::generate(&order());
        let bundle = renderer.load_assets(&doc).unwrap();

        assert!(bundle.image(AssetId::Logo).is_some());
        assert!(bundle.image(AssetId::Background).is_none());
    }

    #[test]
    fn test_missing_asset_fails_under_fail_policy() {
        let dir = TempDir::new().unwrap();
        let mut settings = settings(dir.path().to_path_buf());
        settings.policy = AssetPolicy::Fail;

        let renderer = Renderer::new(settings);
        let doc = geladaria_core::generate(&order());
        let err = renderer.load_assets(&doc).unwrap_err();

        match err {
            RenderError::Asset(AssetLoadError::NotFound { asset, .. }) => {
                assert!(asset == "logo" || asset == "background")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_corrupt_image_is_unsupported() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("logo.svg"), SVG).unwrap();
        std::fs::write(dir.path().join("background.svg"), b"not an image").unwrap();
        let mut settings = settings(dir.path().to_path_buf());
        settings.policy = AssetPolicy::Fail;

        let renderer = Renderer::new(settings);
        let doc = geladaria_core::generate(&order());
        let err = renderer.load_assets(&doc).unwrap_err();

        assert!(matches!(
            err,
            RenderError::Asset(AssetLoadError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_render_produces_pdf() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("logo.svg"), SVG).unwrap();
        std::fs::write(dir.path().join("background.svg"), SVG).unwrap();

        let renderer = Renderer::new(settings(dir.path().to_path_buf()));
        let doc = geladaria_core::generate(&order());
        let pdf = renderer.render(&doc).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_without_assets_substitutes_everything() {
        let dir = TempDir::new().unwrap();
        let renderer = Renderer::new(settings(dir.path().to_path_buf()));
        let doc = geladaria_core::generate(&order().with_flavors(0));
        let pdf = renderer.render(&doc).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
        assert!(crate::testing::has_text(&pdf));
    }

    #[test]
    fn test_default_fonts_missing_still_renders_text() {
        let dir = TempDir::new().unwrap();
        let settings = AssetSettings {
            directory: dir.path().to_path_buf(),
            ..Default::default()
        };
        let renderer = Renderer::new(settings);
        let doc = geladaria_core::generate(&order().with_flavors(0));

        let bundle = renderer.load_assets(&doc).unwrap();
        assert!(bundle.fonts().is_empty());

        let pdf = renderer.render_with_bundle(&doc, &bundle).unwrap();
        assert!(crate::testing::has_text(&pdf));
    }

    #[test]
    fn test_truncated_png_substituted() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("logo.svg"), SVG).unwrap();
        std::fs::write(dir.path().join("bg.png"), b"\x89PNG\r\n\x1a\ntruncated garbage").unwrap();
        let mut settings = settings(dir.path().to_path_buf());
        settings.background = AssetSource::new("bg.png");

        let renderer = Renderer::new(settings);
        let doc = geladaria_core::generate(&order());
        let bundle = renderer.load_assets(&doc).unwrap();
        assert!(bundle.image(AssetId::Background).is_none());

        let pdf = renderer.render(&doc).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn test_truncated_png_fails_under_fail_policy() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("logo.svg"), SVG).unwrap();
        std::fs::write(dir.path().join("bg.png"), b"\x89PNG\r\n\x1a\ntruncated garbage").unwrap();
        let mut settings = settings(dir.path().to_path_buf());
        settings.background = AssetSource::new("bg.png");
        settings.policy = AssetPolicy::Fail;

        let err = Renderer::new(settings)
            .render(&geladaria_core::generate(&order()))
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::Asset(AssetLoadError::UnsupportedFormat { .. })
        ));
    }
}
