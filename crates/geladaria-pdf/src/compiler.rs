//! Typst to PDF compiler
//!
//! Compiles Typst markup to PDF bytes using typst-as-lib. Images of the
//! [`AssetBundle`] are served to the typesetter from their virtual paths,
//! fonts are registered with the engine ahead of the fonts bundled with
//! `typst-assets`, which keep text rendering when no custom font loads.

use tracing::debug;
use typst_as_lib::TypstEngine;

use crate::assets::{virtual_path, AssetBundle};
use crate::error::{RenderError, Result};

/// Compiler for converting Typst markup to PDF
pub struct Compiler;

impl Compiler {
    /// Compile markup that references no assets
    pub fn compile(markup: &str) -> Result<Vec<u8>> {
        Self::compile_with_assets(markup, &AssetBundle::new())
    }

    /// Compile markup with the images and fonts of a bundle
    pub fn compile_with_assets(markup: &str, assets: &AssetBundle) -> Result<Vec<u8>> {
        let files: Vec<(&'static str, Vec<u8>)> = assets
            .images()
            .map(|(id, image)| (virtual_path(id), image.data.clone()))
            .collect();

        let mut fonts: Vec<&[u8]> = assets.fonts().iter().map(Vec::as_slice).collect();
        for font in typst_assets::fonts() {
            fonts.push(font);
        }

        let engine = TypstEngine::builder()
            .main_file(markup.to_string())
            .fonts(fonts)
            .with_static_file_resolver(files)
            .build();

        // Warned<Result<Document, Error>>
        let compiled = engine.compile();
        for warning in &compiled.warnings {
            debug!(message = %warning.message, "typst warning");
        }

        let document = compiled
            .output
            .map_err(|e| RenderError::Compilation(format!("{:?}", e)))?;

        let options = typst_pdf::PdfOptions::default();
        let pdf_bytes = typst_pdf::pdf(&document, &options)
            .map_err(|e| RenderError::Compilation(format!("PDF generation failed: {:?}", e)))?;

        Ok(pdf_bytes.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geladaria_ast::AssetId;

    const SVG: &[u8] = br#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"><rect width="4" height="4" fill="red"/></svg>"#;

    #[test]
    fn test_compile_simple() {
        let result = Compiler::compile("#text(\"Fatura\")");
        assert!(result.is_ok(), "Compilation failed: {:?}", result.err());
        assert!(result.unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_compile_without_custom_fonts_embeds_text() {
        let pdf = Compiler::compile("#text(font: \"Roboto\", \"0\")").unwrap();
        assert!(crate::testing::has_text(&pdf));
    }

    #[test]
    fn test_compile_with_virtual_image() {
        let mut bundle = AssetBundle::new();
        bundle.insert_image(AssetId::Logo, SVG.to_vec()).unwrap();

        let markup = "#image(\"/assets/logo\", format: \"svg\", width: 20pt)";
        let result = Compiler::compile_with_assets(markup, &bundle);
        assert!(result.is_ok(), "Compilation failed: {:?}", result.err());
    }

    #[test]
    fn test_missing_virtual_file_fails() {
        let markup = "#image(\"/assets/logo\", format: \"svg\")";
        let result = Compiler::compile(markup);
        assert!(matches!(result, Err(RenderError::Compilation(_))));
    }

    #[test]
    fn test_unknown_function_fails() {
        let result = Compiler::compile("#function_that_does_not_exist()");
        assert!(matches!(result, Err(RenderError::Compilation(_))));
    }
}
