//! geladaria-pdf - PDF rendering via Typst
//!
//! This crate serializes a [`DocumentDescription`] to PDF bytes using Typst
//! as the typesetting backend.
//!
//! # Architecture
//!
//! The pipeline consists of three stages:
//!
//! 1. **AssetLoader** - Fetches the images and fonts a document needs
//! 2. **Transpiler** - Converts the document description to Typst markup
//! 3. **Compiler** - Compiles Typst markup to PDF bytes
//!
//! [`Renderer`] drives all three and applies the [`AssetPolicy`].
//!
//! # Example
//!
//! ```ignore
//! use geladaria_ast::OrderFormData;
//! use geladaria_pdf::{AssetSettings, Renderer};
//!
//! let order = OrderFormData::new("Maria", "923000000", "Maianga");
//! let doc = geladaria_core::generate(&order);
//! let pdf = Renderer::new(AssetSettings::default()).render(&doc)?;
//! ```

mod assets;
mod compiler;
mod error;
mod renderer;
mod transpiler;

#[cfg(test)]
mod testing;

pub use assets::{
    virtual_path, AssetBundle, AssetLoader, AssetPolicy, AssetSettings, AssetSource, FontFormat,
    ImageFormat, LoadedImage,
};
pub use compiler::Compiler;
pub use error::{AssetLoadError, RenderError, Result};
pub use renderer::Renderer;
pub use transpiler::Transpiler;

use geladaria_ast::DocumentDescription;

/// Render a document with an already loaded asset bundle
pub fn render_pdf(doc: &DocumentDescription, assets: &AssetBundle) -> Result<Vec<u8>> {
    let markup = Transpiler::transpile(doc, assets);
    Compiler::compile_with_assets(&markup, assets)
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
