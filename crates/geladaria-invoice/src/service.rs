//! Invoice service
//!
//! [`InvoiceService`] owns everything an export needs: the template, the
//! validation engine, the renderer and the blob store. Hosts construct one
//! and pass it by reference.

use std::path::Path;

use geladaria_ast::{DocumentDescription, OrderFormData};
use geladaria_core::diagnostics::Diagnostic;
use geladaria_core::InvoiceTemplate;
use geladaria_pdf::{RenderError, Renderer};
use geladaria_validate::{ValidationEngine, ValidationError};
use tracing::{debug, info, warn};

use crate::blob::{Blob, BlobStore};
use crate::config::Settings;
use crate::download::{DownloadReceipt, DownloadTarget, PDF_MIME};
use crate::error::{InvoiceError, Result};

/// Generates, renders and delivers invoices
#[derive(Debug)]
pub struct InvoiceService {
    settings: Settings,
    template: InvoiceTemplate,
    validator: ValidationEngine,
    renderer: Renderer,
    blobs: BlobStore,
}

impl Default for InvoiceService {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl InvoiceService {
    /// Create a service from settings
    pub fn new(settings: Settings) -> Self {
        Self {
            template: InvoiceTemplate::new(settings.shop.clone()),
            validator: ValidationEngine::with_defaults(),
            renderer: Renderer::new(settings.assets.clone()),
            blobs: BlobStore::new(),
            settings,
        }
    }

    /// Create a service from a `geladaria.toml` file
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Settings::load(path)?))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The store holding blobs of in-flight downloads
    pub fn blobs(&self) -> &BlobStore {
        &self.blobs
    }

    /// Build the document description of an order
    pub fn generate(&self, order: &OrderFormData) -> DocumentDescription {
        self.template.generate(order)
    }

    /// All diagnostics for an order, warnings included
    pub fn diagnostics(&self, order: &OrderFormData) -> Vec<Diagnostic> {
        self.validator.validate(order)
    }

    /// Reject orders with error diagnostics
    pub fn validate(&self, order: &OrderFormData) -> std::result::Result<(), ValidationError> {
        for diagnostic in self.diagnostics(order).iter().filter(|d| d.is_warning()) {
            warn!(%diagnostic, "order warning");
        }
        self.validator.check(order)
    }

    /// Download file name for an order
    pub fn filename(&self, order: &OrderFormData) -> String {
        self.settings.shop.download_filename(&order.name)
    }

    /// Render an order to PDF bytes on the current thread
    pub fn render(&self, order: &OrderFormData) -> Result<Vec<u8>> {
        if self.settings.export.validate {
            self.validate(order)?;
        }
        let doc = self.generate(order);
        Ok(self.renderer.render(&doc)?)
    }

    /// Render an order and hand the PDF to a download target
    ///
    /// The render runs on tokio's blocking pool. The blob registered for the
    /// download is revoked before this returns, whether or not the target
    /// succeeded.
    pub async fn export(
        &self,
        order: &OrderFormData,
        target: &dyn DownloadTarget,
    ) -> Result<DownloadReceipt> {
        if self.settings.export.validate {
            self.validate(order)?;
        }

        let doc = self.generate(order);
        let renderer = self.renderer.clone();
        let pdf = tokio::task::spawn_blocking(move || renderer.render(&doc))
            .await
            .map_err(|e| RenderError::Task(e.to_string()))??;

        let handle = self.blobs.register(Blob::new(pdf, PDF_MIME));
        let filename = self.filename(order);
        debug!(url = handle.url(), %filename, "handing blob to download target");

        let receipt = target
            .save(&filename, handle.blob())
            .map_err(|source| InvoiceError::Download {
                filename: filename.clone(),
                source,
            })?;

        info!(%filename, bytes = receipt.bytes, "invoice exported");
        Ok(receipt)
    }
}
