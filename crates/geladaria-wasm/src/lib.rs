//! geladaria-wasm - WebAssembly bindings for geladaria
//!
//! Generates invoices in the browser. Image and font bytes are supplied by
//! the page (the browser has no filesystem), orders are plain JS objects
//! with the web form's field names.
//!
//! ```js
//! const client = new InvoiceClient();
//! client.setLogo(new Uint8Array(await (await fetch("/logo-geladaria.png")).arrayBuffer()));
//! client.download({ name: "Maria", number: "923000000", ... });
//! ```

use geladaria_ast::{AssetId, OrderFormData};
use geladaria_core::{InvoiceTemplate, ShopProfile};
use geladaria_pdf::{AssetBundle, Renderer};
use geladaria_validate::ValidationEngine;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// MIME type of the downloaded invoice
const PDF_MIME: &str = "application/pdf";

/// Returns the current version of geladaria
#[wasm_bindgen]
pub fn version() -> String {
    geladaria_core::VERSION.to_string()
}

/// Invoice generator bound to a shop profile and preloaded assets
#[wasm_bindgen]
pub struct InvoiceClient {
    template: InvoiceTemplate,
    validator: ValidationEngine,
    renderer: Renderer,
    assets: AssetBundle,
}

impl Default for InvoiceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl InvoiceClient {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            template: InvoiceTemplate::default(),
            validator: ValidationEngine::with_defaults(),
            renderer: Renderer::default(),
            assets: AssetBundle::new(),
        }
    }

    /// Replace the shop profile; missing keys keep their defaults
    #[wasm_bindgen(js_name = setProfile)]
    pub fn set_profile(&mut self, profile: JsValue) -> Result<(), JsError> {
        let profile: ShopProfile = serde_wasm_bindgen::from_value(profile)?;
        self.template = InvoiceTemplate::new(profile);
        Ok(())
    }

    #[wasm_bindgen(js_name = setLogo)]
    pub fn set_logo(&mut self, bytes: &[u8]) -> Result<(), JsError> {
        self.assets.insert_image(AssetId::Logo, bytes.to_vec())?;
        Ok(())
    }

    #[wasm_bindgen(js_name = setBackground)]
    pub fn set_background(&mut self, bytes: &[u8]) -> Result<(), JsError> {
        self.assets.insert_image(AssetId::Background, bytes.to_vec())?;
        Ok(())
    }

    /// Register a TTF/OTF font
    #[wasm_bindgen(js_name = addFont)]
    pub fn add_font(&mut self, bytes: &[u8]) -> Result<(), JsError> {
        self.assets.add_font(bytes.to_vec())?;
        Ok(())
    }

    /// The document description of an order
    pub fn generate(&self, order: JsValue) -> Result<JsValue, JsError> {
        let order = parse_order(order)?;
        let doc = self.template.generate(&order);
        Ok(serde_wasm_bindgen::to_value(&doc)?)
    }

    /// Diagnostics for an order, warnings included
    pub fn validate(&self, order: JsValue) -> Result<JsValue, JsError> {
        let order = parse_order(order)?;
        let diagnostics = self.validator.validate(&order);
        Ok(serde_wasm_bindgen::to_value(&diagnostics)?)
    }

    /// Download file name of an order
    pub fn filename(&self, order: JsValue) -> Result<String, JsError> {
        let order = parse_order(order)?;
        Ok(self.template.profile().download_filename(&order.name))
    }

    /// Render an order to PDF bytes
    pub fn render(&self, order: JsValue) -> Result<Vec<u8>, JsError> {
        let order = parse_order(order)?;
        self.render_order(&order)
    }

    /// Render an order and save it through the browser as `Fatura_<name>.pdf`
    pub fn download(&self, order: JsValue) -> Result<(), JsError> {
        let order = parse_order(order)?;
        let pdf = self.render_order(&order)?;
        let filename = self.template.profile().download_filename(&order.name);
        save_as(&filename, &pdf, PDF_MIME)
    }
}

impl InvoiceClient {
    fn render_order(&self, order: &OrderFormData) -> Result<Vec<u8>, JsError> {
        self.validator.check(order)?;
        let doc = self.template.generate(order);
        Ok(self.renderer.render_with_bundle(&doc, &self.assets)?)
    }
}

fn parse_order(value: JsValue) -> Result<OrderFormData, JsError> {
    Ok(serde_wasm_bindgen::from_value(value)?)
}

fn js_error(value: JsValue) -> JsError {
    JsError::new(&format!("{:?}", value))
}

/// An object URL, revoked on drop together with the anchor pointing at it
struct ObjectUrl {
    url: String,
    anchor: Option<HtmlAnchorElement>,
}

impl ObjectUrl {
    fn new(blob: &Blob) -> Result<Self, JsError> {
        let url = Url::create_object_url_with_blob(blob).map_err(js_error)?;
        Ok(Self { url, anchor: None })
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        if let Some(anchor) = self.anchor.take() {
            anchor.remove();
        }
        let _ = Url::revoke_object_url(&self.url);
    }
}

/// Blob -> object URL -> temporary anchor click
fn save_as(filename: &str, data: &[u8], mime: &str) -> Result<(), JsError> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(data));

    let props = BlobPropertyBag::new();
    props.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &props).map_err(js_error)?;

    let mut object_url = ObjectUrl::new(&blob)?;

    let window = web_sys::window().ok_or_else(|| JsError::new("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsError::new("no document"))?;
    let body = document.body().ok_or_else(|| JsError::new("no body"))?;

    let anchor = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| JsError::new("created element is not an anchor"))?;
    anchor.set_href(&object_url.url);
    anchor.set_download(filename);
    body.append_child(&anchor).map_err(js_error)?;
    object_url.anchor = Some(anchor.clone());

    anchor.click();
    Ok(())
}
