//! Browser tests for geladaria-wasm
//!
//! Run with `wasm-pack test --headless --firefox crates/geladaria-wasm`.

#![cfg(target_arch = "wasm32")]

use geladaria_wasm::InvoiceClient;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const SVG: &[u8] = br#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="10" height="10" fill="pink"/></svg>"#;

fn order(name: &str, flavors: i32) -> JsValue {
    let order = js_sys::Object::new();
    let set = |key: &str, value: JsValue| {
        js_sys::Reflect::set(&order, &JsValue::from_str(key), &value).unwrap();
    };
    set("name", JsValue::from_str(name));
    set("number", JsValue::from_str("923000000"));
    set("cityOrNeighborhood", JsValue::from_str("Maianga"));
    set("landmark", JsValue::from_str(""));
    set("flavors", JsValue::from(flavors));
    set("payment", JsValue::from_str("2 700 Kz"));
    set("paymentMethod", JsValue::from_str("Multicaixa Express"));
    order.into()
}

#[wasm_bindgen_test]
fn test_filename() {
    let client = InvoiceClient::new();
    assert_eq!(client.filename(order("Maria", 3)).unwrap(), "Fatura_Maria.pdf");
}

#[wasm_bindgen_test]
fn test_generate_returns_description() {
    let client = InvoiceClient::new();
    let doc = client.generate(order("Maria", 0)).unwrap();
    let metadata = js_sys::Reflect::get(&doc, &JsValue::from_str("metadata")).unwrap();
    let title = js_sys::Reflect::get(&metadata, &JsValue::from_str("title")).unwrap();
    assert_eq!(title.as_string().as_deref(), Some("Fatura - Maria"));
}

#[wasm_bindgen_test]
fn test_validate_reports_negative_flavors() {
    let client = InvoiceClient::new();
    let diagnostics = client.validate(order("Maria", -1)).unwrap();
    let diagnostics = js_sys::Array::from(&diagnostics);
    assert_eq!(diagnostics.length(), 1);
}

#[wasm_bindgen_test]
fn test_render_with_assets() {
    let mut client = InvoiceClient::new();
    client.set_logo(SVG).unwrap();
    client.set_background(SVG).unwrap();

    let pdf = client.render(order("Maria", 3)).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[wasm_bindgen_test]
fn test_render_rejects_invalid_order() {
    let client = InvoiceClient::new();
    assert!(client.render(order("", 3)).is_err());
}

#[wasm_bindgen_test]
fn test_download_cleans_up_anchor() {
    let client = InvoiceClient::new();
    client.download(order("Maria", 3)).unwrap();

    let document = web_sys::window().unwrap().document().unwrap();
    let anchors = document.get_elements_by_tag_name("a");
    assert_eq!(anchors.length(), 0);
}
