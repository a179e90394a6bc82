//! Integration tests for geladaria-pdf

use std::path::Path;

use geladaria_ast::{AssetId, OrderFormData};
use geladaria_pdf::{
    AssetLoadError, AssetPolicy, AssetSettings, AssetSource, RenderError, Renderer, Transpiler,
};
use tempfile::TempDir;

const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="12" height="12"><rect width="12" height="12" fill="white"/></svg>"#;

fn order() -> OrderFormData {
    OrderFormData::new("Maria", "923000000", "Maianga")
        .with_landmark("Perto do mercado")
        .with_flavors(3)
        .with_payment("2 700 Kz")
        .with_payment_method("Multicaixa Express")
}

fn write_assets(dir: &Path, logo: bool, background: bool) -> AssetSettings {
    if logo {
        std::fs::write(dir.join("logo.svg"), SVG).unwrap();
    }
    if background {
        std::fs::write(dir.join("bg.svg"), SVG).unwrap();
    }
    AssetSettings {
        directory: dir.to_path_buf(),
        logo: AssetSource::new("logo.svg"),
        background: AssetSource::new("bg.svg"),
        fonts: Vec::new(),
        ..Default::default()
    }
}

#[test]
fn test_full_invoice_renders() {
    let dir = TempDir::new().unwrap();
    let renderer = Renderer::new(write_assets(dir.path(), true, true));
    let doc = geladaria_core::generate(&order());

    let pdf = renderer.render(&doc).expect("render failed");
    assert!(pdf.starts_with(b"%PDF"));
    assert!(pdf.len() > 500);
}

#[test]
fn test_missing_background_substituted() {
    let dir = TempDir::new().unwrap();
    let renderer = Renderer::new(write_assets(dir.path(), true, false));
    let doc = geladaria_core::generate(&order());

    let bundle = renderer.load_assets(&doc).unwrap();
    assert!(bundle.image(AssetId::Background).is_none());

    let markup = Transpiler::transpile(&doc, &bundle);
    assert!(markup.contains("box(width: 200pt, height: 200pt)"));

    let pdf = renderer.render_with_bundle(&doc, &bundle).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn test_missing_background_fails_under_fail_policy() {
    let dir = TempDir::new().unwrap();
    let mut settings = write_assets(dir.path(), true, false);
    settings.policy = AssetPolicy::Fail;
    let renderer = Renderer::new(settings);
    let doc = geladaria_core::generate(&order());

    match renderer.render(&doc) {
        Err(RenderError::Asset(err @ AssetLoadError::NotFound { .. })) => {
            assert_eq!(err.asset(), "background");
        }
        other => panic!("expected missing background, got {:?}", other.map(|b| b.len())),
    }
}

#[test]
fn test_hostile_input_renders() {
    let dir = TempDir::new().unwrap();
    let renderer = Renderer::new(write_assets(dir.path(), true, true));
    let order = OrderFormData::new("\"#]) } *_=", "\\", "$x$")
        .with_flavors(-1)
        .with_payment("@ref <label>")
        .with_payment_method("// comment");
    let doc = geladaria_core::generate(&order);

    let pdf = renderer.render(&doc).expect("render failed");
    assert!(pdf.starts_with(b"%PDF"));
}

#[cfg(not(feature = "remote"))]
#[test]
fn test_remote_source_without_feature() {
    let dir = TempDir::new().unwrap();
    let mut settings = write_assets(dir.path(), true, true);
    settings.logo = AssetSource::new("https://example.com/logo.png");
    settings.policy = AssetPolicy::Fail;
    let renderer = Renderer::new(settings);

    let err = renderer
        .load_assets(&geladaria_core::generate(&order()))
        .unwrap_err();
    assert!(matches!(
        err,
        RenderError::Asset(AssetLoadError::RemoteDisabled { .. })
    ));
}
