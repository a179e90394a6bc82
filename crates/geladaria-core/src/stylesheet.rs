//! Named styles of the invoice page

use geladaria_ast::{Align, Color, Justify, Position, Style};

/// Page background (plum)
pub const PAGE_BACKGROUND: Color = Color::rgb(0x64, 0x39, 0x5c);
/// Summary box background
pub const SUMMARY_BACKGROUND: Color = Color::rgb(0x7c, 0x4a, 0x73);
/// Section titles
pub const TITLE_COLOR: Color = Color::rgb(0x3d, 0x1a, 0x36);
/// Body text
pub const TEXT_COLOR: Color = Color::rgb(0xf3, 0xf4, 0xf6);
/// Highlighted summary values
pub const MONEY_COLOR: Color = Color::rgb(0x22, 0xc5, 0x5e);

/// The stylesheet used by the invoice template
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceStyles {
    pub page: Style,
    pub background_image: Style,
    pub header: Style,
    pub logo: Style,
    pub tagline: Style,
    pub address: Style,
    pub address_line: Style,
    pub section_title: Style,
    pub data_box: Style,
    pub text: Style,
    pub summary_box: Style,
    pub content_box: Style,
    pub summary_text: Style,
    pub money: Style,
    pub footer: Style,
}

impl Default for InvoiceStyles {
    fn default() -> Self {
        Self {
            page: Style::new().background(PAGE_BACKGROUND).padding(20.0),
            background_image: Style::new()
                .absolute(Position::top_right(0.0, 5.0))
                .width(200.0),
            header: Style::new()
                .row()
                .justify(Justify::SpaceBetween)
                .align(Align::Center)
                .margin_bottom(20.0),
            logo: Style::new().size(120.0, 65.0).padding_bottom(10.0),
            tagline: Style::new().font_size(13.0).color(TEXT_COLOR),
            address: Style::new().justify(Justify::End).align(Align::End),
            address_line: Style::new()
                .color(TEXT_COLOR)
                .font_size(10.0)
                .line_height(1.5),
            section_title: Style::new()
                .color(TITLE_COLOR)
                .font_size(18.0)
                .margin_bottom(12.0),
            data_box: Style::new().line_height(1.0).radius(8.0),
            text: Style::new()
                .color(TEXT_COLOR)
                .font_size(12.0)
                .margin_bottom(5.0),
            summary_box: Style::new()
                .row()
                .justify(Justify::SpaceBetween)
                .align(Align::Center)
                .background(SUMMARY_BACKGROUND)
                .radius(10.0)
                .padding(15.0)
                .margin_top(20.0),
            content_box: Style::new().flex(1.0),
            summary_text: Style::new()
                .color(TEXT_COLOR)
                .font_size(12.0)
                .line_height(2.0),
            money: Style::new().color(MONEY_COLOR),
            footer: Style::new()
                .absolute(Position::bottom_right(10.0, 10.0))
                .color(TEXT_COLOR)
                .font_size(10.0),
        }
    }
}
