//! Document description to Typst markup transpiler
//!
//! Every node becomes a Typst code-mode expression:
//!
//! - column views become `stack(dir: ttb, ..)` inside a `block`
//! - row views become a `grid` (space-between is expressed with `1fr`
//!   spacer columns, flex children with `fr` columns)
//! - absolutely positioned nodes become `place(..)`
//! - text and field lines become sums of `text(..)` calls on string
//!   literals, so user input can never be interpreted as markup
//! - images reference the virtual asset paths of the [`AssetBundle`];
//!   an image whose asset is missing becomes a blank `box` of the same size

use geladaria_ast::{
    Align, DocumentDescription, FieldLine, ImageNode, Justify, Node, Position, Style, Text, View,
};

use crate::assets::{virtual_path, AssetBundle};

/// Transpiler for converting a document description to Typst markup
pub struct Transpiler;

impl Transpiler {
    /// Transpile a document to Typst markup
    pub fn transpile(doc: &DocumentDescription, assets: &AssetBundle) -> String {
        let mut output = String::new();

        // Document metadata
        let mut meta = Vec::new();
        if let Some(ref title) = doc.metadata.title {
            meta.push(format!("title: {}", quote(title)));
        }
        if let Some(ref author) = doc.metadata.author {
            meta.push(format!("author: {}", quote(author)));
        }
        if !meta.is_empty() {
            output.push_str(&format!("#set document({})\n", meta.join(", ")));
        }

        // Page setup; the page padding becomes the page margin
        let page = &doc.page;
        let mut page_args = vec![
            format!("paper: {}", quote(page.size.paper_name())),
            format!("margin: {}", pt(page.style.padding.unwrap_or(0.0))),
        ];
        if let Some(fill) = page.style.background {
            page_args.push(format!("fill: {}", color(fill)));
        }
        output.push_str(&format!("#set page({})\n", page_args.join(", ")));

        let mut text_args = text_args(&page.style);
        if let Some(ref family) = doc.metadata.font_family {
            text_args.insert(0, format!("font: {}", quote(family)));
        }
        if !text_args.is_empty() {
            output.push_str(&format!("#set text({})\n", text_args.join(", ")));
        }
        output.push_str("#set block(spacing: 0pt)\n\n");

        for node in &page.children {
            output.push('#');
            output.push_str(&Self::transpile_node(node, assets));
            output.push('\n');
        }

        output
    }

    /// Transpile a single node to a code-mode expression
    pub fn transpile_node(node: &Node, assets: &AssetBundle) -> String {
        let body = match node {
            Node::View(view) => Self::transpile_view(view, assets),
            Node::Text(text) => Self::transpile_text(text),
            Node::Field(field) => Self::transpile_field(field),
            Node::Image(image) => Self::transpile_image(image, assets),
        };

        let style = node.style();
        let body = with_spacing(body, style, !matches!(node, Node::View(_)));
        match style.position {
            Some(position) => place(body, position),
            None => body,
        }
    }

    fn transpile_view(view: &View, assets: &AssetBundle) -> String {
        let style = &view.style;
        let (placed, flow): (Vec<&Node>, Vec<&Node>) = view
            .children
            .iter()
            .partition(|child| child.style().is_absolute());

        let mut inner = if style.is_row() {
            Self::transpile_row(style, &flow, assets)
        } else {
            Self::transpile_column(style, &flow, assets)
        };

        if !placed.is_empty() {
            let mut parts: Vec<String> = placed
                .iter()
                .map(|child| Self::transpile_node(child, assets))
                .collect();
            parts.push(inner);
            inner = parts.join(" + ");
        }

        let inner = scoped(style, inner);

        let mut block_args = Vec::new();
        if let Some(fill) = style.background {
            block_args.push(format!("fill: {}", color(fill)));
        }
        if let Some(radius) = style.border_radius {
            block_args.push(format!("radius: {}", pt(radius)));
        }
        if let Some(padding) = style.padding {
            block_args.push(format!("inset: {}", pt(padding)));
        }
        match style.width {
            Some(width) => block_args.push(format!("width: {}", pt(width))),
            None if style.background.is_some() => block_args.push("width: 100%".to_string()),
            None => {}
        }
        block_args.push(inner);

        format!("block({})", block_args.join(", "))
    }

    fn transpile_column(style: &Style, children: &[&Node], assets: &AssetBundle) -> String {
        let horizontal = match style.align {
            Some(Align::End) => Some("right"),
            Some(Align::Center) => Some("center"),
            Some(Align::Start) | None => None,
        };

        let mut args = vec!["dir: ttb".to_string()];
        for child in children {
            let expr = Self::transpile_node(child, assets);
            args.push(match horizontal {
                Some(alignment) => format!("align({}, {})", alignment, expr),
                None => expr,
            });
        }

        format!("stack({})", args.join(", "))
    }

    fn transpile_row(style: &Style, children: &[&Node], assets: &AssetBundle) -> String {
        let spaced = style.justify == Some(Justify::SpaceBetween)
            && children.iter().all(|child| child.style().flex.is_none());

        let mut columns = Vec::new();
        let mut cells = Vec::new();
        for (i, child) in children.iter().enumerate() {
            if spaced && i > 0 {
                columns.push("1fr".to_string());
                cells.push("[]".to_string());
            }
            columns.push(match child.style().flex {
                Some(flex) => format!("{}fr", number(flex)),
                None => "auto".to_string(),
            });
            cells.push(Self::transpile_node(child, assets));
        }

        if columns.is_empty() {
            return "none".to_string();
        }

        let mut args = vec![format!("columns: {}", array(&columns))];
        match style.align {
            Some(Align::Center) => args.push("align: horizon".to_string()),
            Some(Align::End) => args.push("align: bottom".to_string()),
            Some(Align::Start) | None => {}
        }
        args.extend(cells);

        format!("grid({})", args.join(", "))
    }

    fn transpile_text(text: &Text) -> String {
        let runs: Vec<String> = if text.runs.is_empty() {
            vec![styled_text(&text.style, None, "")]
        } else {
            text.runs
                .iter()
                .map(|run| styled_text(&text.style, run.style.as_ref(), &run.text))
                .collect()
        };
        leading(&text.style, runs.join(" + "))
    }

    fn transpile_field(field: &FieldLine) -> String {
        let label = styled_text(&field.style, None, &format!("{}: ", field.label));
        let value = styled_text(&field.style, field.value_style.as_ref(), &field.value);
        leading(&field.style, format!("{} + {}", label, value))
    }

    fn transpile_image(image: &ImageNode, assets: &AssetBundle) -> String {
        let style = &image.style;
        let mut size = Vec::new();
        if let Some(width) = style.width {
            size.push(format!("width: {}", pt(width)));
        }
        if let Some(height) = style.height {
            size.push(format!("height: {}", pt(height)));
        }

        match assets.image(image.asset) {
            Some(loaded) => {
                let mut args = vec![
                    quote(virtual_path(image.asset)),
                    format!("format: {}", quote(loaded.format.typst_name())),
                ];
                args.extend(size);
                format!("image({})", args.join(", "))
            }
            None => {
                // Blank region of the same footprint; square when the
                // height was left to the image's aspect ratio
                let blank = match (style.width, style.height) {
                    (Some(w), Some(h)) => vec![format!("width: {}", pt(w)), format!("height: {}", pt(h))],
                    (Some(w), None) => vec![format!("width: {}", pt(w)), format!("height: {}", pt(w))],
                    (None, Some(h)) => vec![format!("width: {}", pt(h)), format!("height: {}", pt(h))],
                    (None, None) => Vec::new(),
                };
                format!("box({})", blank.join(", "))
            }
        }
    }
}

/// `text(..)` call for a run, merging the run style over the node style
fn styled_text(base: &Style, run: Option<&Style>, content: &str) -> String {
    let mut style = base.clone();
    if let Some(run) = run {
        if run.color.is_some() {
            style.color = run.color;
        }
        if run.font_size.is_some() {
            style.font_size = run.font_size;
        }
    }

    let mut args = text_args(&style);
    args.push(quote(content));
    format!("text({})", args.join(", "))
}

/// Inheritable text properties of a style
fn text_args(style: &Style) -> Vec<String> {
    let mut args = Vec::new();
    if let Some(size) = style.font_size {
        args.push(format!("size: {}", pt(size)));
    }
    if let Some(fill) = style.color {
        args.push(format!("fill: {}", color(fill)));
    }
    args
}

/// Apply a container's inheritable text properties to its content
fn scoped(style: &Style, inner: String) -> String {
    let mut rules = Vec::new();
    let args = text_args(style);
    if !args.is_empty() {
        rules.push(format!("set text({})", args.join(", ")));
    }
    if let Some(line_height) = style.line_height {
        rules.push(format!("set par(leading: {})", em(par_leading(line_height))));
    }

    if rules.is_empty() {
        inner
    } else {
        format!("{{ {}; {} }}", rules.join("; "), inner)
    }
}

/// Line height of a leaf: paragraph leading plus half-leading around the line
fn leading(style: &Style, body: String) -> String {
    let Some(line_height) = style.line_height else {
        return body;
    };

    let mut body = format!("par(leading: {}, {})", em(par_leading(line_height)), body);
    if let Some(size) = style.font_size {
        let half = (line_height - 1.0).max(0.0) * size / 2.0;
        if half > 0.0 {
            body = format!("pad(y: {}, {})", pt(half), body);
        }
    }
    body
}

/// Typst leading for a CSS-style line height multiple
fn par_leading(line_height: f32) -> f32 {
    (line_height - 1.0).max(0.0) + 0.3
}

/// Wrap a node in its outer spacing
///
/// Leaves also turn their own padding into spacing; views apply padding as
/// block inset instead.
fn with_spacing(body: String, style: &Style, leaf: bool) -> String {
    let top = style.margin_top.unwrap_or(0.0);
    let mut bottom = style.margin_bottom.unwrap_or(0.0) + style.padding_bottom.unwrap_or(0.0);
    let mut rest = 0.0;
    if leaf {
        if let Some(padding) = style.padding {
            rest = padding;
            bottom = bottom.max(padding);
        }
    }

    let mut args = Vec::new();
    if rest > 0.0 {
        args.push(format!("rest: {}", pt(rest)));
    }
    if top > 0.0 {
        args.push(format!("top: {}", pt(top)));
    }
    if bottom > 0.0 {
        args.push(format!("bottom: {}", pt(bottom)));
    }

    if args.is_empty() {
        body
    } else {
        args.push(body);
        format!("pad({})", args.join(", "))
    }
}

/// Place a node relative to its container
fn place(body: String, position: Position) -> String {
    let vertical = if position.bottom.is_some() && position.top.is_none() {
        "bottom"
    } else {
        "top"
    };
    let horizontal = if position.right.is_some() && position.left.is_none() {
        "right"
    } else {
        "left"
    };

    let dx = match horizontal {
        "right" => -position.right.unwrap_or(0.0),
        _ => position.left.unwrap_or(0.0),
    };
    let dy = match vertical {
        "bottom" => -position.bottom.unwrap_or(0.0),
        _ => position.top.unwrap_or(0.0),
    };

    format!(
        "place({} + {}, dx: {}, dy: {}, {})",
        vertical,
        horizontal,
        pt(dx),
        pt(dy),
        body
    )
}

fn color(color: geladaria_ast::Color) -> String {
    format!("rgb({})", quote(&color.to_hex()))
}

fn array(items: &[String]) -> String {
    if items.len() == 1 {
        format!("({},)", items[0])
    } else {
        format!("({})", items.join(", "))
    }
}

fn number(value: f32) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

fn pt(value: f32) -> String {
    format!("{}pt", number(value))
}

fn em(value: f32) -> String {
    format!("{}em", number(value))
}

/// Quote a string as a Typst string literal
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
