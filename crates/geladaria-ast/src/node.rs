//! Layout tree nodes
//!
//! The invoice page is a tree of views (containers), text, labeled order
//! fields and images, in the spirit of a flexbox layout.

use serde::{Deserialize, Serialize};

use crate::order::OrderField;
use crate::style::Style;

/// A node in the page layout tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// A container
    View(View),
    /// Static text made of styled runs
    Text(Text),
    /// A labeled order value
    Field(FieldLine),
    /// A raster image
    Image(ImageNode),
}

/// Semantic role of a top-level section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionRole {
    Background,
    Header,
    Address,
    CustomerData,
    OrderSummary,
    Footer,
}

/// A container node
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct View {
    /// Section this view represents, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<SectionRole>,
    #[serde(default)]
    pub style: Style,
    pub children: Vec<Node>,
}

/// A text node
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Text {
    #[serde(default)]
    pub style: Style,
    pub runs: Vec<TextRun>,
}

/// A run of text sharing one style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

/// A `Label: value` line bound to an order field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldLine {
    pub field: OrderField,
    pub label: String,
    /// Printed verbatim, may be empty
    pub value: String,
    #[serde(default)]
    pub style: Style,
    /// Style of the value only (e.g. highlight color)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_style: Option<Style>,
}

/// Raster images the invoice can embed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetId {
    /// Brand logo
    Logo,
    /// Decorative background graphic
    Background,
}

impl AssetId {
    pub const ALL: [AssetId; 2] = [AssetId::Logo, AssetId::Background];

    /// Stable name used in logs and virtual paths
    pub fn name(self) -> &'static str {
        match self {
            AssetId::Logo => "logo",
            AssetId::Background => "background",
        }
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An image node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageNode {
    pub asset: AssetId,
    #[serde(default)]
    pub style: Style,
}

impl Node {
    /// Create a container
    pub fn view(style: Style, children: Vec<Node>) -> Self {
        Node::View(View {
            role: None,
            style,
            children,
        })
    }

    /// Create a container for a section
    pub fn section(role: SectionRole, style: Style, children: Vec<Node>) -> Self {
        Node::View(View {
            role: Some(role),
            style,
            children,
        })
    }

    /// Create a single-run text node
    pub fn text(style: Style, text: impl Into<String>) -> Self {
        Node::Text(Text {
            style,
            runs: vec![TextRun::plain(text)],
        })
    }

    /// Create an image node
    pub fn image(asset: AssetId, style: Style) -> Self {
        Node::Image(ImageNode { asset, style })
    }

    /// Style of the node
    pub fn style(&self) -> &Style {
        match self {
            Node::View(view) => &view.style,
            Node::Text(text) => &text.style,
            Node::Field(field) => &field.style,
            Node::Image(image) => &image.style,
        }
    }

    /// Children of the node (empty for leaves)
    pub fn children(&self) -> &[Node] {
        match self {
            Node::View(view) => &view.children,
            _ => &[],
        }
    }

    /// Visit this node and all of its descendants, depth first
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Plain text carried by the node itself (not its children)
    pub fn plain_text(&self) -> Option<String> {
        match self {
            Node::Text(text) => Some(text.runs.iter().map(|r| r.text.as_str()).collect()),
            Node::Field(field) => Some(format!("{}: {}", field.label, field.value)),
            _ => None,
        }
    }
}

impl TextRun {
    /// A run inheriting the node style
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    /// A run with its own style
    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style: Some(style),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_visits_all_nodes() {
        let tree = Node::view(
            Style::new(),
            vec![
                Node::text(Style::new(), "a"),
                Node::view(Style::new(), vec![Node::image(AssetId::Logo, Style::new())]),
            ],
        );

        let mut count = 0;
        tree.walk(&mut |_| count += 1);
        assert_eq!(count, 4);
    }

    #[test]
    fn test_field_plain_text_keeps_empty_value() {
        let node = Node::Field(FieldLine {
            field: OrderField::Landmark,
            label: "Ponto de referência".to_string(),
            value: String::new(),
            style: Style::new(),
            value_style: None,
        });
        assert_eq!(node.plain_text().as_deref(), Some("Ponto de referência: "));
    }

    #[test]
    fn test_text_runs_concatenate() {
        let node = Node::Text(Text {
            style: Style::new(),
            runs: vec![TextRun::plain("Obrigado "), TextRun::plain("pela sua compra!")],
        });
        assert_eq!(node.plain_text().as_deref(), Some("Obrigado pela sua compra!"));
    }
}
