//! Document root and metadata definitions
//!
//! A `DocumentDescription` is the structured invoice page handed from the
//! template to the renderer. It is always exactly one fixed-size page.

use serde::{Deserialize, Serialize};

use crate::node::{AssetId, FieldLine, Node, SectionRole, View};
use crate::order::OrderField;
use crate::style::Style;

/// A complete invoice document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentDescription {
    /// Document metadata (title, author, font)
    pub metadata: DocumentMeta,
    /// The single page
    pub page: Page,
}

/// Document metadata
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Document title (PDF metadata)
    pub title: Option<String>,
    /// Document author (PDF metadata)
    pub author: Option<String>,
    /// Preferred font family for all text
    pub font_family: Option<String>,
}

/// Paper sizes supported by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageSize {
    #[default]
    A4,
}

impl PageSize {
    /// Width and height in points
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
        }
    }

    /// Paper name understood by the typesetter
    pub fn paper_name(self) -> &'static str {
        match self {
            PageSize::A4 => "a4",
        }
    }
}

/// A page with its layout tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Page {
    pub size: PageSize,
    #[serde(default)]
    pub style: Style,
    pub children: Vec<Node>,
}

impl DocumentDescription {
    /// Create a document around a page
    pub fn new(metadata: DocumentMeta, page: Page) -> Self {
        Self { metadata, page }
    }

    /// All section views, depth first
    pub fn sections(&self) -> Vec<&View> {
        let mut sections = Vec::new();
        self.walk(&mut |node| {
            if let Node::View(view) = node {
                if view.role.is_some() {
                    sections.push(view);
                }
            }
        });
        sections
    }

    /// The first section with the given role
    pub fn section(&self, role: SectionRole) -> Option<&View> {
        self.sections().into_iter().find(|v| v.role == Some(role))
    }

    /// Every field line on the page, in document order
    pub fn fields(&self) -> Vec<&FieldLine> {
        let mut fields = Vec::new();
        self.walk(&mut |node| {
            if let Node::Field(field) = node {
                fields.push(field);
            }
        });
        fields
    }

    /// Field lines inside the section with the given role
    pub fn fields_in(&self, role: SectionRole) -> Vec<&FieldLine> {
        let mut fields = Vec::new();
        if let Some(section) = self.section(role) {
            for child in &section.children {
                child.walk(&mut |node| {
                    if let Node::Field(field) = node {
                        fields.push(field);
                    }
                });
            }
        }
        fields
    }

    /// The field line for an order field, if present
    pub fn field(&self, field: OrderField) -> Option<&FieldLine> {
        self.fields().into_iter().find(|f| f.field == field)
    }

    /// Assets referenced by image nodes, in document order, with repeats
    pub fn images(&self) -> Vec<AssetId> {
        let mut images = Vec::new();
        self.walk(&mut |node| {
            if let Node::Image(image) = node {
                images.push(image.asset);
            }
        });
        images
    }

    /// Plain text of every text and field node, one entry per node
    pub fn text_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        self.walk(&mut |node| {
            if let Some(text) = node.plain_text() {
                lines.push(text);
            }
        });
        lines
    }

    fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        for child in &self.page.children {
            child.walk(visit);
        }
    }
}
