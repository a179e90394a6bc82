//! Invoice template
//!
//! Pure transformation from an order to the layout of its invoice page.
//! The template performs no validation: whatever the order holds is printed
//! as-is, blank strings included.
//!
//! # Page layout
//!
//! ```text
//! +---------------------------------------------+
//! | [logo]                 address line 1   (bg)|
//! | tagline                address line 2       |
//! |                        address line 3       |
//! | Dados do Cliente                            |
//! |   Nome / Número / Cidade / Ponto de ref.    |
//! | +-----------------------------------------+ |
//! | | Resumo da Encomenda            [logo]   | |
//! | |   Sabores / Pagamento / Método          | |
//! | +-----------------------------------------+ |
//! |                                   footer    |
//! +---------------------------------------------+
//! ```

use geladaria_ast::{
    AssetId, DocumentDescription, DocumentMeta, FieldLine, Node, OrderField, OrderFormData, Page,
    PageSize, SectionRole, Style,
};

use crate::profile::ShopProfile;
use crate::stylesheet::InvoiceStyles;

/// Generate the invoice of an order with the default shop profile
pub fn generate(order: &OrderFormData) -> DocumentDescription {
    InvoiceTemplate::default().generate(order)
}

/// The invoice template, bound to a shop profile and stylesheet
#[derive(Debug, Clone, Default)]
pub struct InvoiceTemplate {
    profile: ShopProfile,
    styles: InvoiceStyles,
}

impl InvoiceTemplate {
    /// Create a template for a shop profile
    pub fn new(profile: ShopProfile) -> Self {
        Self {
            profile,
            styles: InvoiceStyles::default(),
        }
    }

    /// Replace the stylesheet
    pub fn with_styles(mut self, styles: InvoiceStyles) -> Self {
        self.styles = styles;
        self
    }

    /// The shop profile in use
    pub fn profile(&self) -> &ShopProfile {
        &self.profile
    }

    /// Build the document description for an order
    pub fn generate(&self, order: &OrderFormData) -> DocumentDescription {
        let metadata = DocumentMeta {
            title: Some(self.profile.document_title(&order.name)),
            author: Some(self.profile.name.clone()),
            font_family: Some(self.profile.font_family.clone()),
        };

        let page = Page {
            size: PageSize::A4,
            style: self.styles.page.clone(),
            children: vec![
                self.background(),
                self.header(),
                self.customer_data(order),
                self.order_summary(order),
                self.footer(),
            ],
        };

        DocumentDescription::new(metadata, page)
    }

    fn background(&self) -> Node {
        Node::section(
            SectionRole::Background,
            self.styles.background_image.clone(),
            vec![Node::image(AssetId::Background, Style::new().width(200.0))],
        )
    }

    fn header(&self) -> Node {
        let brand = Node::view(
            Style::new(),
            vec![
                Node::image(AssetId::Logo, self.styles.logo.clone()),
                Node::text(self.styles.tagline.clone(), &self.profile.tagline),
            ],
        );

        let address = Node::section(
            SectionRole::Address,
            self.styles.address.clone(),
            self.profile
                .address
                .iter()
                .map(|line| Node::text(self.styles.address_line.clone(), line))
                .collect(),
        );

        Node::section(
            SectionRole::Header,
            self.styles.header.clone(),
            vec![brand, address],
        )
    }

    fn customer_data(&self, order: &OrderFormData) -> Node {
        let mut children = vec![Node::text(
            self.styles.section_title.clone(),
            &self.profile.customer_title,
        )];
        children.extend(
            OrderField::CUSTOMER
                .iter()
                .map(|&field| field_line(order, field, &self.styles.text, None)),
        );

        Node::section(
            SectionRole::CustomerData,
            self.styles.data_box.clone(),
            children,
        )
    }

    fn order_summary(&self, order: &OrderFormData) -> Node {
        let mut lines = vec![Node::text(
            self.styles.section_title.clone(),
            &self.profile.summary_title,
        )];
        lines.extend(OrderField::SUMMARY.iter().map(|&field| {
            field_line(
                order,
                field,
                &self.styles.summary_text,
                Some(&self.styles.money),
            )
        }));

        Node::section(
            SectionRole::OrderSummary,
            self.styles.summary_box.clone(),
            vec![
                Node::view(self.styles.content_box.clone(), lines),
                Node::view(
                    self.styles.content_box.clone(),
                    vec![Node::image(AssetId::Logo, self.styles.logo.clone())],
                ),
            ],
        )
    }

    fn footer(&self) -> Node {
        Node::section(
            SectionRole::Footer,
            self.styles.footer.clone(),
            vec![Node::text(Style::new(), &self.profile.footer)],
        )
    }
}

fn field_line(
    order: &OrderFormData,
    field: OrderField,
    style: &Style,
    value_style: Option<&Style>,
) -> Node {
    Node::Field(FieldLine {
        field,
        label: field.label().to_string(),
        value: order.value_of(field),
        style: style.clone(),
        value_style: value_style.cloned(),
    })
}
