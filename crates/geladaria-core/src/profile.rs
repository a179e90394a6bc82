//! Shop profile
//!
//! The static text printed on every invoice. Loaded from the `[shop]` table
//! of `geladaria.toml`; every key falls back to the shop's own wording.

use serde::{Deserialize, Serialize};

/// Static content of the invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopProfile {
    /// Shop name, used as the PDF author
    pub name: String,
    /// Tagline printed under the logo
    pub tagline: String,
    /// Address block printed in the header, one entry per line
    pub address: Vec<String>,
    /// Title of the customer data section
    pub customer_title: String,
    /// Title of the order summary section
    pub summary_title: String,
    /// Footer message
    pub footer: String,
    /// Prefix of the document title and download file name
    pub title_prefix: String,
    /// Font family requested for all text
    pub font_family: String,
}

impl Default for ShopProfile {
    fn default() -> Self {
        Self {
            name: "Geladaria".to_string(),
            tagline: "Faça sua encomenda de qualquer lugar e a qualquer hora!".to_string(),
            address: vec![
                "Avenida Comandante Valodia nº 69".to_string(),
                "Largo do Kinaxixi, Luanda".to_string(),
                "Angola".to_string(),
            ],
            customer_title: "Dados do Cliente".to_string(),
            summary_title: "Resumo da Encomenda".to_string(),
            footer: "Obrigado pela sua compra!".to_string(),
            title_prefix: "Fatura".to_string(),
            font_family: "Roboto".to_string(),
        }
    }
}

impl ShopProfile {
    /// Document title for a customer, e.g. "Fatura - Maria"
    pub fn document_title(&self, customer: &str) -> String {
        if customer.is_empty() {
            self.title_prefix.clone()
        } else {
            format!("{} - {}", self.title_prefix, customer)
        }
    }

    /// Download file name for a customer, e.g. "Fatura_Maria.pdf"
    pub fn download_filename(&self, customer: &str) -> String {
        format!("{}_{}.pdf", self.title_prefix, customer)
    }
}
