//! Customer order record
//!
//! `OrderFormData` is the immutable input of the invoice pipeline. Field
//! names serialize in camelCase so the JSON posted by the web order form
//! deserializes without any mapping layer.

use serde::{Deserialize, Serialize};

use crate::node::SectionRole;

/// One customer order, as supplied by the order form
///
/// No validation happens here: blank strings and negative flavor counts are
/// representable on purpose, so that the validation boundary can report them
/// instead of deserialization failing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFormData {
    /// Customer name
    pub name: String,
    /// Contact phone number
    pub number: String,
    /// City or neighborhood for the delivery
    pub city_or_neighborhood: String,
    /// Optional reference point, may be empty
    #[serde(default)]
    pub landmark: String,
    /// Number of selected flavors
    pub flavors: i64,
    /// Pre-formatted total amount (e.g. "2 500 Kz")
    pub payment: String,
    /// Payment method, free text
    pub payment_method: String,
}

impl OrderFormData {
    /// Create an order with the required customer fields set
    pub fn new(
        name: impl Into<String>,
        number: impl Into<String>,
        city_or_neighborhood: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
            city_or_neighborhood: city_or_neighborhood.into(),
            ..Default::default()
        }
    }

    /// Set the landmark
    pub fn with_landmark(mut self, landmark: impl Into<String>) -> Self {
        self.landmark = landmark.into();
        self
    }

    /// Set the flavor count
    pub fn with_flavors(mut self, flavors: i64) -> Self {
        self.flavors = flavors;
        self
    }

    /// Set the formatted payment total
    pub fn with_payment(mut self, payment: impl Into<String>) -> Self {
        self.payment = payment.into();
        self
    }

    /// Set the payment method
    pub fn with_payment_method(mut self, method: impl Into<String>) -> Self {
        self.payment_method = method.into();
        self
    }

    /// Get a field's value as it is printed on the invoice
    ///
    /// Values are returned verbatim; `flavors` uses its decimal form so a
    /// count of zero prints as `0`.
    pub fn value_of(&self, field: OrderField) -> String {
        match field {
            OrderField::Name => self.name.clone(),
            OrderField::Number => self.number.clone(),
            OrderField::CityOrNeighborhood => self.city_or_neighborhood.clone(),
            OrderField::Landmark => self.landmark.clone(),
            OrderField::Flavors => self.flavors.to_string(),
            OrderField::Payment => self.payment.clone(),
            OrderField::PaymentMethod => self.payment_method.clone(),
        }
    }
}

/// The seven fields of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderField {
    Name,
    Number,
    CityOrNeighborhood,
    Landmark,
    Flavors,
    Payment,
    PaymentMethod,
}

impl OrderField {
    /// All fields, in the order they appear on the invoice
    pub const ALL: [OrderField; 7] = [
        OrderField::Name,
        OrderField::Number,
        OrderField::CityOrNeighborhood,
        OrderField::Landmark,
        OrderField::Flavors,
        OrderField::Payment,
        OrderField::PaymentMethod,
    ];

    /// Fields printed in the customer data section
    pub const CUSTOMER: [OrderField; 4] = [
        OrderField::Name,
        OrderField::Number,
        OrderField::CityOrNeighborhood,
        OrderField::Landmark,
    ];

    /// Fields printed in the order summary section
    pub const SUMMARY: [OrderField; 3] = [
        OrderField::Flavors,
        OrderField::Payment,
        OrderField::PaymentMethod,
    ];

    /// Label printed in front of the value
    pub fn label(self) -> &'static str {
        match self {
            OrderField::Name => "Nome",
            OrderField::Number => "Número",
            OrderField::CityOrNeighborhood => "Cidade ou bairro",
            OrderField::Landmark => "Ponto de referência",
            OrderField::Flavors => "Total de Sabores",
            OrderField::Payment => "Total de Pagamento",
            OrderField::PaymentMethod => "Método de Pagamento",
        }
    }

    /// JSON key of the field
    pub fn key(self) -> &'static str {
        match self {
            OrderField::Name => "name",
            OrderField::Number => "number",
            OrderField::CityOrNeighborhood => "cityOrNeighborhood",
            OrderField::Landmark => "landmark",
            OrderField::Flavors => "flavors",
            OrderField::Payment => "payment",
            OrderField::PaymentMethod => "paymentMethod",
        }
    }

    /// Section of the invoice the field belongs to
    pub fn section(self) -> SectionRole {
        match self {
            OrderField::Name
            | OrderField::Number
            | OrderField::CityOrNeighborhood
            | OrderField::Landmark => SectionRole::CustomerData,
            OrderField::Flavors | OrderField::Payment | OrderField::PaymentMethod => {
                SectionRole::OrderSummary
            }
        }
    }
}

impl std::fmt::Display for OrderField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
