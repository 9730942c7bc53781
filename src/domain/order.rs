use serde::{Deserialize, Serialize};

use super::ids::ResourceId;
use super::nullable::null_as_default;

/// A sale as reported by Kounta.
///
/// `total` is carried verbatim and is not kept consistent with the lines;
/// use [`Order::total_tax`] and [`Order::total_discount`] for aggregates.
/// Missing keys and explicit `null`s decode as the field's zero value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: ResourceId,
    #[serde(rename = "created_at", default, deserialize_with = "null_as_default")]
    pub sale_date: String,
    #[serde(rename = "updated_at", default, deserialize_with = "null_as_default")]
    pub update_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_variation: f64,
    #[serde(default)]
    pub customer: Option<OrderCustomer>,
    #[serde(default)]
    pub site_id: Option<i64>,
    #[serde(rename = "lines", default, deserialize_with = "null_as_default")]
    pub items: Vec<OrderLine>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub payments: Vec<OrderPayment>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderCustomer {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(default, deserialize_with = "null_as_default")]
    pub product: OrderLineProduct,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit_price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit_tax: f64,
    #[serde(rename = "line_total_ex_tax", default, deserialize_with = "null_as_default")]
    pub line_total: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub line_total_tax: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_variation: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub modifiers: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderLineProduct {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderPayment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub number: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub method: OrderPaymentMethod,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderPaymentMethod {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

impl Order {
    /// Sum of `line_total_tax` over every line, signs kept as-is.
    pub fn total_tax(&self) -> f64 {
        self.items.iter().map(|line| line.line_total_tax).sum()
    }

    /// Sum of the recovered discount of every line.
    pub fn total_discount(&self) -> f64 {
        self.items.iter().map(OrderLine::discount).sum()
    }
}

impl OrderLine {
    /// Amount knocked off the list price of this line.
    ///
    /// The list price is recovered by dividing the charged amount (ex tax plus
    /// tax) by `price_variation`. Ratios outside `(0, 1)` mean no discount
    /// was applied and yield `0.0`.
    pub fn discount(&self) -> f64 {
        if self.price_variation > 0.0 && self.price_variation < 1.0 {
            let charged = self.line_total + self.line_total_tax;
            return charged / self.price_variation - charged;
        }
        0.0
    }
}
