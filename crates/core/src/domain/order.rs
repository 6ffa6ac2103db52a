use std::fmt::{self, Write as _};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::product::ProductId;
use crate::pricing::{format_amount, line_subtotal, sum_lines, PricedLine};

const UNSPECIFIED: &str = "n/a";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Confirmed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
        }
    }
}

/// One cart line as the client submits it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub name: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
    pub quantity: u32,
}

/// One submitted line as the server received it.
///
/// The raw value is kept untouched. `name`, `price` and `quantity` are read from it
/// leniently for the order summary and are `None` when absent or unreadable, so no item
/// shape is ever rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderLine {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<Decimal>,
    pub raw: Value,
}

impl OrderLine {
    pub fn from_value(raw: &Value) -> Self {
        Self {
            name: raw.get("name").and_then(Value::as_str).map(str::to_string),
            price: parse_amount(raw.get("price")),
            quantity: parse_amount(raw.get("quantity")),
            raw: raw.clone(),
        }
    }

    /// Display label: the submitted name, or the raw value for lines without one.
    pub fn label(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.raw.to_string())
    }

    fn summary_line(&self) -> String {
        let quantity = self
            .quantity
            .map(|quantity| quantity.normalize().to_string())
            .unwrap_or_else(|| UNSPECIFIED.to_string());
        let price = self
            .price
            .map(|price| format!("${}", price.normalize()))
            .unwrap_or_else(|| UNSPECIFIED.to_string());
        let subtotal = match (self.price, self.quantity) {
            (Some(_), Some(_)) => self
                .subtotal()
                .map(|subtotal| format!("${}", format_amount(subtotal)))
                .unwrap_or_else(|| "overflow".to_string()),
            _ => UNSPECIFIED.to_string(),
        };

        format!("{} - Qty: {quantity} - Price: {price} - Subtotal: {subtotal}", self.label())
    }
}

impl PricedLine for OrderLine {
    fn subtotal(&self) -> Option<Decimal> {
        line_subtotal(self.price?, self.quantity?)
    }
}

/// Body of `POST /api/orders` as the server receives it.
///
/// Only the outer shape is enforced here: an object whose name and address fields are
/// strings when present. Presence, blankness and the `items` shape are business checks
/// performed by [`crate::intake::validate_order`] so failures surface in a fixed order.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub items: Option<Value>,
    #[serde(default)]
    pub total: Option<Value>,
}

/// Body of `POST /api/orders` as the client sends it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub items: Vec<OrderItem>,
    pub total: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub status: OrderStatus,
}

/// An accepted order. Lives only for the duration of the request that created it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub items: Vec<OrderLine>,
    pub total: Option<Decimal>,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
}

impl Order {
    pub fn confirmation(&self) -> OrderConfirmation {
        OrderConfirmation { order_id: self.id, status: self.status }
    }

    /// Sum of the line subtotals, or `None` when a line has no computable subtotal or
    /// the sum overflows.
    pub fn items_total(&self) -> Option<Decimal> {
        sum_lines(&self.items)
    }

    /// The client-supplied total, compared at cent precision against the item sum. An
    /// item sum that cannot be computed never matches.
    pub fn total_matches_items(&self) -> bool {
        match (self.total, self.items_total()) {
            (Some(total), Some(items_total)) => {
                format_amount(total) == format_amount(items_total)
            }
            _ => false,
        }
    }

    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "New Order Received:");
        let _ = writeln!(out, "======================");
        let _ = writeln!(out, "Order ID: {}", self.id);
        let _ = writeln!(out, "Customer: {} {}", self.first_name, self.last_name);
        let _ = writeln!(out, "Address: {}", self.address);
        let _ = writeln!(out, "Order Date: {}", self.order_date.format("%Y-%m-%d %H:%M:%S UTC"));
        let _ = writeln!(out);
        let _ = writeln!(out, "Items:");
        for (index, item) in self.items.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", index + 1, item.summary_line());
        }
        let _ = writeln!(out);
        match self.total {
            Some(total) => {
                let _ = writeln!(out, "Total Amount: ${}", total.normalize());
            }
            None => {
                let _ = writeln!(out, "Total Amount: unspecified");
            }
        }
        let _ = write!(out, "======================");
        out
    }
}

/// Reads a client-supplied amount leniently: JSON numbers and numeric strings are
/// accepted, anything else is treated as absent.
pub fn parse_amount(raw: Option<&Value>) -> Option<Decimal> {
    match raw? {
        Value::Number(number) => Decimal::from_str(&number.to_string())
            .or_else(|_| Decimal::from_scientific(&number.to_string()))
            .ok(),
        Value::String(text) => Decimal::from_str(text.trim()).ok(),
        _ => None,
    }
}
