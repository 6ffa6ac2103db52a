use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A purchasable catalog entry. Prices travel as JSON numbers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: String,
}

impl Product {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: ProductId(id),
            name: name.into(),
            description: description.into(),
            price,
            image: image.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::{Product, ProductId};

    #[test]
    fn product_serializes_price_as_json_number() {
        let product = Product::new(7, "Desk Lamp", "LED lamp", Decimal::new(2450, 2), "https://x/lamp");

        let value = serde_json::to_value(&product).expect("serialize");

        assert_eq!(value["id"], json!(7));
        assert_eq!(value["price"], json!(24.5));
        assert_eq!(value["name"], json!("Desk Lamp"));
    }

    #[test]
    fn product_id_displays_bare_number() {
        assert_eq!(ProductId(42).to_string(), "42");
    }
}
