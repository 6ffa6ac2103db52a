use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::domain::product::{Product, ProductId};
use crate::errors::CatalogError;

/// Fixed, read-only product list. Built once at startup and shared by reference.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if product.id.0 == 0 {
                return Err(CatalogError::ZeroProductId);
            }
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateProductId(product.id));
            }
            if product.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(product.id));
            }
            if product.price.is_sign_negative() {
                return Err(CatalogError::NegativePrice(product.id));
            }
        }

        Ok(Self { products })
    }

    /// The six-product demo catalog served by default.
    pub fn reference() -> Self {
        let products = vec![
            Product::new(
                1,
                "Wireless Headphones",
                "High-quality wireless headphones with noise cancellation",
                Decimal::new(9999, 2),
                "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=300&h=300&fit=crop",
            ),
            Product::new(
                2,
                "Smart Watch",
                "Feature-rich smartwatch with fitness tracking",
                Decimal::new(19999, 2),
                "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=300&h=300&fit=crop",
            ),
            Product::new(
                3,
                "Bluetooth Speaker",
                "Portable bluetooth speaker with excellent sound quality",
                Decimal::new(7999, 2),
                "https://images.unsplash.com/photo-1608043152269-423dbba4e7e1?w=300&h=300&fit=crop",
            ),
            Product::new(
                4,
                "Laptop Stand",
                "Ergonomic aluminum laptop stand for better posture",
                Decimal::new(4999, 2),
                "https://images.unsplash.com/photo-1527864550417-7fd91fc51a46?w=300&h=300&fit=crop",
            ),
            Product::new(
                5,
                "USB-C Hub",
                "Multi-port USB-C hub with HDMI and power delivery",
                Decimal::new(6999, 2),
                "https://images.unsplash.com/photo-1558618666-fcd25c85cd64?w=300&h=300&fit=crop",
            ),
            Product::new(
                6,
                "Wireless Mouse",
                "Precision wireless mouse with long battery life",
                Decimal::new(2999, 2),
                "https://images.unsplash.com/photo-1527814050087-3793815479db?w=300&h=300&fit=crop",
            ),
        ];

        Self { products }
    }

    pub fn list(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, product_id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == product_id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
