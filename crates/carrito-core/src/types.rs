//! # Domain Types
//!
//! Core domain types shared between the cart, the store, and the frontend.
//!
//! ## Identity
//! A product's `name` is its identity throughout the system: the catalog
//! has no stable numeric ids, so the cart aggregates by name and holds at
//! most one [`CartLine`] per unique name.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A catalog product, as delivered by the external catalog collaborator.
///
/// The core never fetches products; it only receives them when the caller
/// adds one to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Display name. Unique key within the catalog and the cart.
    pub name: String,

    /// Unit price in whole pesos.
    pub price: Money,

    /// Image URL for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Short description for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Catalog category for display and filtering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Product {
    /// Creates a product with just the pricing-relevant fields.
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        Product {
            name: name.into(),
            price,
            image: None,
            description: None,
            category: None,
        }
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One aggregated cart entry for a unique product name.
///
/// ## Invariants
/// - `quantity >= 1` — a line that would reach quantity 0 is removed instead
/// - At most one line per `name` exists in a cart at any time
///
/// ## Persisted Layout
/// Serialized as `{ name, unitPrice, quantity, image?, description?, category? }`;
/// absent optionals are omitted. The unit price is frozen at the moment the
/// product is first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    /// Product name, the line's identity.
    pub name: String,

    /// Unit price in whole pesos, frozen at add time.
    pub unit_price: Money,

    /// Units of this product in the cart. Always >= 1.
    #[serde(default = "default_quantity")]
    pub quantity: i64,

    /// Image URL, display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Description, display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Category, display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Legacy payloads may omit `quantity`; a line always means at least one unit.
fn default_quantity() -> i64 {
    1
}

impl CartLine {
    /// Creates a line for a product with quantity 1.
    pub fn from_product(product: &Product) -> Self {
        CartLine {
            name: product.name.clone(),
            unit_price: product.price,
            quantity: 1,
            image: product.image.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
        }
    }

    /// The line total: unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_from_product() {
        let product = Product {
            name: "Shirt".into(),
            price: Money::from_pesos(15_000),
            image: Some("shirt.png".into()),
            description: None,
            category: Some("ropa".into()),
        };
        let line = CartLine::from_product(&product);

        assert_eq!(line.name, "Shirt");
        assert_eq!(line.quantity, 1);
        assert_eq!(line.line_total().pesos(), 15_000);
    }

    #[test]
    fn test_line_serializes_with_camel_case_and_omits_absent_optionals() {
        let line = CartLine::from_product(&Product::new("Shirt", Money::from_pesos(15_000)));
        let json = serde_json::to_value(&line).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "name": "Shirt", "unitPrice": 15_000, "quantity": 1 })
        );
    }

    #[test]
    fn test_line_deserializes_without_quantity() {
        let line: CartLine =
            serde_json::from_value(serde_json::json!({ "name": "Shirt", "unitPrice": 15_000 }))
                .unwrap();
        assert_eq!(line.quantity, 1);
    }
}
