//! Cart item and snapshot types.

use heartwood_core::{LineItemId, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product entry in a cart.
///
/// Invariants: `quantity >= 1`, and at most one `CartItem` per product id
/// within a cart. A requested quantity below 1 is interpreted as removal by
/// the facade, so a stored item never carries it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Stable product identifier.
    pub id: ProductId,
    /// Server-assigned line-item id. Present only for authenticated carts;
    /// owned by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_id: Option<LineItemId>,
    pub name: String,
    /// Unit price. Non-negative.
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    pub quantity: u32,
    /// Server-computed line subtotal, when the backend reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<Decimal>,
}

impl CartItem {
    /// `price * quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// The cart as seen by the UI: items plus the derived total.
///
/// The total is recomputed from items on every guest mutation and never
/// persisted on its own. For authenticated carts the server's reported total
/// is adopted verbatim after each round trip.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub items: Vec<CartItem>,
    pub total: Decimal,
}

impl CartSnapshot {
    /// An empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Input for an add-to-cart operation.
#[derive(Debug, Clone)]
pub struct NewCartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub image: String,
    /// Defaults to 1 when not given.
    pub quantity: Option<u32>,
}

impl NewCartItem {
    /// Create an add request for a single unit of a product.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            image: String::new(),
            quantity: None,
        }
    }

    /// Set an explicit quantity.
    #[must_use]
    pub const fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Set the product image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

/// Sum of `price * quantity` over all items.
#[must_use]
pub fn cart_total(items: &[CartItem]) -> Decimal {
    items.iter().map(CartItem::line_total).sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn item(id: i64, price: Decimal, quantity: u32) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            line_id: None,
            name: format!("product-{id}"),
            price,
            image: String::new(),
            quantity,
            subtotal: None,
        }
    }

    #[test]
    fn test_cart_total_sums_line_totals() {
        let items = vec![item(1, d("2500"), 2), item(2, d("19.99"), 3)];
        assert_eq!(cart_total(&items), d("5059.97"));
    }

    #[test]
    fn test_cart_total_empty() {
        assert_eq!(cart_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_cart_item_json_roundtrip() {
        let original = CartItem {
            id: ProductId::new(7),
            line_id: Some(heartwood_core::LineItemId::new(41)),
            name: "Chair".to_string(),
            price: d("2500"),
            image: "/media/chair.webp".to_string(),
            quantity: 2,
            subtotal: Some(d("5000")),
        };
        let json = serde_json::to_string(&original).unwrap();
        let parsed: CartItem = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_cart_item_optional_fields_default() {
        // Guest carts persisted before line ids existed parse fine
        let parsed: CartItem = serde_json::from_str(
            r#"{"id": 3, "name": "Lamp", "price": "120.50", "quantity": 1}"#,
        )
        .unwrap();
        assert_eq!(parsed.line_id, None);
        assert_eq!(parsed.image, "");
        assert_eq!(parsed.subtotal, None);
        assert_eq!(parsed.price, d("120.50"));
    }
}
