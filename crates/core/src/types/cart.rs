//! The shopping cart.
//!
//! A cart is an ordered sequence of line items; insertion order is the
//! display order. Duplicate products are permitted - adding the same
//! product twice yields two lines. Persistence is the storefront's
//! concern; this module only holds the in-memory operations.

use serde::{Deserialize, Serialize};

use super::catalog::Product;
use super::id::ProductId;
use super::money::Rupees;

/// A single line in the cart: a snapshot of the product at add time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// Product id this line refers to.
    pub id: ProductId,
    /// Product name at add time.
    pub name: String,
    /// Product description at add time.
    #[serde(default)]
    pub description: String,
    /// Whole-rupee price; `None` contributes zero to the total.
    #[serde(default)]
    pub price: Option<Rupees>,
}

impl From<&Product> for CartItem {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
        }
    }
}

/// Ordered collection of selected products pending purchase.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The line items in display order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an item to the end of the cart. No dedup: the same product
    /// may appear on multiple lines.
    pub fn add(&mut self, item: CartItem) {
        self.items.push(item);
    }

    /// Remove every line whose product id matches, preserving the relative
    /// order of the rest. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: &ProductId) {
        self.items.retain(|item| &item.id != id);
    }

    /// Drop all lines.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of line prices. Lines without a price contribute zero. The raw
    /// numeric value is primary; format only when rendering.
    #[must_use]
    pub fn total(&self) -> Rupees {
        self.items
            .iter()
            .map(|item| item.price.unwrap_or(Rupees::ZERO))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: Option<i64>) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: price.map(Rupees::new),
        }
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Rupees::ZERO);
    }

    #[test]
    fn test_add_permits_duplicates() {
        let mut cart = Cart::new();
        cart.add(item("p1", Some(500)));
        cart.add(item("p1", Some(500)));
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total().amount(), 1000);
    }

    #[test]
    fn test_total_raw_and_formatted() {
        let mut cart = Cart::new();
        cart.add(item("p1", Some(500)));
        cart.add(item("p2", Some(1500)));
        assert_eq!(cart.total().amount(), 2000);
        assert_eq!(cart.total().display(), "₹2,000.00");
    }

    #[test]
    fn test_missing_price_contributes_zero() {
        let mut cart = Cart::new();
        cart.add(item("p1", Some(750)));
        cart.add(item("p2", None));
        assert_eq!(cart.total().amount(), 750);
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(item("p1", Some(100)));
        cart.remove(&ProductId::new("nope"));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_remove_single_match() {
        let mut cart = Cart::new();
        cart.add(item("p1", Some(100)));
        cart.add(item("p2", Some(200)));
        cart.remove(&ProductId::new("p1"));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].id.as_str(), "p2");
    }

    #[test]
    fn test_remove_strips_all_matches_preserving_order() {
        let mut cart = Cart::new();
        cart.add(item("p1", Some(100)));
        cart.add(item("p2", Some(200)));
        cart.add(item("p1", Some(100)));
        cart.add(item("p3", Some(300)));

        cart.remove(&ProductId::new("p1"));

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p3"]);
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = Cart::new();
        cart.add(item("p1", Some(100)));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Rupees::ZERO);
    }

    #[test]
    fn test_cart_item_snapshot_from_product() {
        let json = r#"{"_id": "p9", "name": "Tourer", "slug": "tourer", "price": 2500}"#;
        let product: super::super::catalog::Product =
            serde_json::from_str(json).expect("deserialize");
        let line = CartItem::from(&product);
        assert_eq!(line.id.as_str(), "p9");
        assert_eq!(line.price, Some(Rupees::new(2500)));
    }

    #[test]
    fn test_cart_serializes_as_plain_sequence() {
        let mut cart = Cart::new();
        cart.add(item("p1", Some(100)));
        let json = serde_json::to_value(&cart).expect("serialize");
        assert!(json.is_array());
    }
}
