//! Catalog entities owned by the backend API.
//!
//! The storefront treats products and categories as read-only. Wire names
//! follow the backend's document shape (`_id`, `category`), so these types
//! deserialize straight from API responses.

use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId};
use super::money::Rupees;

/// A product as served by the backend catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Backend document id.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Long description; truncated at the render boundary.
    #[serde(default)]
    pub description: String,
    /// Whole-rupee price. Absent on a handful of legacy documents.
    #[serde(default)]
    pub price: Option<Rupees>,
    /// Owning category id.
    #[serde(rename = "category", default)]
    pub category_id: Option<CategoryId>,
}

impl Product {
    /// Price for display and totals; a missing price counts as zero.
    #[must_use]
    pub fn price_or_zero(&self) -> Rupees {
        self.price.unwrap_or(Rupees::ZERO)
    }
}

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Backend document id.
    #[serde(rename = "_id")]
    pub id: CategoryId,
    /// Display name.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserializes_backend_shape() {
        let json = r#"{
            "_id": "665f1a2b",
            "name": "Roadster 250",
            "slug": "roadster-250",
            "description": "A commuter bike.",
            "price": 185000,
            "category": "cat-bikes"
        }"#;

        let product: Product = serde_json::from_str(json).expect("deserialize");
        assert_eq!(product.id.as_str(), "665f1a2b");
        assert_eq!(product.slug, "roadster-250");
        assert_eq!(product.price, Some(Rupees::new(185_000)));
        assert_eq!(
            product.category_id.as_ref().map(CategoryId::as_str),
            Some("cat-bikes")
        );
    }

    #[test]
    fn test_product_missing_price_counts_zero() {
        let json = r#"{"_id": "p1", "name": "Mystery", "slug": "mystery"}"#;
        let product: Product = serde_json::from_str(json).expect("deserialize");
        assert_eq!(product.price, None);
        assert_eq!(product.price_or_zero(), Rupees::ZERO);
        assert_eq!(product.description, "");
    }

    #[test]
    fn test_category_deserializes_backend_shape() {
        let json = r#"{"_id": "cat-1", "name": "Scooters"}"#;
        let category: Category = serde_json::from_str(json).expect("deserialize");
        assert_eq!(category.id.as_str(), "cat-1");
        assert_eq!(category.name, "Scooters");
    }
}
