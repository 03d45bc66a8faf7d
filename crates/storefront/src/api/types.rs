//! Wire types for the backend REST API.
//!
//! Response shapes mirror what the backend actually sends; domain types
//! from `gearhouse-core` deserialize directly where the shapes line up.

use gearhouse_core::{Cart, Category, CategoryId, OrderId, Product, Rupees};
use serde::{Deserialize, Serialize};

// =============================================================================
// Catalog
// =============================================================================

/// Response of `GET /category/get-category`.
#[derive(Debug, Deserialize)]
pub struct CategoryListResponse {
    /// Backend-reported success flag.
    #[serde(default)]
    pub success: bool,
    /// The categories, under the backend's singular key.
    #[serde(default)]
    pub category: Vec<Category>,
}

/// Response of `GET /product/product-count`.
#[derive(Debug, Deserialize)]
pub struct ProductCountResponse {
    /// Total number of products in the unfiltered catalog.
    pub total: u64,
}

/// Response of `GET /product/product-list/{page}` and
/// `POST /product/product-filters`.
#[derive(Debug, Deserialize)]
pub struct ProductListResponse {
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Body of `POST /product/product-filters`.
///
/// `radio` carries the selected price bounds as a two-element array, or
/// stays empty when no price band is selected.
#[derive(Debug, Serialize)]
pub struct FilterRequest<'a> {
    pub checked: &'a [CategoryId],
    pub radio: Vec<i64>,
}

// =============================================================================
// Payments
// =============================================================================

/// Body of `POST /payment/create-order`.
#[derive(Debug, Serialize)]
pub struct CreateOrderRequest {
    /// Order total in whole rupees.
    pub amount: i64,
}

/// Response of `POST /payment/create-order`: the ephemeral order session
/// consumed by the payment widget. Never persisted beyond the pending
/// checkout record.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderSession {
    /// Gateway order id.
    pub id: OrderId,
    /// Amount the gateway will charge, echoed by the backend.
    pub amount: i64,
}

impl OrderSession {
    /// The order amount as money.
    #[must_use]
    pub const fn amount_rupees(&self) -> Rupees {
        Rupees::new(self.amount)
    }
}

/// Body of `POST /payment/verify-payment`: the provider-issued identifiers
/// from the widget callback plus the cart snapshot being purchased.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequest {
    pub order_id: OrderId,
    pub payment_id: String,
    pub signature: String,
    pub cart: Cart,
}

/// Response of `POST /payment/verify-payment`.
///
/// The success field name is backend-contract-defined; `ok` is primary
/// with `success` accepted as an alias, and an absent field means failure.
#[derive(Debug, Deserialize)]
pub struct VerificationResponse {
    #[serde(default, alias = "success")]
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_list_response_shape() {
        let json = r#"{
            "success": true,
            "category": [
                {"_id": "cat-1", "name": "Scooters"},
                {"_id": "cat-2", "name": "Motorcycles"}
            ]
        }"#;
        let response: CategoryListResponse = serde_json::from_str(json).expect("deserialize");
        assert!(response.success);
        assert_eq!(response.category.len(), 2);
        assert_eq!(response.category[0].name, "Scooters");
    }

    #[test]
    fn test_category_list_response_defaults() {
        let response: CategoryListResponse = serde_json::from_str("{}").expect("deserialize");
        assert!(!response.success);
        assert!(response.category.is_empty());
    }

    #[test]
    fn test_product_list_response_shape() {
        let json = r#"{"products": [
            {"_id": "p1", "name": "Roadster 250", "slug": "roadster-250", "price": 185000}
        ]}"#;
        let response: ProductListResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(response.products.len(), 1);
        assert_eq!(response.products[0].price, Some(Rupees::new(185_000)));
    }

    #[test]
    fn test_filter_request_wire_shape() {
        let categories = vec![CategoryId::new("cat-1"), CategoryId::new("cat-2")];
        let request = FilterRequest {
            checked: &categories,
            radio: vec![0, 49_999],
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"checked": ["cat-1", "cat-2"], "radio": [0, 49999]})
        );
    }

    #[test]
    fn test_filter_request_empty_radio() {
        let request = FilterRequest {
            checked: &[],
            radio: Vec::new(),
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json, serde_json::json!({"checked": [], "radio": []}));
    }

    #[test]
    fn test_verification_request_uses_camel_case() {
        let request = VerificationRequest {
            order_id: OrderId::new("order_123"),
            payment_id: "pay_456".to_string(),
            signature: "sig".to_string(),
            cart: Cart::new(),
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "orderId": "order_123",
                "paymentId": "pay_456",
                "signature": "sig",
                "cart": []
            })
        );
    }

    #[test]
    fn test_verification_response_field_variants() {
        let ok: VerificationResponse = serde_json::from_str(r#"{"ok": true}"#).expect("parse");
        assert!(ok.ok);

        let aliased: VerificationResponse =
            serde_json::from_str(r#"{"success": true}"#).expect("parse");
        assert!(aliased.ok);

        // Absent field is a failure, never a panic.
        let absent: VerificationResponse = serde_json::from_str("{}").expect("parse");
        assert!(!absent.ok);
    }

    #[test]
    fn test_order_session_shape() {
        let json = r#"{"id": "order_9", "amount": 2000}"#;
        let order: OrderSession = serde_json::from_str(json).expect("deserialize");
        assert_eq!(order.id.as_str(), "order_9");
        assert_eq!(order.amount_rupees(), Rupees::new(2000));
    }
}
