//! Backend REST API clients.
//!
//! # Architecture
//!
//! - The backend is the source of truth - NO local sync, direct API calls
//! - In-memory caching via `moka` for idempotent catalog reads (5 minute TTL)
//! - Mutations (order creation, verification) are never cached
//!
//! # APIs
//!
//! ## Catalog
//! - Categories, product count, paginated and filtered product lists
//! - Product photos, proxied with their content type
//!
//! ## Payments
//! - Order creation ahead of the payment widget
//! - Server-side verification of the widget's completion callback
//!
//! # Example
//!
//! ```rust,ignore
//! use gearhouse_storefront::api::CatalogClient;
//!
//! let catalog = CatalogClient::new(&config.backend)?;
//!
//! let categories = catalog.categories().await?;
//! let first_page = catalog.product_page(1).await?;
//! ```

mod catalog;
mod payments;
pub mod types;

pub use catalog::CatalogClient;
pub use payments::PaymentClient;

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur when talking to the backend API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Backend returned a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Leading bytes of the response body, for diagnostics.
        body: String,
    },

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Backend answered 200 but reported failure in the body.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Decode a JSON response, mapping status and parse failures to `ApiError`.
///
/// Reads the body as text first so failures can log a snippet of what the
/// backend actually sent.
pub(crate) async fn decode_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(1);
        return Err(ApiError::RateLimited(retry_after));
    }

    let body = response.text().await?;

    if !status.is_success() {
        tracing::error!(
            status = %status,
            body = %body.chars().take(500).collect::<String>(),
            "backend returned non-success status"
        );
        return Err(ApiError::Status {
            status: status.as_u16(),
            body: body.chars().take(200).collect(),
        });
    }

    match serde_json::from_str(&body) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "failed to parse backend response"
            );
            Err(ApiError::Parse(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Status {
            status: 502,
            body: "upstream down".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 502: upstream down");
    }

    #[test]
    fn test_rate_limited_error() {
        let err = ApiError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }

    #[test]
    fn test_backend_error_display() {
        let err = ApiError::Backend("category list request reported failure".to_string());
        assert_eq!(
            err.to_string(),
            "Backend error: category list request reported failure"
        );
    }
}
