//! Catalog client for the backend REST API.
//!
//! Idempotent reads (categories, count, unfiltered pages) are cached with
//! `moka` (5-minute TTL). Filtered queries carry user-specific criteria
//! and are never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, instrument};

use gearhouse_core::{Category, FilterCriteria, Product, ProductId};

use crate::config::BackendApiConfig;

use super::types::{CategoryListResponse, FilterRequest, ProductCountResponse, ProductListResponse};
use super::{ApiError, decode_json};

/// Cache key for catalog reads.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    Categories,
    Count,
    Page(u32),
}

/// Cached value types.
#[derive(Debug, Clone)]
enum CacheValue {
    Categories(Vec<Category>),
    Count(u64),
    Page(Vec<Product>),
}

/// Client for the backend catalog endpoints.
///
/// Cheaply cloneable; all clones share the HTTP connection pool and cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &BackendApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.clone(),
                cache,
            }),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Get the category list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            debug!("cache hit for categories");
            return Ok(categories);
        }

        let response = self
            .inner
            .client
            .get(self.url("/category/get-category"))
            .send()
            .await?;

        let body: CategoryListResponse = decode_json(response).await?;
        if !body.success {
            return Err(ApiError::Backend(
                "category list request reported failure".to_string(),
            ));
        }

        self.inner
            .cache
            .insert(CacheKey::Categories, CacheValue::Categories(body.category.clone()))
            .await;

        Ok(body.category)
    }

    /// Get the total unfiltered product count.
    ///
    /// Used only to decide whether "load more" remains available.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn product_count(&self) -> Result<u64, ApiError> {
        if let Some(CacheValue::Count(total)) = self.inner.cache.get(&CacheKey::Count).await {
            debug!("cache hit for product count");
            return Ok(total);
        }

        let response = self
            .inner
            .client
            .get(self.url("/product/product-count"))
            .send()
            .await?;

        let body: ProductCountResponse = decode_json(response).await?;

        self.inner
            .cache
            .insert(CacheKey::Count, CacheValue::Count(body.total))
            .await;

        Ok(body.total)
    }

    /// Get one page of the unfiltered product list. Pages are 1-based.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(page = page))]
    pub async fn product_page(&self, page: u32) -> Result<Vec<Product>, ApiError> {
        if let Some(CacheValue::Page(products)) = self.inner.cache.get(&CacheKey::Page(page)).await
        {
            debug!("cache hit for product page");
            return Ok(products);
        }

        let response = self
            .inner
            .client
            .get(self.url(&format!("/product/product-list/{page}")))
            .send()
            .await?;

        let body: ProductListResponse = decode_json(response).await?;

        self.inner
            .cache
            .insert(CacheKey::Page(page), CacheValue::Page(body.products.clone()))
            .await;

        Ok(body.products)
    }

    /// Get products matching the filter criteria. Not cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, criteria))]
    pub async fn filtered_products(
        &self,
        criteria: &FilterCriteria,
    ) -> Result<Vec<Product>, ApiError> {
        let request = FilterRequest {
            checked: &criteria.categories,
            radio: criteria.price.map_or_else(Vec::new, |bounds| bounds.to_vec()),
        };

        let response = self
            .inner
            .client
            .post(self.url("/product/product-filters"))
            .json(&request)
            .send()
            .await?;

        let body: ProductListResponse = decode_json(response).await?;
        Ok(body.products)
    }

    /// Fetch a product photo for proxying: raw bytes plus the upstream
    /// content type. Not cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the photo is missing.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn product_photo(
        &self,
        product_id: &ProductId,
    ) -> Result<(Vec<u8>, Option<String>), ApiError> {
        let response = self
            .inner
            .client
            .get(self.url(&format!("/product/product-photo/{product_id}")))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: String::new(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);

        let bytes = response.bytes().await?;
        Ok((bytes.to_vec(), content_type))
    }
}
