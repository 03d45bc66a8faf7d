//! Product route handlers.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use gearhouse_core::ProductId;

use crate::api::ApiError;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Proxy a product photo from the backend, preserving its content type.
///
/// Cards reference photos by product id; the browser never talks to the
/// backend directly.
///
/// # Errors
///
/// Returns `NotFound` when the backend has no photo for the id, or the
/// backend error otherwise.
#[instrument(skip(state))]
pub async fn photo(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response> {
    let product_id = ProductId::new(id);

    match state.catalog().product_photo(&product_id).await {
        Ok((bytes, content_type)) => {
            let content_type = content_type.unwrap_or_else(|| "image/jpeg".to_string());
            Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
        }
        Err(ApiError::Status { status: 404, .. }) => {
            Err(AppError::NotFound(format!("photo for {product_id}")))
        }
        Err(e) => {
            tracing::warn!("Failed to fetch photo for {product_id}: {e}");
            Err(AppError::Api(e))
        }
    }
}
