//! REST API handlers for the product catalog

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::{
    error::ApiError,
    helpers::parse_object_id,
    state::SharedState,
    store::document::{document_to_json, documents_to_json},
};

/// Creates routes for product-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/:id", get(get_product))
}

/// Endpoint: GET /products
/// Returns every product in stored order.
async fn list_products(State(state): State<SharedState>) -> Result<Json<Value>, ApiError> {
    let products = state.store.list_products().await?;
    Ok(Json(documents_to_json(products)))
}

/// Endpoint: GET /products/:id
/// Returns the product, or `null` when no document has that identifier.
async fn get_product(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Option<Value>>, ApiError> {
    let id = parse_object_id(&id)?;
    let product = state.store.find_product(id).await?;
    Ok(Json(product.map(document_to_json)))
}
