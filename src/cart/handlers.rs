//! REST API handlers for shopping cart operations
//!
//! Each endpoint validates its identifier and body, then makes exactly one
//! store call against the `Cart` collection.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::{get, put},
    Json, Router,
};
use serde_json::{Map, Value};

use super::{helpers::quantity_from_body, models::CartQuery};
use crate::{
    error::ApiError,
    helpers::parse_object_id,
    state::SharedState,
    store::{
        document::{documents_to_json, json_to_document},
        DeleteAck, InsertAck, UpdateAck,
    },
};

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/cart", get(list_cart_items).post(add_cart_item))
        .route("/cart/:id", put(update_quantity).delete(remove_cart_item))
}

/// Endpoint: POST /cart
/// Stores the submitted item as-is. No schema is enforced.
async fn add_cart_item(
    State(state): State<SharedState>,
    Json(item): Json<Map<String, Value>>,
) -> Result<Json<InsertAck>, ApiError> {
    let item = json_to_document(item)?;
    let ack = state.store.insert_cart_item(item).await?;
    Ok(Json(ack))
}

/// Endpoint: GET /cart?email=<addr>
/// Lists the items owned by exactly this address.
async fn list_cart_items(
    State(state): State<SharedState>,
    Query(query): Query<CartQuery>,
) -> Result<Json<Value>, ApiError> {
    let items = state.store.cart_items_for(&query.email).await?;
    Ok(Json(documents_to_json(items)))
}

/// Endpoint: DELETE /cart/:id
/// Deletes at most one item; a miss is acknowledged with `deletedCount: 0`.
async fn remove_cart_item(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteAck>, ApiError> {
    let id = parse_object_id(&id)?;
    let ack = state.store.delete_cart_item(id).await?;
    Ok(Json(ack))
}

/// Endpoint: PUT /cart/:id
/// Sets the quantity of one item, leaving its other fields untouched.
async fn update_quantity(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<UpdateAck>, ApiError> {
    let id = parse_object_id(&id)?;
    let quantity = quantity_from_body(body)?;

    let ack = state.store.set_cart_quantity(id, quantity.into()).await?;
    if ack.matched_count == 0 {
        return Err(ApiError::NotFound);
    }

    Ok(Json(ack))
}
