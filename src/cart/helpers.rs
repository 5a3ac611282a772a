//! Shopping Cart Validation Helpers

use axum::{extract::rejection::JsonRejection, Json};
use serde_json::Value;

use super::models::{Quantity, UpdateQuantityInput};
use crate::error::ApiError;

/// Extracts a valid quantity from a PUT /cart/:id body.
///
/// A body that is missing, not JSON, or JSON but not an object is treated
/// like a body without a `quantity` field.
pub fn quantity_from_body(body: Result<Json<Value>, JsonRejection>) -> Result<Quantity, ApiError> {
    let input = match body {
        Ok(Json(value)) => UpdateQuantityInput::from(value),
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "unreadable quantity body");
            UpdateQuantityInput::default()
        }
    };

    input
        .quantity
        .as_ref()
        .and_then(Quantity::from_json)
        .ok_or(ApiError::InvalidQuantity)
}
