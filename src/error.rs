//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::store::{document::DocumentError, StoreError};

/// Body returned for every locally detected error
#[derive(Debug, serde::Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Errors surfaced by route handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Path parameter is not a well-formed ObjectId.
    #[error("Invalid ObjectId format")]
    InvalidIdentifier,

    /// Cart update carried a missing, non-numeric or non-positive quantity.
    #[error("Invalid quantity")]
    InvalidQuantity,

    /// Cart update matched no document.
    #[error("Item not found")]
    NotFound,

    /// Cart payload could not be stored as a document.
    #[error("Invalid cart item: {0}")]
    InvalidDocument(#[from] DocumentError),

    /// The document store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidIdentifier
            | ApiError::InvalidQuantity
            | ApiError::InvalidDocument(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::DuplicateKey(_)) => StatusCode::CONFLICT,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Store(StoreError::DuplicateKey(detail)) => {
                tracing::warn!(%detail, "duplicate key on insert");
                "Duplicate key".to_string()
            }
            ApiError::Store(err) if status.is_server_error() => {
                tracing::error!(error = %err, "document store failure");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(MessageResponse { message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::InvalidIdentifier.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidQuantity.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Store(StoreError::DuplicateKey("x".into())).status(),
            StatusCode::CONFLICT
        );
    }

    #[tokio::test]
    async fn test_duplicate_key_detail_not_exposed() {
        let detail = "E11000 duplicate key error collection: FurniFlex.Cart index: _id_";
        let response = ApiError::Store(StoreError::DuplicateKey(detail.into())).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["message"], "Duplicate key");
    }

    #[test]
    fn test_messages_match_wire_format() {
        assert_eq!(
            ApiError::InvalidIdentifier.to_string(),
            "Invalid ObjectId format"
        );
        assert_eq!(ApiError::InvalidQuantity.to_string(), "Invalid quantity");
        assert_eq!(ApiError::NotFound.to_string(), "Item not found");
    }
}
