//! Helper utilities shared by the route handlers
//!
//! Small, pure functions used by more than one domain module. Keeping them
//! separate from the handlers makes them easy to test without a store.

use mongodb::bson::oid::ObjectId;

use crate::error::ApiError;

/// Parses a path parameter as a store identifier.
///
/// Only the canonical 24-character hex form is accepted; anything else fails
/// with `ApiError::InvalidIdentifier` before the store is contacted.
pub fn parse_object_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::InvalidIdentifier)
}
