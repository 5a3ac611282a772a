//! Document Store Module
//!
//! This module defines the seam between the HTTP layer and the external
//! document database:
//! - `DocumentStore` trait with one method per store call the routes make
//! - Acknowledgment types returned by write operations
//! - MongoDB backend and an in-memory backend for tests and local runs

pub mod document;
pub mod error;
pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde::Serialize;
use serde_json::Value;

pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
pub use mongo::MongoStore;

/// Database holding both collections unless configured otherwise
pub const DEFAULT_DATABASE: &str = "FurniFlex";
/// Collection holding the product catalog
pub const PRODUCTS_COLLECTION: &str = "Products";
/// Collection holding cart items
pub const CART_COLLECTION: &str = "Cart";

/// Owner field used to select cart items
pub const EMAIL_FIELD: &str = "email";
/// Quantity field rewritten by cart updates
pub const QUANTITY_FIELD: &str = "quantity";

/// Operations the HTTP layer performs against the document store.
///
/// Every method maps to exactly one store call. Implementations must be
/// thread-safe since a single instance is shared by all request handlers.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns every product document in stored order.
    async fn list_products(&self) -> Result<Vec<Document>>;

    /// Looks up a single product by identifier.
    async fn find_product(&self, id: ObjectId) -> Result<Option<Document>>;

    /// Inserts a cart item document unmodified.
    async fn insert_cart_item(&self, item: Document) -> Result<InsertAck>;

    /// Returns every cart item whose `email` field equals `email` exactly.
    async fn cart_items_for(&self, email: &str) -> Result<Vec<Document>>;

    /// Deletes at most one cart item by identifier.
    async fn delete_cart_item(&self, id: ObjectId) -> Result<DeleteAck>;

    /// Sets the `quantity` field of one cart item, leaving other fields alone.
    async fn set_cart_quantity(&self, id: ObjectId, quantity: Bson) -> Result<UpdateAck>;

    /// Releases the underlying connection. Called once on shutdown.
    async fn close(&self);
}

/// Acknowledgment of an `insertOne` call
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,

    /// Identifier assigned to (or supplied with) the new document
    pub inserted_id: Value,
}

/// Acknowledgment of a `deleteOne` call
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// Acknowledgment of an `updateOne` call
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<Value>,
}

impl InsertAck {
    pub fn new(inserted_id: Bson) -> Self {
        Self {
            acknowledged: true,
            inserted_id: document::bson_to_json(inserted_id),
        }
    }
}

impl DeleteAck {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

impl UpdateAck {
    /// Builds the acknowledgment for a non-upserting update.
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_count: 0,
            upserted_id: None,
        }
    }
}
