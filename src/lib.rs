//! FurniFlex Backend Library
//!
//! HTTP endpoints for a product catalog and a shopping cart, each mapped onto
//! a single call against a document store.

// Domain modules
pub mod cart;
pub mod products;

// Infrastructure
pub mod config;
pub mod error;
pub mod helpers;
pub mod router;
pub mod state;
pub mod store;

use std::sync::Arc;

use config::{Config, StoreBackend};
use store::{DocumentStore, InMemoryStore, MongoStore, StoreError};

/// Opens the store selected by `config`.
pub async fn connect_store(config: &Config) -> Result<Arc<dyn DocumentStore>, StoreError> {
    match (config.backend, config.mongo_uri.as_deref()) {
        (StoreBackend::Mongo, Some(uri)) => {
            let store = MongoStore::connect(uri, &config.database).await?;
            Ok(Arc::new(store))
        }
        // Config only omits the URI for the in-memory backend.
        _ => {
            tracing::warn!("using in-memory store, data is lost on exit");
            Ok(Arc::new(InMemoryStore::new()))
        }
    }
}
