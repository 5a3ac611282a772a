//! Product Catalog Module
//!
//! Read-only endpoints over the `Products` collection.

pub mod handlers;

pub use handlers::routes;
