//! Shopping Cart Domain Module
//!
//! This module contains the cart endpoints, including:
//! - Request models (query string, quantity update body)
//! - Validation helpers (quantity checks)
//! - REST API handlers backed by the `Cart` collection

pub mod handlers;
pub mod helpers;
pub mod models;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use models::Quantity;
