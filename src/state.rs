//! Application State
//!
//! Holds the document store handle shared by every route handler.

use std::sync::Arc;

use crate::store::DocumentStore;

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state
pub struct AppState {
    /// The single long-lived store client, constructed once at startup.
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    /// Creates a new AppState around an already connected store
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Convenience constructor returning the state ready for the router
    pub fn shared(store: Arc<dyn DocumentStore>) -> SharedState {
        Arc::new(Self::new(store))
    }
}
