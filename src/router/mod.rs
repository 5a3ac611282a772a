//! Routing module for the FurniFlex backend

use crate::state::SharedState;
use axum::{body::Body, extract::Request, middleware::Next, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

/// Creates and configures the application router with all routes and middleware
pub fn create_app_router(state: SharedState) -> Router {
    // Middleware: Log requests
    let log_layer = axum::middleware::from_fn(|req: Request<Body>, next: Next| async move {
        let method = req.method().clone();
        let path = req.uri().path().to_owned();
        // Query strings carry customer emails: debug level only.
        tracing::info!(%method, %path, "request");
        tracing::debug!(query = req.uri().query().unwrap_or_default(), "request query");
        let res = next.run(req).await;
        if !res.status().is_success() {
            tracing::warn!(%method, %path, status = %res.status(), "request failed");
        }
        res
    });

    // Middleware: CORS (any origin)
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Routes
    Router::new()
        .route("/", get(health))
        .merge(crate::products::routes())
        .merge(crate::cart::routes())
        .layer(log_layer)
        .layer(cors_layer)
        .with_state(state)
}

/// Endpoint: GET /
async fn health() -> &'static str {
    "server is running"
}
