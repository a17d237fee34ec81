//! # HTTP Routes
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Router                                                                 │
//! │  ├── GET  /health            health::health                            │
//! │  ├── /api                    pets::routes()                            │
//! │  └── anything else           404 / 405 envelope                        │
//! │                                                                         │
//! │  Layers (outermost first): CORS (permissive) → Trace                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod health;
pub mod pets;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::state::AppState;

/// Builds the complete application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .nest("/api", pets::routes())
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(no_route)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn no_route() -> ApiError {
    ApiError::NoRoute
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
