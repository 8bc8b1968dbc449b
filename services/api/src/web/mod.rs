pub mod protocol;
pub mod rest;
pub mod state;

pub use rest::{generate_course_handler, generate_pdf_handler, health_handler, ApiDoc};
pub use state::AppState;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Builds the complete router: API routes, the OpenAPI document, CORS and tracing.
pub fn router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(rest::index_handler))
        .route("/health", get(health_handler))
        .route("/api/generate-course", post(generate_course_handler))
        .route("/api/generate-pdf", post(generate_pdf_handler))
        .route("/api-docs/openapi.json", get(rest::openapi_handler))
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
