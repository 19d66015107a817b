pub mod applications;
pub mod auth;
pub mod bursaries;
pub mod documents;
pub mod extractors;
pub mod messages;
pub mod status;

use axum::{routing::get, Json, Router};
use tower_http::services::ServeDir;

use crate::config::CONFIG;
use crate::services::storage::UPLOADS_URL_PREFIX;
use crate::state::AppState;

/// Create the main API router
///
/// Routes needing a caller authenticate through the `AuthenticatedUser` and
/// `AdminUser` extractors; everything else is public.
pub fn create_router(state: AppState) -> Router {
    let uploads = ServeDir::new(state.documents.root().to_path_buf());

    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health_check))
        .route("/api/version", get(get_version))
        .nest("/auth", auth::auth_routes(state.clone()))
        .nest("/status", status::status_routes(state.clone()))
        .nest("/bursaries", bursaries::bursary_routes(state.clone()))
        .merge(applications::application_routes(state.clone()))
        .merge(documents::document_routes(state.clone()))
        .merge(messages::message_routes(state))
        .nest_service(UPLOADS_URL_PREFIX, uploads)
}

async fn root() -> &'static str {
    "Bursary API is running"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Version info endpoint
async fn get_version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "version": CONFIG.version,
        "backend": "rust"
    }))
}
