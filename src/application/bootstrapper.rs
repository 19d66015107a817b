//! Application bootstrapper
//!
//! Handles all initialization and setup for the bursary backend.

use std::net::SocketAddr;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::CONFIG;
use crate::db;
use crate::endpoints;
use crate::services::{DocumentStore, NotificationService};
use crate::state::AppState;

/// Bootstrap and run the application
pub async fn run() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may already be set
    let _ = dotenvy::dotenv();

    init_tracing();

    tracing::info!("Starting bursary backend v{}", CONFIG.version);

    let state = init_services().await?;
    let app = create_app(state, &CONFIG.server.allowed_origins);

    serve(app).await
}

/// Initialize tracing/logging
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("bursary={},tower_http=info", CONFIG.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_ansi(false))
        .init();
}

/// Initialize all application services
async fn init_services() -> anyhow::Result<AppState> {
    if CONFIG.auth.uses_dev_secret() {
        tracing::warn!("BURSARY_JWT_SECRET is not set, using the development signing secret");
    }

    let conn = db::connect().await?;
    tracing::info!("Database connection established");

    let notification = NotificationService::from_config(&CONFIG.mail);

    let documents = DocumentStore::new(CONFIG.storage.upload_dir.clone());
    documents.ensure_root().await?;
    tracing::info!("Storing uploads in {}", documents.root().display());

    Ok(AppState::new(conn, notification, documents))
}

/// Create the main application router with tracing and CORS layers
pub fn create_app(state: AppState, allowed_origins: &[String]) -> Router {
    endpoints::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Start the HTTP server
async fn serve(app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = CONFIG.server.bind_address().parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
