//! Postboard REST API
//!
//! HTTP API layer for the message board, built with Axum.
//!
//! # Endpoints
//!
//! ## Public
//! - `POST /post` - Create a post
//!
//! ## Admin (HTTP Basic auth)
//! - `GET /admin/posts` - List posts (`?cursor=...&n=...`)
//! - `GET /admin/posts/:id` - Get a post
//! - `POST /admin/posts` - Edit a post
//!
//! ## Health
//! - `GET /health` - Health status
//!
//! # Example
//!
//! ```rust,ignore
//! use postboard::api::{serve, ApiConfig, AppState, BasicAuthenticator};
//! use postboard::service::PostService;
//! use postboard::storage::MemoryStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = PostService::new(Arc::new(MemoryStore::new()));
//!     let auth = BasicAuthenticator::new([("admin".into(), "secret".into())].into());
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(service, auth);
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use auth::BasicAuthenticator;
pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let shared_state = Arc::new(state);

    let admin_routes = Router::new()
        .route(
            "/posts",
            get(routes::posts::list_posts).post(routes::posts::edit_post),
        )
        .route("/posts/:id", get(routes::posts::get_post))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&shared_state),
            auth::require_admin,
        ));

    Router::new()
        .route("/post", post(routes::posts::create_post))
        .nest("/admin", admin_routes)
        .route("/health", get(routes::health::health))
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen).await?;

    tracing::info!("Postboard API listening on {}", config.listen);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Postboard API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
