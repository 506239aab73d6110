//! Health Routes
//!
//! - GET /health - Liveness and basic store status

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health
///
/// Returns "healthy" as long as both store indexes agree on their size.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let stats = state.service.store().stats();

    let status = if stats.posts == stats.ordered_entries {
        "healthy"
    } else {
        tracing::error!(
            posts = stats.posts,
            ordered_entries = stats.ordered_entries,
            "Store indexes out of sync"
        );
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        posts: stats.posts,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
