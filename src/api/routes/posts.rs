//! Post Routes
//!
//! - POST /post - Public endpoint for new posts
//! - GET /admin/posts/:id - Get a post
//! - GET /admin/posts - List posts, most recent first
//! - POST /admin/posts - Edit a post (partial update)

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ListParams, ListResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::storage::Post;

/// POST /post
///
/// Create a post. ID and creation time are assigned by the server.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Post>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let Json(post) = body?;
    let post = state.service.add(post)?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /admin/posts/:id
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Post>> {
    Ok(Json(state.service.get(&id)?))
}

/// GET /admin/posts?cursor=...&n=...
///
/// `n` defaults to the configured page size.
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<ListResponse>> {
    let n = match params.n.as_deref() {
        None | Some("") => 0,
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| ApiError::Validation("Invalid page size".to_string()))?,
    };

    let (posts, next) = state.service.list(&params.cursor, n)?;

    Ok(Json(ListResponse { posts, next }))
}

/// POST /admin/posts
///
/// Edit an existing post. Only the fields present in the body are changed.
pub async fn edit_post(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Post>, JsonRejection>,
) -> ApiResult<Json<Post>> {
    let Json(patch) = body?;

    Ok(Json(state.service.update(patch)?))
}
