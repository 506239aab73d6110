//! Data Transfer Objects
//!
//! Request and response types for the API endpoints. Posts themselves go
//! over the wire as [`Post`](crate::storage::Post).

use serde::{Deserialize, Serialize};

use crate::storage::Post;

/// Query string of `GET /admin/posts`
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Cursor returned by a previous call, empty for the first page
    #[serde(default)]
    pub cursor: String,
    /// Page size; parsed by the handler so a bad value gets our error body
    #[serde(default)]
    pub n: Option<String>,
}

/// Response of `GET /admin/posts`
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    /// Posts on this page, most recent first
    pub posts: Vec<Post>,
    /// Cursor to the next page, absent on the last one
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub next: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub posts: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
