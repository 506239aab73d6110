//! Admin Authentication
//!
//! HTTP Basic authentication for the `/admin` routes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::api::state::AppState;

/// Checks requests against a fixed set of users
///
/// The user map is never modified once the server starts.
#[derive(Debug, Clone, Default)]
pub struct BasicAuthenticator {
    /// Username → password
    users: HashMap<String, String>,
}

impl BasicAuthenticator {
    pub fn new(users: HashMap<String, String>) -> Self {
        Self { users }
    }

    /// Check if the request carries valid credentials
    pub fn authenticate(&self, headers: &HeaderMap) -> bool {
        let Some((username, password)) = basic_credentials(headers) else {
            return false;
        };

        if username.is_empty() {
            return false;
        }

        self.users
            .get(&username)
            .map(|expected| *expected == password)
            .unwrap_or(false)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

/// Extract `(username, password)` from an `Authorization: Basic` header
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = String::from_utf8(STANDARD.decode(encoded.trim()).ok()?).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some((username.to_string(), password.to_string()))
}

/// Middleware rejecting requests without valid admin credentials
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.authenticator.authenticate(request.headers()) {
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(request).await)
}
