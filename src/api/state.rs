//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::api::auth::BasicAuthenticator;
use crate::service::PostService;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Post service (validation + store)
    pub service: PostService,
    /// Credentials for the admin routes
    pub authenticator: Arc<BasicAuthenticator>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(service: PostService, authenticator: BasicAuthenticator) -> Self {
        Self {
            service,
            authenticator: Arc::new(authenticator),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Address to bind to
    pub listen: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:1412".to_string(),
        }
    }
}

impl ApiConfig {
    pub fn new(listen: impl Into<String>) -> Self {
        Self {
            listen: listen.into(),
        }
    }
}

impl From<&crate::config::ServerConfig> for ApiConfig {
    fn from(config: &crate::config::ServerConfig) -> Self {
        Self::new(config.listen.clone())
    }
}
