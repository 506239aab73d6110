//! # Postboard
//!
//! A small message board: a concurrent in-memory post store with
//! cursor-based pagination, served over HTTP.
//!
//! ## Features
//!
//! - **Consistent indexes**: posts are indexed by id and by creation time
//!   under a single reader/writer lock
//! - **Stable pagination**: cursors resume listings exactly where the
//!   previous page stopped, even while posts are being added
//! - **Partial updates**: edits only touch the fields they set
//! - **Bulk import**: load posts from CSV at startup
//!
//! ## Modules
//!
//! - [`storage`]: Post types and the in-memory store
//! - [`index`]: Primary and ordered index structures
//! - [`service`]: Validation, ID assignment and cursor tokens
//! - [`import`]: CSV import
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use postboard::service::PostService;
//! use postboard::storage::{MemoryStore, Post};
//! use std::sync::Arc;
//!
//! let service = PostService::new(Arc::new(MemoryStore::new()));
//!
//! for i in 0..3 {
//!     service.add(Post {
//!         author: "Jane".to_string(),
//!         email: "jane@example.com".to_string(),
//!         message: format!("Post {}", i),
//!         ..Default::default()
//!     }).unwrap();
//! }
//!
//! // Two per page, most recent first
//! let (first, next) = service.list("", 2).unwrap();
//! assert_eq!(first.len(), 2);
//!
//! let (rest, next) = service.list(&next, 2).unwrap();
//! assert_eq!(rest.len(), 1);
//! assert!(next.is_empty());
//! ```

pub mod api;
pub mod config;
pub mod import;
pub mod index;
pub mod service;
pub mod storage;

// Re-export top-level types for convenience
pub use storage::{Cursor, MemoryStore, OrderKey, Post, Store, StoreError, StoreResult};

pub use index::IndexStats;

pub use service::{PageLimits, PostService, ServiceError, ServiceResult};

pub use import::{load_from_csv, load_from_path, ImportError};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState, BasicAuthenticator};

pub use config::{Config, ConfigError, LoggingConfig};
