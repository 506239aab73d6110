//! Postboard Storage
//!
//! This module provides the in-memory post store:
//!
//! - **types**: Core data structures (Post, OrderKey, Cursor)
//! - **store**: The `Store` trait and `MemoryStore`, which keeps both indexes
//!   consistent under one reader/writer lock
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust
//! use postboard::storage::{Cursor, MemoryStore, Post, Store};
//! use chrono::Utc;
//!
//! let store = MemoryStore::new();
//! store.add(Post::new("id-1", "Jane", "jane@example.com", "Hello", Utc::now())).unwrap();
//!
//! let (posts, next) = store.list(&Cursor::empty(), 10).unwrap();
//! assert_eq!(posts.len(), 1);
//! assert!(next.is_empty());
//! ```

pub mod error;
pub mod store;
pub mod types;

pub use error::{StoreError, StoreResult};
pub use store::{MemoryStore, Store};
pub use types::{Cursor, OrderKey, Post};
