//! Post Service
//!
//! Business logic of the message board, sitting between the transport and
//! the store:
//!
//! - validates posts before they reach the store
//! - assigns IDs and creation times to new posts
//! - translates opaque cursor tokens to store cursors and back
//! - flags store errors caused by user input
//!
//! # Example
//!
//! ```rust
//! use postboard::service::PostService;
//! use postboard::storage::{MemoryStore, Post};
//! use std::sync::Arc;
//!
//! let service = PostService::new(Arc::new(MemoryStore::new()));
//!
//! let post = service.add(Post {
//!     author: "Jane".to_string(),
//!     email: "jane@example.com".to_string(),
//!     message: "Hello".to_string(),
//!     ..Default::default()
//! }).unwrap();
//!
//! let (posts, next) = service.list("", 0).unwrap();
//! assert_eq!(posts, vec![post]);
//! assert!(next.is_empty());
//! ```

pub mod cursor;
pub mod error;

pub use cursor::CursorError;
pub use error::{ServiceError, ServiceResult};

use crate::storage::{Post, Store};
use chrono::Utc;
use std::sync::Arc;

/// Page size used by [`PostService::list`] when `n` is 0
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Largest page size accepted by [`PostService::list`]
pub const MAX_PAGE_SIZE: usize = 100;

/// Maximum length of a post's author, in bytes
pub const MAX_AUTHOR_LENGTH: usize = 256;

/// Maximum length of a post's email, in bytes
pub const MAX_EMAIL_LENGTH: usize = 256;

/// Maximum length of a post's message, in bytes
pub const MAX_MESSAGE_LENGTH: usize = 2048;

/// Page size limits for listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    /// Used when the caller asks for 0 posts
    pub default_size: usize,
    /// Anything larger is rejected
    pub max_size: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_PAGE_SIZE,
            max_size: MAX_PAGE_SIZE,
        }
    }
}

/// The message board service, backed by a [`Store`]
#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn Store>,
    limits: PageLimits,
}

impl PostService {
    /// Create a service with default page limits
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self::with_limits(store, PageLimits::default())
    }

    /// Create a service with custom page limits
    pub fn with_limits(store: Arc<dyn Store>, limits: PageLimits) -> Self {
        Self { store, limits }
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    /// Get a post by ID
    pub fn get(&self, id: &str) -> ServiceResult<Post> {
        Ok(self.store.get(id)?)
    }

    /// Add a new post
    ///
    /// Any ID or creation time carried by `post` is replaced. Returns the
    /// post as stored.
    pub fn add(&self, mut post: Post) -> ServiceResult<Post> {
        validate_post(&post, true)?;

        post.id = uuid::Uuid::new_v4().to_string();
        post.created = Utc::now();

        self.store.add(post.clone())?;

        tracing::info!(id = %post.id, "Post added");
        Ok(post)
    }

    /// Update an existing post, identified by its ID
    ///
    /// Only the non-empty fields of `post` are applied.
    pub fn update(&self, post: Post) -> ServiceResult<Post> {
        validate_post(&post, false)?;

        let updated = self.store.update(post)?;

        tracing::info!(id = %updated.id, "Post updated");
        Ok(updated)
    }

    /// List the `n` most recent posts starting at the given cursor token
    ///
    /// An empty token returns the first page, and `n == 0` the default page
    /// size. The returned token is empty when there are no more posts.
    pub fn list(&self, token: &str, n: usize) -> ServiceResult<(Vec<Post>, String)> {
        if n > self.limits.max_size {
            return Err(ServiceError::InvalidPageSize {
                max: self.limits.max_size,
            });
        }

        let n = if n == 0 { self.limits.default_size } else { n };

        let start = cursor::decode(token).map_err(ServiceError::InvalidCursor)?;
        let (posts, next) = self.store.list(&start, n)?;
        let next = cursor::encode(&next).map_err(ServiceError::CursorEncoding)?;

        Ok((posts, next))
    }
}

fn validate_post(post: &Post, new_post: bool) -> ServiceResult<()> {
    if !new_post && post.id.is_empty() {
        return Err(ServiceError::InvalidId);
    }

    if (new_post && post.author.is_empty()) || post.author.len() > MAX_AUTHOR_LENGTH {
        return Err(ServiceError::InvalidAuthor);
    }

    // TODO: check the email is actually shaped like an address
    if (new_post && post.email.is_empty()) || post.email.len() > MAX_EMAIL_LENGTH {
        return Err(ServiceError::InvalidEmail);
    }

    if post.message.len() > MAX_MESSAGE_LENGTH {
        return Err(ServiceError::InvalidMessage);
    }

    Ok(())
}
