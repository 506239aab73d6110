//! Postboard Store
//!
//! The store orchestrates both indexes:
//! - Write path: Post → PrimaryIndex + OrderedIndex (one write guard)
//! - Read path: cursor → OrderedIndex walk → PrimaryIndex lookups (one read guard)
//!
//! Both indexes live in a single `StoreState` behind one `RwLock`, so a
//! reader never sees a post in one index but not the other.

use crate::index::{IndexStats, OrderedIndex, PrimaryIndex};
use crate::storage::error::{StoreError, StoreResult};
use crate::storage::types::{Cursor, Post};
use parking_lot::RwLock;

/// Common interface to all post stores
///
/// The store does no validation: it stores and returns what it is given.
/// Every call is synchronous and never blocks on I/O.
pub trait Store: Send + Sync {
    /// Get a post by ID. Fails with [`StoreError::NotFound`] if absent.
    fn get(&self, id: &str) -> StoreResult<Post>;

    /// Add a post. Fails with [`StoreError::Conflict`] if its ID is taken.
    fn add(&self, post: Post) -> StoreResult<()>;

    /// Merge the non-default fields of `patch` into the post with the same ID.
    ///
    /// Fails with [`StoreError::NotFound`] if there's no such post. Returns
    /// the post as stored after the merge.
    fn update(&self, patch: Post) -> StoreResult<Post>;

    /// List up to `n` posts starting at `cursor`
    ///
    /// Pass the empty cursor to start from the most recent post. The returned
    /// cursor points at the next unread post and can be passed back as is;
    /// it's empty once there's nothing left.
    fn list(&self, cursor: &Cursor, n: usize) -> StoreResult<(Vec<Post>, Cursor)>;

    /// Index cardinalities
    fn stats(&self) -> IndexStats;
}

/// Both indexes, always locked together
#[derive(Debug, Default)]
struct StoreState {
    posts: PrimaryIndex,
    by_date: OrderedIndex,
}

/// In-memory post store
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, id: &str) -> StoreResult<Post> {
        let state = self.state.read();

        state
            .posts
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn add(&self, post: Post) -> StoreResult<()> {
        let mut state = self.state.write();

        if state.posts.contains(&post.id) {
            return Err(StoreError::Conflict(post.id));
        }

        tracing::debug!(id = %post.id, created = %post.created, "Adding post");

        state.by_date.insert(post.order_key());
        state.posts.put(post);

        Ok(())
    }

    fn update(&self, patch: Post) -> StoreResult<Post> {
        let mut state = self.state.write();
        let StoreState { posts, by_date } = &mut *state;

        let post = posts
            .get_mut(&patch.id)
            .ok_or_else(|| StoreError::NotFound(patch.id.clone()))?;

        let old_key = post.order_key();
        post.merge(&patch);

        if post.created != old_key.created {
            tracing::debug!(
                id = %post.id,
                from = %old_key.created,
                to = %post.created,
                "Re-ordering updated post"
            );

            by_date.remove(&old_key);
            by_date.insert(post.order_key());
        }

        Ok(post.clone())
    }

    fn list(&self, cursor: &Cursor, n: usize) -> StoreResult<(Vec<Post>, Cursor)> {
        let state = self.state.read();

        // Resume AT the cursor: it already points past the last post returned
        let start = if cursor.is_empty() {
            state.by_date.first()
        } else {
            state.by_date.ceiling(cursor)
        };

        let Some(start) = start.cloned() else {
            return Ok((Vec::new(), Cursor::empty()));
        };

        let mut keys = state.by_date.iter_from(&start);
        let mut posts = Vec::with_capacity(n.min(state.posts.len()));

        for key in keys.by_ref().take(n) {
            if let Some(post) = state.posts.get(&key.id) {
                posts.push(post.clone());
            }
        }

        let next = keys.next().cloned().unwrap_or_else(Cursor::empty);

        Ok((posts, next))
    }

    fn stats(&self) -> IndexStats {
        let state = self.state.read();

        IndexStats {
            posts: state.posts.len(),
            ordered_entries: state.by_date.len(),
        }
    }
}
