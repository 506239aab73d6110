//! Postboard Index Structures
//!
//! The store keeps two indexes over the same set of posts:
//!
//! - **PrimaryIndex**: HashMap for O(1) ID → post lookup
//! - **OrderedIndex**: B-tree of (created, id) keys for listing
//!
//! # Architecture
//!
//! ```text
//! List(cursor, n)
//!        ↓
//! OrderedIndex: ceiling(cursor) → walk n keys → [(t9, id3), (t8, id1), ...]
//!        ↓
//! PrimaryIndex: id3 → Post, id1 → Post, ...
//! ```
//!
//! Both indexes are always mutated together under the store's write lock.

mod ordered;
mod primary;

pub use ordered::OrderedIndex;
pub use primary::PrimaryIndex;

/// Statistics about index usage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct IndexStats {
    /// Number of posts in the primary index
    pub posts: usize,
    /// Number of keys in the ordered index
    pub ordered_entries: usize,
}
