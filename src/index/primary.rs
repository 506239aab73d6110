//! Primary Index - ID → Post lookup table
//!
//! Plain HashMap, O(1) amortized get/put/delete. Carries no ordering.

use crate::storage::Post;
use std::collections::HashMap;

/// In-memory ID → post mapping
#[derive(Debug, Default)]
pub struct PrimaryIndex {
    posts: HashMap<String, Post>,
}

impl PrimaryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a post by ID
    pub fn get(&self, id: &str) -> Option<&Post> {
        self.posts.get(id)
    }

    /// Get a mutable reference to a post by ID
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Post> {
        self.posts.get_mut(id)
    }

    /// Insert or overwrite a post, keyed by its ID
    ///
    /// Returns the previous post stored under that ID, if any.
    pub fn put(&mut self, post: Post) -> Option<Post> {
        self.posts.insert(post.id.clone(), post)
    }

    /// Remove a post by ID
    pub fn delete(&mut self, id: &str) -> Option<Post> {
        self.posts.remove(id)
    }

    /// Check if an ID is present
    pub fn contains(&self, id: &str) -> bool {
        self.posts.contains_key(id)
    }

    /// Number of posts indexed
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Iterate over all posts, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Post> {
        self.posts.values()
    }
}
