//! Core data types for the postboard store
//!
//! - `Post`: A single message-board post
//! - `OrderKey`: The (created, id) sort key driving list order
//! - `Cursor`: Resume position for paginated listing

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A message-board post
///
/// The default value of each field doubles as "unset" when a post is used as
/// a partial update (see [`Post::merge`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    /// Unique ID of the post
    #[serde(default)]
    pub id: String,
    /// Author name
    #[serde(default)]
    pub author: String,
    /// Author email
    #[serde(default)]
    pub email: String,
    /// Creation time
    #[serde(default)]
    pub created: DateTime<Utc>,
    /// Post contents
    #[serde(default)]
    pub message: String,
}

impl Post {
    /// Create a post with every field set
    pub fn new(
        id: impl Into<String>,
        author: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
        created: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            email: email.into(),
            created,
            message: message.into(),
        }
    }

    /// Sort key of this post in the ordered index
    pub fn order_key(&self) -> OrderKey {
        OrderKey::new(self.created, self.id.clone())
    }

    /// Copy every non-default field of `patch` into `self`
    ///
    /// The id is never touched. A field can't be reset to its default value
    /// this way, since default and "unset" are the same thing.
    pub fn merge(&mut self, patch: &Post) {
        if !patch.author.is_empty() {
            self.author.clone_from(&patch.author);
        }

        if !patch.email.is_empty() {
            self.email.clone_from(&patch.email);
        }

        if !patch.message.is_empty() {
            self.message.clone_from(&patch.message);
        }

        if patch.created != DateTime::<Utc>::default() {
            self.created = patch.created;
        }
    }
}

/// Composite sort key: most recent first, then by ascending ID
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderKey {
    pub created: DateTime<Utc>,
    pub id: String,
}

/// Resume position for [`Store::list`](crate::storage::Store::list)
///
/// The empty cursor means "start of list" when passed in, and "no more
/// posts" when handed back. Callers must not confuse the two.
pub type Cursor = OrderKey;

impl OrderKey {
    pub fn new(created: DateTime<Utc>, id: impl Into<String>) -> Self {
        Self {
            created,
            id: id.into(),
        }
    }

    /// The empty cursor
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if this is the empty cursor
    pub fn is_empty(&self) -> bool {
        self.id.is_empty() && self.created == DateTime::<Utc>::default()
    }
}

impl Ord for OrderKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .created
            .cmp(&self.created)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for OrderKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_order_most_recent_first() {
        let older = OrderKey::new(at(1_000), "a");
        let newer = OrderKey::new(at(2_000), "z");

        assert!(newer < older);
    }

    #[test]
    fn test_order_ties_by_id() {
        let a = OrderKey::new(at(1_000), "a");
        let b = OrderKey::new(at(1_000), "b");

        assert!(a < b);
        assert_eq!(a.cmp(&a.clone()), Ordering::Equal);
    }

    #[test]
    fn test_empty_cursor() {
        assert!(Cursor::empty().is_empty());
        assert!(!OrderKey::new(at(0), "id").is_empty());
        assert!(!OrderKey::new(at(5), "").is_empty());
    }

    #[test]
    fn test_merge_only_set_fields() {
        let mut post = Post::new("id", "Author1", "Email1", "Message1", at(1_000));

        post.merge(&Post {
            id: "other".to_string(),
            author: "Author2".to_string(),
            ..Default::default()
        });

        assert_eq!(post.id, "id");
        assert_eq!(post.author, "Author2");
        assert_eq!(post.email, "Email1");
        assert_eq!(post.message, "Message1");
        assert_eq!(post.created, at(1_000));
    }

    #[test]
    fn test_merge_created() {
        let mut post = Post::new("id", "Author", "Email", "Message", at(1_000));

        post.merge(&Post {
            created: at(5_000),
            ..Default::default()
        });

        assert_eq!(post.created, at(5_000));
        assert_eq!(post.order_key(), OrderKey::new(at(5_000), "id"));
    }

    #[test]
    fn test_post_equality_across_timezones() {
        let utc = at(1_700_000_000);
        let offset = chrono::FixedOffset::east_opt(3600)
            .unwrap()
            .from_utc_datetime(&utc.naive_utc());

        let a = Post::new("id", "a", "e", "m", utc);
        let b = Post::new("id", "a", "e", "m", offset.with_timezone(&Utc));

        assert_eq!(a, b);
    }
}
