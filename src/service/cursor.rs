//! Cursor Codec
//!
//! Converts store cursors to and from the opaque tokens handed to clients.
//!
//! A token is the URL-safe base64 (padded) encoding of a small JSON object
//! `{"id": ..., "created": ...}`. The empty cursor encodes to the empty
//! string and back.

use crate::storage::Cursor;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use thiserror::Error;

/// Longest ID accepted inside a cursor token
pub const MAX_CURSOR_ID_LENGTH: usize = 128;

/// Errors raised while decoding a cursor token
#[derive(Error, Debug)]
pub enum CursorError {
    #[error("Cursor is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Cursor is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cursor carries an invalid post ID: {0:?}")]
    InvalidId(String),
}

/// Encode a cursor as an opaque token
pub fn encode(cursor: &Cursor) -> Result<String, CursorError> {
    if cursor.is_empty() {
        return Ok(String::new());
    }

    let json = serde_json::to_vec(cursor)?;
    Ok(URL_SAFE.encode(json))
}

/// Decode a token produced by [`encode`]
///
/// The empty string decodes to the empty cursor; anything else must be a
/// well-formed token.
pub fn decode(token: &str) -> Result<Cursor, CursorError> {
    if token.is_empty() {
        return Ok(Cursor::empty());
    }

    let json = URL_SAFE.decode(token)?;
    let cursor: Cursor = serde_json::from_slice(&json)?;

    if !is_plausible_id(&cursor.id) {
        return Err(CursorError::InvalidId(cursor.id));
    }

    Ok(cursor)
}

/// Check that a post ID can travel inside a cursor token
///
/// Post IDs are UUIDs when generated by the service, and short tokens of
/// `[A-Za-z0-9_-]` when bulk-imported. The importer refuses anything else.
pub fn is_plausible_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_CURSOR_ID_LENGTH
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::OrderKey;
    use chrono::{TimeZone, Utc};

    fn sample() -> OrderKey {
        let created = Utc.timestamp_opt(1_513_261_233, 123_456_789).unwrap();
        OrderKey::new(created, "6f1d6a9e-2c3b-4f0e-9a55-0c5e1b7a9d21")
    }

    #[test]
    fn test_round_trip() {
        let key = sample();
        let token = encode(&key).unwrap();

        assert!(!token.is_empty());
        assert_eq!(decode(&token).unwrap(), key);
    }

    #[test]
    fn test_empty_cursor() {
        assert_eq!(encode(&Cursor::empty()).unwrap(), "");
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn test_token_is_url_safe() {
        let token = encode(&sample()).unwrap();
        assert!(token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b'='));
    }

    #[test]
    fn test_reject_bad_base64() {
        assert!(matches!(decode("not base64!"), Err(CursorError::Base64(_))));
    }

    #[test]
    fn test_reject_bad_json() {
        let token = URL_SAFE.encode(b"{\"id\": 42");
        assert!(matches!(decode(&token), Err(CursorError::Json(_))));
    }

    #[test]
    fn test_reject_implausible_id() {
        let too_long = "x".repeat(MAX_CURSOR_ID_LENGTH + 1);

        for id in ["", "has space", "semi;colon", too_long.as_str()] {
            let json = serde_json::json!({ "id": id, "created": "2017-12-14T06:20:33Z" });
            let token = URL_SAFE.encode(json.to_string());

            assert!(
                matches!(decode(&token), Err(CursorError::InvalidId(_))),
                "id {:?} should be rejected",
                id
            );
        }
    }
}
