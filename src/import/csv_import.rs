//! CSV Import
//!
//! Bulk-loads posts into a store from a CSV file.
//! Records have exactly 5 columns: `id, name, email, text, created`, with
//! `created` in RFC 3339 format. IDs are limited to what a list cursor can
//! carry (see [`cursor::is_plausible_id`]).

use super::{ImportError, ImportResult};
use crate::service::cursor;
use crate::storage::{Post, Store};
use chrono::{DateTime, Utc};
use std::io::Read;
use std::path::Path;
use std::time::Instant;

/// Number of columns in a post record
pub const FIELDS_PER_RECORD: usize = 5;

/// Load posts from CSV data into the store, returning how many were inserted
///
/// Stops at the first bad record or failed insert; posts inserted before that
/// point stay in the store.
pub fn load_from_csv<R: Read>(store: &dyn Store, data: R, has_header: bool) -> ImportResult<usize> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .from_reader(data);

    let mut record = csv::StringRecord::new();
    let mut counter = 0;

    while reader.read_record(&mut record)? {
        let number = counter + 1;

        if record.len() != FIELDS_PER_RECORD {
            return Err(ImportError::FieldCount {
                record: number,
                found: record.len(),
            });
        }

        if !cursor::is_plausible_id(&record[0]) {
            return Err(ImportError::InvalidId {
                record: number,
                id: record[0].to_string(),
            });
        }

        let created = DateTime::parse_from_rfc3339(&record[4])
            .map_err(|source| ImportError::InvalidTimestamp {
                record: number,
                source,
            })?
            .with_timezone(&Utc);

        let post = Post {
            id: record[0].to_string(),
            author: record[1].to_string(),
            email: record[2].to_string(),
            message: record[3].to_string(),
            created,
        };

        store.add(post).map_err(|source| ImportError::Insert {
            record: number,
            source,
        })?;

        counter = number;
    }

    Ok(counter)
}

/// Load posts from a CSV file, logging a summary
pub fn load_from_path(store: &dyn Store, path: &Path, has_header: bool) -> ImportResult<usize> {
    let file = std::fs::File::open(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let start = Instant::now();
    let result = load_from_csv(store, std::io::BufReader::new(file), has_header);

    match &result {
        Ok(count) => tracing::info!(
            path = %path.display(),
            n_records = count,
            elapsed = ?start.elapsed(),
            "Loaded posts from CSV"
        ),
        Err(e) => tracing::error!(
            path = %path.display(),
            elapsed = ?start.elapsed(),
            error = %e,
            "Failed to load posts from CSV"
        ),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::PostService;
    use crate::storage::{Cursor, MemoryStore, StoreError};
    use std::io::Write;
    use std::sync::Arc;

    const HEADER: &str = "id,name,email,text,created\n";
    const RECORD: &str = "ID,John,john@domain.com,Hello world,2017-12-14T06:20:33-08:00\n";
    const RECORD_WRONG_N_FIELDS: &str = "Not,the,right,number\n";
    const RECORD_INCORRECT_TIME: &str =
        "ID,John,john@domain.com,Hello world,yesterday around 3 o clock\n";

    #[test]
    fn test_load_cases() {
        let cases: Vec<(&str, String, bool, Option<usize>)> = vec![
            ("Record with no header", RECORD.to_string(), false, Some(1)),
            ("Record with a header", format!("{}{}", HEADER, RECORD), true, Some(1)),
            ("Empty file with no header", String::new(), false, Some(0)),
            ("Empty file with a header", HEADER.to_string(), true, Some(0)),
            (
                "Wrong number of fields",
                format!("{}{}", HEADER, RECORD_WRONG_N_FIELDS),
                true,
                None,
            ),
            (
                "Incorrect time",
                format!("{}{}", HEADER, RECORD_INCORRECT_TIME),
                true,
                None,
            ),
        ];

        for (name, data, has_header, expected) in cases {
            let store = MemoryStore::new();
            let result = load_from_csv(&store, data.as_bytes(), has_header);

            match expected {
                Some(count) => {
                    assert_eq!(result.unwrap(), count, "{}", name);
                    assert_eq!(store.stats().posts, count, "{}", name);
                }
                None => assert!(result.is_err(), "{}: expected an error", name),
            }
        }
    }

    #[test]
    fn test_loaded_post_fields() {
        let store = MemoryStore::new();
        load_from_csv(&store, RECORD.as_bytes(), false).unwrap();

        let post = store.get("ID").unwrap();
        assert_eq!(post.author, "John");
        assert_eq!(post.email, "john@domain.com");
        assert_eq!(post.message, "Hello world");
        assert_eq!(
            post.created,
            DateTime::parse_from_rfc3339("2017-12-14T14:20:33Z").unwrap()
        );
    }

    #[test]
    fn test_quoted_fields() {
        let store = MemoryStore::new();
        let data = "a,\"Doe, Jane\",jane@x.com,\"Line one\nline two\",2018-01-01T00:00:00Z\n";

        assert_eq!(load_from_csv(&store, data.as_bytes(), false).unwrap(), 1);
        let post = store.get("a").unwrap();
        assert_eq!(post.author, "Doe, Jane");
        assert_eq!(post.message, "Line one\nline two");
    }

    #[test]
    fn test_errors_report_record_number() {
        let store = MemoryStore::new();
        let data = format!(
            "{}{}b,Jane,jane@x.com,Hi,not a date\n",
            HEADER, RECORD
        );

        let err = load_from_csv(&store, data.as_bytes(), true).unwrap_err();
        assert!(matches!(err, ImportError::InvalidTimestamp { record: 2, .. }));

        // The first record made it in before the failure
        assert_eq!(store.stats().posts, 1);
    }

    #[test]
    fn test_duplicate_id_stops_import() {
        let store = MemoryStore::new();
        let data = format!(
            "{}{}c,Jane,jane@x.com,Hi,2018-01-01T00:00:00Z\n",
            RECORD, RECORD
        );

        let err = load_from_csv(&store, data.as_bytes(), false).unwrap_err();
        match err {
            ImportError::Insert { record, source } => {
                assert_eq!(record, 2);
                assert_eq!(source, StoreError::Conflict("ID".to_string()));
            }
            other => panic!("unexpected error: {}", other),
        }

        // Nothing after the failing record was loaded
        let (posts, _) = store.list(&Cursor::empty(), 10).unwrap();
        assert_eq!(posts.len(), 1);
        assert!(store.get("c").is_err());
    }

    #[test]
    fn test_rejects_ids_cursors_cannot_carry() {
        let too_long = "x".repeat(cursor::MAX_CURSOR_ID_LENGTH + 1);

        for id in ["", "post.1", "jane@x.com", "has space", too_long.as_str()] {
            let store = MemoryStore::new();
            let data = format!("{}{},John,john@domain.com,Hi,2018-01-01T00:00:00Z\n", RECORD, id);

            let err = load_from_csv(&store, data.as_bytes(), false).unwrap_err();
            match err {
                ImportError::InvalidId { record, id: found } => {
                    assert_eq!(record, 2);
                    assert_eq!(found, id);
                }
                other => panic!("id {:?}: unexpected error: {}", id, other),
            }
            assert_eq!(store.stats().posts, 1);
        }
    }

    #[test]
    fn test_empty_id_at_epoch_rejected() {
        let store = MemoryStore::new();
        let data = ",John,john@domain.com,Hi,1970-01-01T00:00:00Z\n";

        let err = load_from_csv(&store, data.as_bytes(), false).unwrap_err();
        assert!(matches!(err, ImportError::InvalidId { record: 1, .. }));
        assert_eq!(store.stats().posts, 0);
    }

    #[test]
    fn test_imported_posts_paginate_with_tokens() {
        let store = Arc::new(MemoryStore::new());
        let data = format!(
            "{}post_1,A,a@x.com,one,2018-01-01T00:00:00Z\n\
             post-2,B,b@x.com,two,2018-01-02T00:00:00Z\n\
             POST3,C,c@x.com,three,2018-01-02T00:00:00Z\n",
            HEADER
        );
        assert_eq!(load_from_csv(store.as_ref(), data.as_bytes(), true).unwrap(), 3);

        let service = PostService::new(store);
        let mut ids = Vec::new();
        let mut token = String::new();
        loop {
            let (page, next) = service.list(&token, 1).unwrap();
            ids.extend(page.into_iter().map(|p| p.id));
            if next.is_empty() {
                break;
            }
            token = next;
        }

        assert_eq!(ids, vec!["POST3", "post-2", "post_1"]);
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}{}", HEADER, RECORD).unwrap();
        file.flush().unwrap();

        let store = MemoryStore::new();
        assert_eq!(load_from_path(&store, file.path(), true).unwrap(), 1);
    }

    #[test]
    fn test_load_from_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::new();

        let err = load_from_path(&store, &dir.path().join("missing.csv"), true).unwrap_err();
        assert!(matches!(err, ImportError::Io { .. }));
    }
}
