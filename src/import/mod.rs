//! Bulk Import
//!
//! Feeds pre-built posts into a store one at a time. An import has no retry
//! semantics: the first failure aborts it.

pub mod csv_import;

pub use csv_import::{load_from_csv, load_from_path, FIELDS_PER_RECORD};

use crate::storage::StoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while importing posts
#[derive(Error, Debug)]
pub enum ImportError {
    /// The input file couldn't be opened
    #[error("Failed to open {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV
    #[error("Error while decoding CSV file: {0}")]
    Csv(#[from] csv::Error),

    /// A record doesn't have the expected number of columns
    #[error("Record {record} has {found} fields, expected {}", FIELDS_PER_RECORD)]
    FieldCount { record: usize, found: usize },

    /// The post ID is empty, too long or has characters other than
    /// `[A-Za-z0-9_-]`
    #[error("Invalid post ID {id:?} in record {record}")]
    InvalidId { record: usize, id: String },

    /// The creation date isn't RFC 3339
    #[error("Error while parsing creation date of record {record}: {source}")]
    InvalidTimestamp {
        record: usize,
        #[source]
        source: chrono::ParseError,
    },

    /// The store refused the post
    #[error("Error while inserting post for record {record}: {source}")]
    Insert {
        record: usize,
        #[source]
        source: StoreError,
    },
}

/// Result type alias for import operations
pub type ImportResult<T> = Result<T, ImportError>;
