//! Error types for store operations.

use std::io;

use thiserror::Error;

/// Errors surfaced by `TaskStore` mutations and persistence.
///
/// Data-shape problems in the backing file (bad dates, junk numbers,
/// missing columns) are never errors; they are absorbed into defaults at
/// the load boundary so callers always observe a fully-populated schema.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An update targeted a name with no matching record. The table is
    /// left unchanged.
    #[error("no task named '{name}'")]
    NotFound { name: String },

    /// Reading or writing the backing file failed. A failed save never
    /// corrupts the in-memory table.
    #[error("backing file {path}: {source}")]
    Persistence {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
