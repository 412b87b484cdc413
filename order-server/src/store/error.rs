//! Store error taxonomy.
//!
//! Not-found is a valid outcome, not an error: point and number lookups
//! return `Ok(None)` and delete returns `Ok(false)`. Everything here is a
//! real failure that aborts the operation. A commit error means a multi-key
//! batch could not be confirmed complete; callers must treat it as
//! "unknown state, retry or reconcile", never as rolled-back-and-safe.

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Order number already exists: {0}")]
    DuplicateOrderNumber(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
