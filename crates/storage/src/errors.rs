use domain::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored row could not be turned back into a record
    #[error("Corrupt row in {table}: {reason}")]
    Corrupt { table: &'static str, reason: String },
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for DomainError {
    fn from(error: StorageError) -> Self {
        DomainError::Storage(error.to_string())
    }
}
