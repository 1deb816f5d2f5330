// ABOUTME: Data layer and persistence for Tickoff
// ABOUTME: SQLite pool construction, schema bootstrap and the shared storage error type

pub mod db;
pub mod schema;

use thiserror::Error;

pub use db::{connect, DatabaseConfig};
pub use schema::ensure_schema;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Todo not found")]
    NotFound,
}

pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    /// True for errors caused by the store itself rather than by the caller
    pub fn is_server_error(&self) -> bool {
        !matches!(self, StorageError::NotFound)
    }
}
