// ABOUTME: Database connection management and storage initialization
// ABOUTME: Provides shared access to the SQLite pool and the todo storage layer

use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::info;

use tickoff_storage::{connect, DatabaseConfig, StorageError};
use tickoff_todos::TodoStorage;

/// Shared database state for API handlers
#[derive(Clone)]
pub struct DbState {
    pub pool: SqlitePool,
    pub todo_storage: Arc<TodoStorage>,
}

impl DbState {
    /// Create new database state from an already-initialised SQLite pool
    pub fn new(pool: SqlitePool) -> Self {
        let todo_storage = Arc::new(TodoStorage::new(pool.clone()));
        Self { pool, todo_storage }
    }

    /// Open the database described by `config`, creating the schema if needed
    pub async fn init(config: &DatabaseConfig) -> Result<Self, StorageError> {
        let pool = connect(config).await?;
        info!("Database ready at {}", config.path.display());
        Ok(Self::new(pool))
    }

    /// Whether the database still answers a trivial query
    pub async fn is_healthy(&self) -> bool {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .is_ok()
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
