// ABOUTME: Database connection management for the SQLite store
// ABOUTME: Builds the connection pool, applies pragmas and bootstraps the schema

use std::path::PathBuf;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::schema::ensure_schema;
use crate::StorageError;

/// Connection settings for the SQLite store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub max_connections: u32,
    pub busy_timeout: Duration,
    pub acquire_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(tickoff_config::DEFAULT_DATABASE_PATH),
            max_connections: tickoff_config::DEFAULT_DB_MAX_CONNECTIONS,
            busy_timeout: Duration::from_secs(30),
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

impl DatabaseConfig {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

/// Open the pool described by `config` and make sure the schema exists
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, StorageError> {
    // Ensure parent directory exists
    if let Some(parent) = config.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(StorageError::Io)?;
        }
    }

    debug!("Connecting to database: {}", config.path.display());

    let options = SqliteConnectOptions::new()
        .filename(&config.path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(config.busy_timeout);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .acquire_timeout(config.acquire_timeout)
        .connect_with(options)
        .await
        .map_err(StorageError::Sqlx)?;

    info!("Database connection established");

    ensure_schema(&pool).await?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = DatabaseConfig::default();
        assert_eq!(config.path, PathBuf::from("todos.db"));
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.busy_timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_connect_creates_database_and_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("todos.db");

        let pool = connect(&DatabaseConfig::with_path(&path)).await.unwrap();

        assert!(path.exists());
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM todos")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);

        pool.close().await;
    }

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("todos.db");

        let pool = connect(&DatabaseConfig::with_path(&path)).await.unwrap();
        sqlx::query(
            "INSERT INTO todos (title, completed, created_at, updated_at) VALUES ('keep', 0, 'a', 'a')",
        )
        .execute(&pool)
        .await
        .unwrap();

        // Running the bootstrap again must neither fail nor drop data
        ensure_schema(&pool).await.unwrap();
        pool.close().await;

        let pool = connect(&DatabaseConfig::with_path(&path)).await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM todos")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);

        let indexes: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'index' AND tbl_name = 'todos' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(indexes, vec!["ix_todos_id", "ix_todos_title"]);

        pool.close().await;
    }
}
