// ABOUTME: Explicit DDL for the todos table
// ABOUTME: Executed on every startup; each statement is idempotent

use sqlx::SqlitePool;
use tracing::debug;

use crate::StorageError;

/// `AUTOINCREMENT` keeps SQLite from handing out the id of a deleted row again.
pub const CREATE_TODOS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    completed BOOLEAN NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
"#;

pub const CREATE_TODOS_ID_INDEX: &str = "CREATE INDEX IF NOT EXISTS ix_todos_id ON todos (id)";

pub const CREATE_TODOS_TITLE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS ix_todos_title ON todos (title)";

/// Create the todos table and its indexes if they do not exist yet
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), StorageError> {
    let mut tx = pool.begin().await.map_err(StorageError::Sqlx)?;

    for statement in [
        CREATE_TODOS_TABLE,
        CREATE_TODOS_ID_INDEX,
        CREATE_TODOS_TITLE_INDEX,
    ] {
        sqlx::query(statement)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;
    }

    tx.commit().await.map_err(StorageError::Sqlx)?;

    debug!("Database schema ensured");
    Ok(())
}
