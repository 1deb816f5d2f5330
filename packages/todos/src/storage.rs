// ABOUTME: Todo storage layer using SQLite
// ABOUTME: Every operation runs in its own transaction that is rolled back if dropped

use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool, Transaction};
use tracing::debug;

use tickoff_storage::StorageError;

use crate::timestamp;
use crate::types::{Todo, TodoCreateInput, TodoFilter, TodoStats, TodoUpdateInput};

const TODO_COLUMNS: &str = "id, title, description, completed, created_at, updated_at";

/// Write transactions take the lock at BEGIN and wait on `busy_timeout`;
/// under WAL a read-then-write deferred transaction fails instead.
const BEGIN_WRITE: &str = "BEGIN IMMEDIATE";

pub struct TodoStorage {
    pool: SqlitePool,
}

impl TodoStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>, StorageError> {
        self.pool
            .begin_with(BEGIN_WRITE)
            .await
            .map_err(StorageError::Sqlx)
    }

    /// List one page of todos together with the number of todos matching the
    /// filter before pagination. Both reads share one transaction.
    pub async fn list_todos_paginated(
        &self,
        filter: &TodoFilter,
    ) -> Result<(Vec<Todo>, i64), StorageError> {
        debug!(
            "Fetching todos (skip: {}, limit: {}, completed: {:?}, search: {:?})",
            filter.skip, filter.limit, filter.completed, filter.search
        );

        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        let mut count_query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM todos");
        push_filters(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar::<i64>()
            .fetch_one(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;

        let mut query = QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM todos", TODO_COLUMNS));
        push_filters(&mut query, filter);
        // id breaks ties between todos created in the same microsecond
        query.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        query.push_bind(filter.limit);
        query.push(" OFFSET ");
        query.push_bind(filter.skip);

        let rows = query
            .build()
            .fetch_all(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;

        tx.commit().await.map_err(StorageError::Sqlx)?;

        let todos = rows
            .iter()
            .map(row_to_todo)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((todos, total))
    }

    /// Get a single todo by ID
    pub async fn get_todo(&self, todo_id: i64) -> Result<Todo, StorageError> {
        debug!("Fetching todo: {}", todo_id);

        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;
        let row = sqlx::query(&format!("SELECT {} FROM todos WHERE id = ?", TODO_COLUMNS))
            .bind(todo_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?
            .ok_or(StorageError::NotFound)?;
        tx.commit().await.map_err(StorageError::Sqlx)?;

        row_to_todo(&row)
    }

    /// Create a new todo. It starts out pending with both timestamps equal.
    pub async fn create_todo(&self, input: TodoCreateInput) -> Result<Todo, StorageError> {
        let now = timestamp::now();
        let stamp = timestamp::format(&now);

        debug!("Creating todo: {}", input.title);

        let mut tx = self.begin_write().await?;
        let result = sqlx::query(
            r#"
            INSERT INTO todos (title, description, completed, created_at, updated_at)
            VALUES (?, ?, 0, ?, ?)
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&stamp)
        .bind(&stamp)
        .execute(&mut *tx)
        .await
        .map_err(StorageError::Sqlx)?;
        tx.commit().await.map_err(StorageError::Sqlx)?;

        Ok(Todo {
            id: result.last_insert_rowid(),
            title: input.title,
            description: input.description,
            completed: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update. `updated_at` only moves when a stored value
    /// actually changes.
    pub async fn update_todo(
        &self,
        todo_id: i64,
        input: TodoUpdateInput,
    ) -> Result<Todo, StorageError> {
        debug!("Updating todo: {}", todo_id);

        if input.is_empty() {
            return self.get_todo(todo_id).await;
        }

        let mut tx = self.begin_write().await?;

        let row = sqlx::query(&format!("SELECT {} FROM todos WHERE id = ?", TODO_COLUMNS))
            .bind(todo_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?
            .ok_or(StorageError::NotFound)?;
        let existing = row_to_todo(&row)?;

        let mut merged = input.apply(&existing);
        if merged == existing {
            tx.commit().await.map_err(StorageError::Sqlx)?;
            return Ok(existing);
        }

        merged.updated_at = timestamp::now().max(existing.created_at);

        sqlx::query(
            r#"
            UPDATE todos
            SET title = ?, description = ?, completed = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&merged.title)
        .bind(&merged.description)
        .bind(merged.completed)
        .bind(timestamp::format(&merged.updated_at))
        .bind(todo_id)
        .execute(&mut *tx)
        .await
        .map_err(StorageError::Sqlx)?;

        tx.commit().await.map_err(StorageError::Sqlx)?;

        Ok(merged)
    }

    /// Delete a todo
    pub async fn delete_todo(&self, todo_id: i64) -> Result<(), StorageError> {
        debug!("Deleting todo: {}", todo_id);

        let mut tx = self.begin_write().await?;
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(todo_id)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        tx.commit().await.map_err(StorageError::Sqlx)?;
        Ok(())
    }

    /// Mark every todo as completed. `updated_at` is left as it was.
    pub async fn mark_all_completed(&self) -> Result<u64, StorageError> {
        debug!("Marking all todos as completed");

        let mut tx = self.begin_write().await?;
        let result = sqlx::query("UPDATE todos SET completed = 1")
            .execute(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;
        tx.commit().await.map_err(StorageError::Sqlx)?;

        Ok(result.rows_affected())
    }

    /// Delete every completed todo and return how many there were
    pub async fn clear_completed(&self) -> Result<i64, StorageError> {
        debug!("Clearing completed todos");

        let mut tx = self.begin_write().await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM todos WHERE completed = 1")
            .fetch_one(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;

        sqlx::query("DELETE FROM todos WHERE completed = 1")
            .execute(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;

        tx.commit().await.map_err(StorageError::Sqlx)?;

        Ok(count)
    }

    /// Aggregate counts over the whole table
    pub async fn stats(&self) -> Result<TodoStats, StorageError> {
        debug!("Computing todo stats");

        let (total, completed): (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*),
                COALESCE(SUM(CASE WHEN completed = 1 THEN 1 ELSE 0 END), 0)
            FROM todos
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        Ok(TodoStats::from_counts(total, completed))
    }
}

fn push_filters(query: &mut QueryBuilder<'_, Sqlite>, filter: &TodoFilter) {
    let mut separator = " WHERE ";

    if let Some(completed) = filter.completed {
        query.push(separator);
        query.push("completed = ");
        query.push_bind(completed);
        separator = " AND ";
    }

    // instr() is case-sensitive, unlike LIKE
    if let Some(term) = filter.search_term() {
        query.push(separator);
        query.push("instr(title, ");
        query.push_bind(term.to_string());
        query.push(") > 0");
    }
}

fn row_to_todo(row: &SqliteRow) -> Result<Todo, StorageError> {
    let created_at: String = row.try_get("created_at").map_err(StorageError::Sqlx)?;
    let updated_at: String = row.try_get("updated_at").map_err(StorageError::Sqlx)?;

    Ok(Todo {
        id: row.try_get("id").map_err(StorageError::Sqlx)?,
        title: row.try_get("title").map_err(StorageError::Sqlx)?,
        description: row.try_get("description").map_err(StorageError::Sqlx)?,
        completed: row.try_get("completed").map_err(StorageError::Sqlx)?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

fn parse_timestamp(value: &str) -> Result<chrono::DateTime<chrono::Utc>, StorageError> {
    timestamp::parse(value)
        .map_err(|e| StorageError::Database(format!("Invalid timestamp '{}': {}", value, e)))
}
