// ABOUTME: HTTP request handlers for todo operations
// ABOUTME: CRUD plus the bulk completion, clearing and stats endpoints

use axum::{
    extract::State,
    http::{HeaderName, HeaderValue},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::info;

use tickoff_todos::{Todo, TodoStats};

use crate::db::DbState;
use crate::error::{ApiResult, AppError};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::validation::{CreateTodoRequest, ListTodosQuery, UpdateTodoRequest};

/// Header carrying the number of todos that matched a list query before paging
pub const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

/// Confirmation body for operations that do not return a todo
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            count: None,
        }
    }

    fn with_count(message: impl Into<String>, count: i64) -> Self {
        Self {
            message: message.into(),
            count: Some(count),
        }
    }
}

/// List todos, newest first
pub async fn list_todos(
    State(db): State<DbState>,
    ApiQuery(query): ApiQuery<ListTodosQuery>,
) -> ApiResult<impl IntoResponse> {
    let filter = query.into_filter()?;
    info!(
        "Listing todos (skip: {}, limit: {}, completed: {:?}, search: {:?})",
        filter.skip, filter.limit, filter.completed, filter.search
    );

    let (todos, total) = db.todo_storage.list_todos_paginated(&filter).await?;
    let total = HeaderValue::from(total);

    Ok(([(TOTAL_COUNT_HEADER, total)], Json(todos)))
}

/// Create a new todo
pub async fn create_todo(
    State(db): State<DbState>,
    ApiJson(request): ApiJson<CreateTodoRequest>,
) -> ApiResult<Json<Todo>> {
    let input = request.validate()?;
    info!("Creating todo '{}'", input.title);

    let todo = db.todo_storage.create_todo(input).await?;
    Ok(Json(todo))
}

/// Get a single todo by ID
pub async fn get_todo(
    State(db): State<DbState>,
    ApiPath(todo_id): ApiPath<i64>,
) -> ApiResult<Json<Todo>> {
    info!("Getting todo: {}", todo_id);

    let todo = db.todo_storage.get_todo(todo_id).await?;
    Ok(Json(todo))
}

/// Apply a partial update to a todo
pub async fn update_todo(
    State(db): State<DbState>,
    ApiPath(todo_id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateTodoRequest>,
) -> ApiResult<Json<Todo>> {
    let input = request.validate()?;
    info!("Updating todo: {}", todo_id);

    let todo = db.todo_storage.update_todo(todo_id, input).await?;
    Ok(Json(todo))
}

/// Delete a todo
pub async fn delete_todo(
    State(db): State<DbState>,
    ApiPath(todo_id): ApiPath<i64>,
) -> ApiResult<Json<MessageResponse>> {
    info!("Deleting todo: {}", todo_id);

    db.todo_storage.delete_todo(todo_id).await?;
    Ok(Json(MessageResponse::new("Todo deleted")))
}

/// Mark every todo as completed
pub async fn mark_all_completed(
    State(db): State<DbState>,
) -> ApiResult<Json<MessageResponse>> {
    info!("Marking all todos as completed");

    let updated = db.todo_storage.mark_all_completed().await?;
    let count = i64::try_from(updated).map_err(AppError::internal)?;
    Ok(Json(MessageResponse::with_count(
        "All todos marked as completed",
        count,
    )))
}

/// Delete every completed todo
pub async fn clear_completed(State(db): State<DbState>) -> ApiResult<Json<MessageResponse>> {
    info!("Clearing completed todos");

    let count = db.todo_storage.clear_completed().await?;
    Ok(Json(MessageResponse::with_count(
        format!("Cleared {} completed todos", count),
        count,
    )))
}

/// Totals and completion rate across all todos
pub async fn get_stats(State(db): State<DbState>) -> ApiResult<Json<TodoStats>> {
    info!("Getting todo stats");

    let stats = db.todo_storage.stats().await?;
    Ok(Json(stats))
}
