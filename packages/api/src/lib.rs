// ABOUTME: HTTP API layer for Tickoff providing REST endpoints and routing
// ABOUTME: Integration layer between axum and the todo storage package

use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub mod db;
pub mod error;
pub mod extract;
pub mod health;
pub mod todos_handlers;
pub mod validation;

pub use db::DbState;
pub use error::{ApiResult, AppError};

/// Creates the todos API router (nested under /todos)
pub fn create_todos_router() -> Router<DbState> {
    Router::new()
        .route("/", get(todos_handlers::list_todos))
        .route("/", post(todos_handlers::create_todo))
        // Literal segments are matched ahead of the id capture
        .route("/stats", get(todos_handlers::get_stats))
        .route(
            "/mark-all-completed",
            post(todos_handlers::mark_all_completed),
        )
        .route("/clear-completed", delete(todos_handlers::clear_completed))
        .route("/{todo_id}", get(todos_handlers::get_todo))
        .route("/{todo_id}", put(todos_handlers::update_todo))
        .route("/{todo_id}", delete(todos_handlers::delete_todo))
}

/// Creates the full application router with its state attached
pub fn create_router(db: DbState) -> Router {
    Router::new()
        .route("/", get(health::root_info))
        .route("/health", get(health::health_check))
        .nest("/todos", create_todos_router())
        .fallback(route_not_found)
        .with_state(db)
}

async fn route_not_found() -> AppError {
    AppError::not_found("Route not found")
}
