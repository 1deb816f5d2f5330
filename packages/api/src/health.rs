// ABOUTME: Service liveness endpoints
// ABOUTME: Root banner and a health check that probes the database

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::db::DbState;

pub async fn root_info() -> Json<Value> {
    Json(json!({
        "message": "Todo API is running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Always answers 200; `status` degrades when the database stops responding
pub async fn health_check(State(db): State<DbState>) -> Json<Value> {
    let (status, database) = if db.is_healthy().await {
        ("healthy", "ok")
    } else {
        ("degraded", "unavailable")
    };

    Json(json!({
        "status": status,
        "database": database,
        "timestamp": chrono::Utc::now().timestamp(),
        "version": env!("CARGO_PKG_VERSION"),
        "service": "tickoff",
    }))
}
