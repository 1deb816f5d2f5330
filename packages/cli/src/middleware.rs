//! Panic handling for the HTTP stack

use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;

use tickoff_api::AppError;

pub type PanicHandler = fn(Box<dyn std::any::Any + Send + 'static>) -> Response;

/// Create a panic handler that answers with the regular API error envelope
pub fn create_panic_handler() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(handle_panic as PanicHandler)
}

/// The panic message is logged by `AppError` and never sent to the client
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let panic_message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic occurred".to_string()
    };

    AppError::internal(anyhow::anyhow!("handler panicked: {}", panic_message)).into_response()
}
