// ABOUTME: Server bootstrap for the Tickoff todo API
// ABOUTME: Wires configuration, database, middleware layers and graceful shutdown together

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tokio::signal;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use tickoff_api::{create_router, DbState};

pub mod config;
pub mod middleware;

#[cfg(test)]
mod tests;

pub use config::{Config, ConfigError};

/// Initialise the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env(tickoff_config::RUST_LOG).unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(tickoff_config::DEFAULT_LOG_FILTER)
            }),
        )
        .with_target(false)
        .compact()
        .init();
}

/// Build the CORS layer for the configured development origins
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    // Credentials rule out wildcards, so methods and headers mirror the request
    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .expose_headers([HeaderName::from_static("x-total-count")])
}

/// Assemble the application router with its middleware stack
pub fn build_app(db: DbState, config: &Config) -> Router {
    create_router(db)
        .layer(middleware::create_panic_handler())
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer(&config.cors_origins))
}

/// Open the database, bind the listener and serve until a shutdown signal arrives
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let db = DbState::init(&config.database_config()).await?;
    let app = build_app(db.clone(), &config);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            warn!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
