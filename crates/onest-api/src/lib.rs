//! HTTP surface of the OneST portal.
//!
//! Thin axum routes over the UEN classifier and the weather client. Every
//! response uses the envelope in [`response`].

use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::routing::get;
use axum::Router;
use onest_core::ServerConfig;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

pub mod error;
mod middleware;
pub mod response;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(routes::health))
        .route("/uen/validate", get(routes::validate_uen))
        .route("/uen/formats", get(routes::uen_formats))
        .route("/weather/forecast", get(routes::weather_forecast))
        .route("/weather/locations", get(routes::weather_locations))
        .fallback(routes::not_found)
        .layer(axum::middleware::from_fn(middleware::request_tracing))
        .layer(cors)
        .with_state(state)
}

/// Bind `config.host:config.port` and serve until Ctrl+C or SIGTERM.
pub async fn serve(config: &ServerConfig, state: AppState) -> std::io::Result<()> {
    let address = config.bind_address();
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {}", listener.local_addr()?);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
