//! Dashboard REST API
//!
//! JSON view models for a browser front end, built with Axum.
//!
//! # Endpoints
//!
//! ## Technologies
//! - `GET /api/v1/technologies` - Catalog in grid order
//! - `GET /api/v1/technologies/:name` - One technology
//! - `GET /api/v1/compare?left=&right=` - Side-by-side comparison
//!
//! ## Rankings
//! - `GET /api/v1/rankings` - Building types
//! - `GET /api/v1/rankings/:building` - Ordered recommendations
//! - `GET /api/v1/rankings/:building/:rank` - One entry (1-based)
//!
//! ## Panels (admin API backed)
//! - `GET /api/v1/carbon-summary` - Aggregated carbon figures
//! - `GET /api/v1/energy-usage` - Usage per source
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health` - Status
//!
//! # Example
//!
//! ```rust,ignore
//! use ecodash::api::{serve, AppState};
//! use ecodash::catalog::ReferenceStore;
//! use ecodash::config::ServerConfig;
//! use ecodash::metrics::{MetricsClient, MetricsClientConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = ReferenceStore::embedded()?;
//!     let client = Arc::new(MetricsClient::new(MetricsClientConfig::default())?);
//!     let config = ServerConfig::default();
//!
//!     serve(AppState::new(store, client, config.clone())).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{http::HeaderValue, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Technology routes
        .route("/technologies", get(routes::technologies::list_technologies))
        .route("/technologies/:name", get(routes::technologies::get_technology))
        .route("/compare", get(routes::technologies::compare_technologies))
        // Ranking routes
        .route("/rankings", get(routes::rankings::list_building_types))
        .route("/rankings/:building", get(routes::rankings::get_ranking))
        .route(
            "/rankings/:building/:rank",
            get(routes::rankings::get_ranking_entry),
        )
        // Panel routes
        .route("/carbon-summary", get(routes::panels::carbon_summary))
        .route("/energy-usage", get(routes::panels::energy_usage));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS for the configured origins; permissive when none are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(parsed))
            .allow_methods([axum::http::Method::GET])
    }
}

/// Start the API server
pub async fn serve(state: AppState) -> Result<(), ApiError> {
    let addr = state.config.addr();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Ecodash API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Ecodash API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
