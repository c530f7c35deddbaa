//! Climate Observations API Server
//!
//! Read-only REST API over historical precipitation and temperature
//! observations for a set of weather stations.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub mod config;
pub mod error;
pub mod routes;

pub use crate::config::{ApiConfig, LogConfig};
pub use crate::error::ApiError;

use climate_storage::ClimateStore;

/// Application state shared across handlers
pub struct AppState {
    /// Read-only climate store
    pub store: ClimateStore,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(store: ClimateStore) -> Self {
        Self {
            store,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: ComponentHealth,
}

/// Individual component health
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::welcome::index))
        .route("/health", get(health_handler))
        .route(
            "/api/v1.0/precipitation",
            get(routes::precipitation::get_precipitation),
        )
        .route("/api/v1.0/stations", get(routes::stations::get_stations))
        .route("/api/v1.0/tobs", get(routes::tobs::get_tobs))
        .route("/api/v1.0/:start", get(routes::temperature::get_from))
        .route("/api/v1.0/:start/:end", get(routes::temperature::get_range))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let probe = match state.store.session().await {
        Ok(mut session) => session.ping().await,
        Err(e) => Err(e),
    };

    let (status, database) = match probe {
        Ok(()) => (
            StatusCode::OK,
            ComponentHealth {
                status: "ok".to_string(),
                error: None,
            },
        ),
        Err(e) => {
            warn!(error = %e, "Health probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ComponentHealth {
                    status: "unavailable".to_string(),
                    error: Some(e.to_string()),
                },
            )
        }
    };

    let overall = if status == StatusCode::OK {
        "healthy"
    } else {
        "degraded"
    };

    let response = HealthResponse {
        status: overall.to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        database,
    };

    (status, Json(response))
}

/// Initialize logging
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| -> Box<dyn std::error::Error> { e })
}

/// Run the server until Ctrl-C
pub async fn run_server(config: ApiConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = ClimateStore::open(&config.database.store_config()).await?;
    let state = Arc::new(AppState::new(store.clone()));
    let app = create_router(state);

    let addr = config.server.socket_addr();
    info!("Starting API server on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Unable to listen for Ctrl-C; running until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
