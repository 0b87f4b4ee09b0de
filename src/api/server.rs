//! Roster API Server implementation
//!
//! HTTP REST API server using Axum. Accepts spreadsheet uploads and JSON
//! record submissions and keeps the imported employees.

use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use super::store::EmployeeStore;

/// Largest accepted request body (uploaded workbooks)
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// API Server configuration
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Required bearer token for `/api/v1/*`; open when `None`
    pub api_token: Option<String>,
    /// JSON file mirroring the employee store
    pub store_path: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            api_token: None,
            store_path: None,
        }
    }
}

/// Shared application state
pub struct AppState {
    pub version: String,
    pub api_token: Option<String>,
    pub store: EmployeeStore,
}

impl AppState {
    pub fn new(api_token: Option<String>, store: EmployeeStore) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            api_token: api_token.filter(|t| !t.trim().is_empty()),
            store,
        }
    }
}

/// Build the application router
pub fn build_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route(
            "/employees",
            get(handlers::list_employees).post(handlers::ingest_employees),
        )
        .route("/employees/upload", post(handlers::upload_employees))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            handlers::require_token,
        ));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/version", get(handlers::version))
        .nest("/api/v1", api)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Serve the router on an already-bound listener until `shutdown` resolves
pub async fn serve<F>(
    listener: tokio::net::TcpListener,
    state: Arc<AppState>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Run the API server
pub async fn run_api_server(config: ApiConfig) -> anyhow::Result<()> {
    let store = EmployeeStore::load(config.store_path.clone())?;
    let state = Arc::new(AppState::new(config.api_token.clone(), store));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Roster API Server starting on http://{}", addr);
    info!("   Endpoints: /api/v1/employees, /api/v1/employees/upload");
    info!("   Health: /health, Version: /version");
    if state.api_token.is_some() {
        info!("   Bearer token required for /api/v1/*");
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    serve(listener, state, shutdown_signal()).await?;

    info!("Roster API Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server...");
}
