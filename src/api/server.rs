//! Metrics API server
//!
//! ## Endpoints
//!
//! - `GET /api?start_date=YYYY-mm-dd&end_date=YYYY-mm-dd&metrics=<id>...`
//!   returns `{ index, series }` for the requested range (inclusive)
//! - `GET /health` - health check endpoint
//!
//! ```no_run
//! use siteview::api::{self, AppState};
//! use siteview::config::Settings;
//! use siteview::data::RandomStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let settings = Settings::default();
//!     let state = AppState::from_settings(Arc::new(RandomStore::new()), &settings);
//!     api::start_server(&settings.server.bind, state).await.unwrap();
//! }
//! ```

use crate::api::{ApiError, ApiParams};
use crate::config::{DateDefaults, Settings};
use crate::data::{series, MetricStore};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid bind address {addr}: {source}")]
    Addr {
        addr: String,
        source: std::net::AddrParseError,
    },
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MetricStore>,
    pub defaults: DateDefaults,
    pub max_range_days: i64,
}

impl AppState {
    pub fn from_settings(store: Arc<dyn MetricStore>, settings: &Settings) -> Self {
        Self {
            store,
            defaults: settings.defaults,
            max_range_days: settings.server.max_range_days,
        }
    }
}

/// Build the router with CORS and request tracing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api", get(api_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn start_server(addr: &str, state: AppState) -> Result<(), ServerError> {
    let addr: SocketAddr = addr.parse().map_err(|source| ServerError::Addr {
        addr: addr.to_string(),
        source,
    })?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    info!("Serving metrics API on http://{}/api", addr);
    serve(listener, state).await
}

/// Serve on an already bound listener until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), ServerError> {
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Metrics API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until the task is dropped.
        std::future::pending::<()>().await;
    }
}

async fn api_handler(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, ApiError> {
    let params = ApiParams::from_pairs(&pairs, &state.defaults, state.max_range_days)?;
    debug!(?params, "api request");

    let response = series::build_response(
        state.store.as_ref(),
        params.start_date,
        params.end_date,
        &params.metrics,
    )?;

    let body = serde_json::to_string_pretty(&response)?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    ))
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
