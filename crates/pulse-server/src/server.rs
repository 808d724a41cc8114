use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use pulse_engine::{EventIngestor, HealthReporter, MetricsAggregator, SessionStore};
use pulse_telemetry::MetricsRecorder;

use crate::config::ServerConfig;
use crate::handlers;
use crate::middleware::{security_headers, track_http};

/// Shared application state passed to Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub ingestor: Arc<EventIngestor>,
    pub reporter: Arc<HealthReporter>,
    pub metrics: Arc<MetricsAggregator>,
    pub recorder: Arc<MetricsRecorder>,
}

/// Build the Axum router with all routes and layers.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(handlers::homepage))
        .route("/api/track", post(handlers::track_event))
        .route("/api/health", get(handlers::health))
        .route("/api/metrics", get(handlers::metrics))
        .layer(axum::middleware::from_fn(security_headers))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            track_http,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Create and start the server. Returns a handle carrying the bound port.
pub async fn start(config: ServerConfig, state: AppState) -> Result<ServerHandle, std::io::Error> {
    let router = build_router(state, config.request_timeout);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        port = local_addr.port(),
        environment = %config.environment,
        "pulse server started"
    );

    let server = tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    Ok(ServerHandle {
        port: local_addr.port(),
        _server: server,
    })
}

/// Handle returned by `start()` — keeps the serve task alive.
pub struct ServerHandle {
    pub port: u16,
    _server: tokio::task::JoinHandle<()>,
}

/// Spawn the periodic eviction sweep.
///
/// The store never schedules its own eviction; whoever composes the
/// process owns this timer.
pub fn start_sweep_task(
    store: Arc<SessionStore>,
    max_age: Duration,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let removed = store.evict(max_age);
            if removed > 0 {
                tracing::info!(removed, "evicted idle sessions");
            }
        }
    })
}
