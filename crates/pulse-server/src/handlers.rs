use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use pulse_core::InteractionEvent;
use pulse_engine::HealthSnapshot;
use pulse_telemetry::MetricsDump;

use crate::page;
use crate::server::AppState;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Demo page. Every render counts as a page view.
pub async fn homepage(State(state): State<AppState>) -> Html<&'static str> {
    state.metrics.record_page_view();
    Html(page::PAGE)
}

#[derive(Serialize)]
struct TrackAck {
    status: &'static str,
    timestamp: DateTime<Utc>,
    event_id: String,
}

#[derive(Serialize)]
struct TrackRejection {
    error: String,
}

/// Ingest one interaction event posted by the page.
pub async fn track_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(mut event): Json<InteractionEvent>,
) -> Response {
    // Request metadata fills gaps the client left.
    if event.user_agent.is_empty() {
        if let Some(agent) = header_str(&headers, header::USER_AGENT) {
            event.user_agent = agent.to_string();
        }
    }
    if event.page_url.is_empty() {
        if let Some(referer) = header_str(&headers, header::REFERER) {
            event.page_url = referer.to_string();
        }
    }

    let event_id = format!("{}_{}", event.session_id, event.event_type);
    match state.ingestor.submit(event) {
        Ok(()) => Json(TrackAck {
            status: "success",
            timestamp: Utc::now(),
            event_id,
        })
        .into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(TrackRejection {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: DateTime<Utc>,
    #[serde(flatten)]
    metrics: HealthSnapshot,
}

/// Point-in-time health snapshot. Best-effort across components.
pub async fn health(State(state): State<AppState>) -> Json<impl Serialize> {
    Json(HealthResponse {
        status: "healthy",
        version: VERSION,
        timestamp: Utc::now(),
        metrics: state.reporter.snapshot(),
    })
}

#[derive(Serialize)]
struct MetricsResponse {
    click_rate_per_minute: f64,
    #[serde(flatten)]
    metrics: MetricsDump,
}

/// Dump of every recorded counter and histogram summary.
pub async fn metrics(State(state): State<AppState>) -> Json<impl Serialize> {
    Json(MetricsResponse {
        click_rate_per_minute: state.metrics.click_rate(state.reporter.uptime()),
        metrics: state.recorder.dump(),
    })
}

fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<&str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
