use std::time::Instant;

use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;

use pulse_telemetry::names;

use crate::server::AppState;

/// Basic security headers on every response.
pub async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        "x-content-type-options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert("x-frame-options", HeaderValue::from_static("DENY"));
    headers.insert(
        "referrer-policy",
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    response
}

/// Per-request counter and duration histogram, labeled by method, path,
/// and response status.
pub async fn track_http(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16().to_string();
    let labels = [
        ("method", method.as_str()),
        ("path", path.as_str()),
        ("status", status.as_str()),
    ];
    state.recorder.counter_inc(names::HTTP_REQUESTS_TOTAL, &labels, 1);
    state.recorder.histogram_observe(
        names::REQUEST_DURATION_SECONDS,
        &labels,
        start.elapsed().as_secs_f64(),
    );

    response
}
