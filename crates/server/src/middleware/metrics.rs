//! Prometheus metrics collection middleware
//!
//! Records `http_requests_total` (counter) and `http_request_duration_seconds`
//! (histogram) for every request, with method/path/status labels.

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use healthbot_core::SectionTitle;
use std::time::Instant;

/// Label for the request path. Uses the route template so unknown paths
/// collapse into one label instead of creating a series per URL.
fn path_label(request: &Request) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string())
}

/// Middleware that records request count and duration metrics.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = path_label(&request);

    let start = Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed().as_secs_f64();

    let status = response.status().as_u16().to_string();

    metrics::counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status
    )
    .increment(1);

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path
    )
    .record(duration);

    response
}

/// Count the sections included in a chat reply
pub fn record_sections(sections: &[SectionTitle]) {
    for title in sections {
        metrics::counter!("chat_sections_emitted_total", "section" => title.as_str()).increment(1);
    }
}

/// Count a failed chat request
pub fn record_failure(endpoint: &'static str) {
    metrics::counter!("chat_failures_total", "endpoint" => endpoint).increment(1);
}
