//! HTTP request metrics.
//!
//! Every request through the router increments `http_requests_total`
//! (labelled with method, route template and status) and records its
//! latency in `http_request_duration_seconds`.

use std::time::Instant;

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};

pub async fn http_metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().to_string();
    // The route template ("/api/v1/cars/{id}") keeps the label set bounded;
    // unmatched requests fall back to the raw path
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let start = Instant::now();
    let response = next.run(request).await;

    let status = response.status().as_u16().to_string();
    metrics::counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status)
        .increment(1);
    metrics::histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(start.elapsed().as_secs_f64());

    response
}

// ── Tests ──────────────────────────────────────────────────────────────────
