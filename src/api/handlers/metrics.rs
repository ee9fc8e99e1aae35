//! Prometheus scrape endpoint.
//!
//! `GET /metrics` renders whatever the global `metrics` recorder has
//! accumulated (HTTP counters from the middleware plus the booking
//! counters) in the Prometheus text format.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use metrics_exporter_prometheus::PrometheusHandle;

/// State carrying the handle of the installed Prometheus recorder.
#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

/// `GET /metrics` — unauthenticated, meant for a scraper on the local network.
pub async fn prometheus_metrics(State(state): State<MetricsState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        state.handle.render(),
    )
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::Response;
    use metrics_exporter_prometheus::PrometheusBuilder;

    #[tokio::test]
    async fn scrape_returns_prometheus_text_format() {
        // A local recorder, not the global one, keeps the test hermetic
        let recorder = PrometheusBuilder::new().build_recorder();
        let state = MetricsState {
            handle: recorder.handle(),
        };

        let resp: Response = prometheus_metrics(State(state)).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok()),
            Some("text/plain; version=0.0.4; charset=utf-8")
        );
    }
}
