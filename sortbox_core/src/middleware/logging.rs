//! Request tracing for every route.

use axum::{body::Body, Router};
use http::{Request, Response};
use std::time::Duration;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::trace::TraceLayer;
use tracing::{info_span, Span};

/// Wrap `router` in a trace layer that opens one span per request and logs
/// the outcome at a level matching the status class.
pub fn with_request_tracing<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|request: &Request<Body>| {
                info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            })
            .on_request(|request: &Request<Body>, _span: &Span| {
                tracing::debug!("{} {}", request.method(), request.uri().path());
            })
            .on_response(log_response)
            .on_failure(
                |error: ServerErrorsFailureClass, latency: Duration, _span: &Span| {
                    tracing::error!(
                        latency_ms = latency.as_millis() as u64,
                        error = ?error,
                        "request failed"
                    );
                },
            ),
    )
}

fn log_response(response: &Response<Body>, latency: Duration, _span: &Span) {
    let status = response.status().as_u16();
    let latency_ms = latency.as_millis() as u64;

    if response.status().is_client_error() {
        tracing::warn!(status, latency_ms, "client error response");
    } else if response.status().is_server_error() {
        tracing::error!(status, latency_ms, "server error response");
    } else {
        tracing::info!(status, latency_ms, "request completed");
    }
}
