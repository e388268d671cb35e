//! HTTP access logging middleware.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Creates a tracing middleware for inbound HTTP requests.
///
/// Each request gets an `INFO` span (method, URI, version); the response is
/// logged with status and latency in milliseconds. 5xx responses, which
/// include upstream provider failures (502/504), are additionally reported at
/// `WARN`.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=POST uri=/shortlinks version=HTTP/1.1}: finished processing request latency=212 ms status=200
/// WARN request{method=POST uri=/shortlinks version=HTTP/1.1}: response failed classification=Status code: 504 Gateway Timeout latency=1003 ms
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::WARN)
                .latency_unit(LatencyUnit::Millis),
        )
}
