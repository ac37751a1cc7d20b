use axum::{routing::get, Router};
use tower_http::catch_panic::CatchPanicLayer;

use crate::timing::{TimingRouterExt, TimingSink};

use super::handlers::{health_check, slow, unhandled_fault};

/// Demo routes without any middleware attached.
pub fn routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/slow", get(slow))
        .route("/error", get(unhandled_fault))
}

/// Demo app logging through the default `tracing` sink.
pub fn create_router() -> Router {
    routes().with_timing().layer(CatchPanicLayer::new())
}

/// Demo app with timing registered inside the panic boundary, so a panicking
/// handler unwinds through the timing stage before becoming a 500.
pub fn create_router_with_sink<K: TimingSink>(sink: K) -> Router {
    routes()
        .with_timing_sink(sink)
        .layer(CatchPanicLayer::new())
}
