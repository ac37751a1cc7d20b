use axum::Router;
use tower::layer::util::Stack;
use tower::ServiceBuilder;

use super::middleware::TimingLayer;
use super::sink::TimingSink;

/// Registration helpers for [`axum::Router`].
///
/// Like [`Router::layer`], the timing stage wraps only the routes that were
/// added before the call. Routes added afterwards are not timed, so the
/// position in the builder chain decides what gets measured.
pub trait TimingRouterExt {
    /// Time every request with the default `tracing` sink.
    fn with_timing(self) -> Self;

    /// Time every request and hand the result to `sink`.
    fn with_timing_sink<K: TimingSink>(self, sink: K) -> Self;
}

impl<S> TimingRouterExt for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_timing(self) -> Self {
        self.layer(TimingLayer::new())
    }

    fn with_timing_sink<K: TimingSink>(self, sink: K) -> Self {
        self.layer(TimingLayer::with_sink(sink))
    }
}

/// Registration helpers for [`tower::ServiceBuilder`].
pub trait TimingServiceBuilderExt<L> {
    /// Add a timing stage that logs through `tracing`.
    fn timing(self) -> ServiceBuilder<Stack<TimingLayer, L>>;

    /// Add a timing stage that hands every record to `sink`.
    fn timing_with_sink<K: TimingSink>(self, sink: K) -> ServiceBuilder<Stack<TimingLayer<K>, L>>;
}

impl<L> TimingServiceBuilderExt<L> for ServiceBuilder<L> {
    fn timing(self) -> ServiceBuilder<Stack<TimingLayer, L>> {
        self.layer(TimingLayer::new())
    }

    fn timing_with_sink<K: TimingSink>(self, sink: K) -> ServiceBuilder<Stack<TimingLayer<K>, L>> {
        self.layer(TimingLayer::with_sink(sink))
    }
}
