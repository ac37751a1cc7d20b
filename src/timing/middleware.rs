//! Request timing stage
//!
//! [`TimingLayer`] wraps any `tower::Service` over HTTP requests and reports how
//! long everything downstream of it took. The start instant is taken before
//! the inner service is called and the elapsed time after its future resolves,
//! so nested middleware is included in the measurement.
//!
//! Failures are not observed: an inner `Err`, a panic, or a dropped future
//! skips the record entirely and reaches the caller untouched.

use axum::http::Request;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;
use tower::{Layer, Service};

use super::sink::{TimingSink, TracingSink};

/// Layer that installs a [`TimingService`] around the wrapped service.
#[derive(Debug, Clone, Default)]
pub struct TimingLayer<K = TracingSink> {
    sink: K,
}

impl TimingLayer {
    /// Timing layer that logs through `tracing`.
    pub fn new() -> Self {
        Self { sink: TracingSink }
    }
}

impl<K: TimingSink> TimingLayer<K> {
    /// Timing layer that hands every record to `sink`.
    pub fn with_sink(sink: K) -> Self {
        Self { sink }
    }
}

impl<S, K: TimingSink> Layer<S> for TimingLayer<K> {
    type Service = TimingService<S, K>;

    fn layer(&self, inner: S) -> Self::Service {
        TimingService {
            inner,
            sink: self.sink.clone(),
        }
    }
}

/// Pipeline stage that times its inner service. Built by [`TimingLayer`].
#[derive(Debug, Clone)]
pub struct TimingService<S, K = TracingSink> {
    inner: S,
    sink: K,
}

type TimingFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send>>;

impl<S, K, B> Service<Request<B>> for TimingService<S, K>
where
    S: Service<Request<B>>,
    S::Future: Send + 'static,
    K: TimingSink,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = TimingFuture<S::Response, S::Error>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<B>) -> Self::Future {
        let path = request.uri().path().to_owned();
        let sink = self.sink.clone();

        let start = Instant::now();
        let downstream = self.inner.call(request);

        Box::pin(async move {
            let response = downstream.await?;
            sink.record(&path, start.elapsed());
            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tower::{service_fn, ServiceExt};

    type Records = Arc<Mutex<Vec<(String, Duration)>>>;

    fn recording_sink() -> (Records, impl TimingSink) {
        let records: Records = Arc::default();
        let sink = {
            let records = Arc::clone(&records);
            move |path: &str, elapsed: Duration| {
                records.lock().unwrap().push((path.to_string(), elapsed));
            }
        };
        (records, sink)
    }

    #[tokio::test]
    async fn test_records_path_without_query() {
        let (records, sink) = recording_sink();
        let service = TimingLayer::with_sink(sink)
            .layer(service_fn(|_req: Request<()>| async { Ok::<_, Infallible>("ok") }));

        let request = Request::builder()
            .uri("http://localhost/slow?ms=5")
            .body(())
            .unwrap();
        let response = service.oneshot(request).await.unwrap();

        assert_eq!(response, "ok");
        let records = records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, "/slow");
    }

    #[tokio::test]
    async fn test_inner_error_is_returned_unchanged() {
        let (records, sink) = recording_sink();
        let service = TimingLayer::with_sink(sink).layer(service_fn(|_req: Request<()>| async {
            Err::<(), _>("downstream failed")
        }));

        let request = Request::builder().uri("/broken").body(()).unwrap();
        let err = service.oneshot(request).await.unwrap_err();

        assert_eq!(err, "downstream failed");
        assert!(records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_start_is_taken_before_inner_call() {
        // Work done synchronously inside `call` must count toward the total.
        #[derive(Clone)]
        struct SlowCall;

        impl Service<Request<()>> for SlowCall {
            type Response = ();
            type Error = Infallible;
            type Future = std::future::Ready<Result<(), Infallible>>;

            fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Infallible>> {
                Poll::Ready(Ok(()))
            }

            fn call(&mut self, _req: Request<()>) -> Self::Future {
                std::thread::sleep(Duration::from_millis(20));
                std::future::ready(Ok(()))
            }
        }

        let (records, sink) = recording_sink();
        let service = TimingLayer::with_sink(sink).layer(SlowCall);

        let request = Request::builder().uri("/sync").body(()).unwrap();
        service.oneshot(request).await.unwrap();

        let records = records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].1 >= Duration::from_millis(20));
    }
}
