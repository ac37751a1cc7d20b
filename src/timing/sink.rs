use std::time::Duration;

/// Destination for per-request timing records.
///
/// The timing stage calls [`TimingSink::record`] once for every request whose
/// downstream handling completed without an error. Implementations must be
/// cheap to clone since each service clone carries its own handle.
///
/// Any `Fn(&str, Duration)` closure that is `Clone + Send + Sync` is a sink,
/// which keeps ad-hoc loggers and test recorders free of boilerplate.
pub trait TimingSink: Clone + Send + Sync + 'static {
    fn record(&self, path: &str, elapsed: Duration);
}

impl<F> TimingSink for F
where
    F: Fn(&str, Duration) + Clone + Send + Sync + 'static,
{
    fn record(&self, path: &str, elapsed: Duration) {
        self(path, elapsed)
    }
}

/// Default sink: one `info` event per request on the current `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TimingSink for TracingSink {
    fn record(&self, path: &str, elapsed: Duration) {
        tracing::info!(
            elapsed_us = elapsed.as_micros() as u64,
            "Timing called from  Path: {path} | At: {elapsed:?}"
        );
    }
}
