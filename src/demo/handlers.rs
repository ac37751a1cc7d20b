use axum::{extract::Query, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound for `/slow` so a single request cannot park a task indefinitely.
pub const MAX_DELAY_MS: u64 = 10_000;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

#[derive(Serialize)]
struct SlowResponse {
    status: String,
    delayed_ms: u64,
}

#[derive(Deserialize)]
pub struct SlowQuery {
    #[serde(default)]
    pub ms: u64,
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "OK".to_string(),
    })
}

/// Sleep for `ms` milliseconds before answering
pub async fn slow(Query(query): Query<SlowQuery>) -> impl IntoResponse {
    let delayed_ms = query.ms.min(MAX_DELAY_MS);
    tokio::time::sleep(Duration::from_millis(delayed_ms)).await;

    Json(SlowResponse {
        status: "OK".to_string(),
        delayed_ms,
    })
}

/// Fails without producing a response. The host's panic layer turns this into a 500.
pub async fn unhandled_fault() -> &'static str {
    panic!("unhandled fault in /error handler")
}
