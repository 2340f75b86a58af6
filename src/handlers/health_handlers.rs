//! Health & readiness handlers.
//!
//! - GET /healthz  -> simple liveness ("ok")
//! - GET /readyz   -> readiness that checks store connectivity

use crate::services::booking_service::BookingService;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

/// `GET /healthz`
///
/// Very small liveness probe — always returns 200 OK with a plain JSON
/// body. This endpoint should be cheap and never perform I/O.
pub async fn healthz() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".into(),
            store: None,
        }),
    )
}

/// `GET /readyz`
///
/// Readiness probe running a lightweight `SELECT 1` against the store.
/// HTTP 200 when the check passes, HTTP 503 otherwise.
pub async fn readyz(State(service): State<BookingService>) -> impl IntoResponse {
    let store = match sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&*service.db)
        .await
    {
        Ok(1) => (true, None),
        Ok(other) => (false, Some(format!("unexpected result: {}", other))),
        Err(err) => (false, Some(format!("error: {}", err))),
    };

    let status = if store.0 {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let body = HealthResponse {
        status: if store.0 { "ok".into() } else { "error".into() },
        store: store.1,
    };
    (status, Json(body))
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    store: Option<String>,
}
