use crate::services::booking_service::BookingError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// A lightweight wrapper for request-level errors that keeps the message local.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    /// Create a new AppError with a specific status and message.
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
        }
    }

    /// Shortcut for a 400 Bad Request with field context.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg)
    }

    /// Shortcut for a 500 Internal Server Error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
            "status": self.status.as_u16()
        }));

        (self.status, body).into_response()
    }
}

/// Map service errors onto the HTTP taxonomy: missing entities to 404,
/// authorization and floor/status violations to 403, the uniqueness
/// conflict to 409. Store failures are logged and surfaced as a generic
/// internal error.
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        let status = match &err {
            BookingError::MachineNotFound(_)
            | BookingError::SlotNotFound(_)
            | BookingError::BookingNotFound(_) => StatusCode::NOT_FOUND,
            BookingError::MachineNotOnFloor(_)
            | BookingError::MachineUnavailable(_)
            | BookingError::NotBookingOwner(_) => StatusCode::FORBIDDEN,
            BookingError::SlotTaken { .. } => StatusCode::CONFLICT,
            BookingError::Sqlx(inner) => {
                tracing::error!("storage error: {}", inner);
                return AppError::internal("internal storage error");
            }
        };
        AppError::new(status, err.to_string())
    }
}
