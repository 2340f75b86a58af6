//! HTTP handlers: thin translation between typed requests/responses and
//! the booking service.

pub mod admin_handlers;
pub mod booking_handlers;
pub mod health_handlers;

use crate::errors::AppError;
use chrono::NaiveDate;

/// Parse a `YYYY-MM-DD` date field, rejecting anything else as a
/// validation failure before it reaches the service.
pub(crate) fn parse_iso_date(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("invalid {field}: expected YYYY-MM-DD")))
}
