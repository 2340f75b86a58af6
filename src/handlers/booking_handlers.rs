//! Resident-facing handlers: availability, booking creation/cancellation
//! and the resident's own booking list. Each handler validates its typed
//! request, then delegates to `BookingService` with the explicit actor
//! context.

use crate::{
    auth::Actor,
    errors::AppError,
    handlers::parse_iso_date,
    models::booking::BookingSummary,
    services::booking_service::{BookingService, MachineSlots},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;

/// Query params for `GET /api/slots`.
#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub date: String,
}

/// Request body for `POST /api/bookings`.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub machine_id: i64,
    pub slot_id: i64,
    pub date: String,
}

/// `GET /api/slots?date=YYYY-MM-DD` — availability grid for the actor's
/// floor. Maintenance machines are absent from the map entirely.
pub async fn floor_slots(
    State(service): State<BookingService>,
    actor: Actor,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<BTreeMap<i64, MachineSlots>>, AppError> {
    let date = parse_iso_date("date", &query.date)?;
    let grid = service.floor_slots(actor.floor_id, date).await?;
    Ok(Json(grid))
}

/// `POST /api/bookings` — create a confirmed booking. 409 when the slot is
/// already taken, 403 for floor or status violations.
pub async fn create_booking(
    State(service): State<BookingService>,
    actor: Actor,
    Json(request): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_iso_date("date", &request.date)?;
    let summary = service
        .create_booking(&actor, request.machine_id, request.slot_id, date)
        .await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// `GET /api/bookings/mine` — the actor's confirmed bookings, soonest first.
pub async fn my_bookings(
    State(service): State<BookingService>,
    actor: Actor,
) -> Result<Json<Vec<BookingSummary>>, AppError> {
    let bookings = service.my_bookings(&actor).await?;
    Ok(Json(bookings))
}

/// `DELETE /api/bookings/{booking_id}` — cancel a booking owned by the
/// actor (or any booking, for admins).
pub async fn cancel_booking(
    State(service): State<BookingService>,
    actor: Actor,
    Path(booking_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    service.cancel_booking(&actor, booking_id).await?;
    Ok(Json(json!({
        "booking_id": booking_id,
        "status": "cancelled"
    })))
}
