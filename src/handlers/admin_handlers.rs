//! Administrative handlers: booking history, machine inventory and status
//! transitions. All but the floor listing require the actor's admin flag.

use crate::{
    auth::Actor,
    errors::AppError,
    handlers::parse_iso_date,
    models::{
        booking::AdminBookingRecord,
        floor::Floor,
        machine::{MachineRecord, MachineStatus},
    },
    services::booking_service::{BookingHistoryFilter, BookingService},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

/// Query params for `GET /api/admin/bookings`.
#[derive(Debug, Deserialize)]
pub struct BookingHistoryQuery {
    pub date_start: Option<String>,
    pub date_end: Option<String>,
    pub floor: Option<i64>,
}

/// Request body for `PUT /api/admin/machines/{id}/status`. Deserialization
/// already restricts the status to the two known values.
#[derive(Debug, Deserialize)]
pub struct SetMachineStatusRequest {
    pub status: MachineStatus,
}

/// `GET /api/admin/bookings` — full booking history with optional date
/// range and floor filters, newest first.
pub async fn all_bookings(
    State(service): State<BookingService>,
    actor: Actor,
    Query(query): Query<BookingHistoryQuery>,
) -> Result<Json<Vec<AdminBookingRecord>>, AppError> {
    actor.require_admin()?;

    let filter = BookingHistoryFilter {
        date_start: query
            .date_start
            .as_deref()
            .map(|value| parse_iso_date("date_start", value))
            .transpose()?,
        date_end: query
            .date_end
            .as_deref()
            .map(|value| parse_iso_date("date_end", value))
            .transpose()?,
        floor_number: query.floor,
    };

    let records = service.all_bookings(filter).await?;
    Ok(Json(records))
}

/// `GET /api/admin/machines` — every machine with its floor and status.
pub async fn list_machines(
    State(service): State<BookingService>,
    actor: Actor,
) -> Result<Json<Vec<MachineRecord>>, AppError> {
    actor.require_admin()?;
    let machines = service.list_machines().await?;
    Ok(Json(machines))
}

/// `PUT /api/admin/machines/{machine_id}/status` — toggle a machine
/// between active and maintenance.
pub async fn set_machine_status(
    State(service): State<BookingService>,
    actor: Actor,
    Path(machine_id): Path<i64>,
    Json(request): Json<SetMachineStatusRequest>,
) -> Result<Json<MachineRecord>, AppError> {
    actor.require_admin()?;
    let record = service.set_machine_status(machine_id, request.status).await?;
    Ok(Json(record))
}

/// `GET /api/floors` — floor enumeration. Open to any authenticated actor
/// so booking clients can populate floor selections.
pub async fn list_floors(
    State(service): State<BookingService>,
    _actor: Actor,
) -> Result<Json<Vec<Floor>>, AppError> {
    let floors = service.list_floors().await?;
    Ok(Json(floors))
}
