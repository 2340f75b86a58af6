//! Defines routes for all booking and administration operations.
//!
//! ## Structure
//! - **Resident endpoints**
//!   - `GET    /api/slots?date=YYYY-MM-DD` — availability for the actor's floor
//!   - `POST   /api/bookings` — create a booking
//!   - `GET    /api/bookings/mine` — the actor's confirmed bookings
//!   - `DELETE /api/bookings/{booking_id}` — cancel a booking
//!   - `GET    /api/floors` — floor enumeration
//!
//! - **Admin endpoints**
//!   - `GET    /api/admin/bookings` — history with date/floor filters
//!   - `GET    /api/admin/machines` — machine inventory
//!   - `PUT    /api/admin/machines/{machine_id}/status` — status toggle
//!
//! Every `/api` route resolves the actor from the `x-resident-id` header;
//! admin routes additionally require the admin flag.

use crate::{
    handlers::{
        admin_handlers::{all_bookings, list_floors, list_machines, set_machine_status},
        booking_handlers::{cancel_booking, create_booking, floor_slots, my_bookings},
        health_handlers::{healthz, readyz},
    },
    services::booking_service::BookingService,
};
use axum::{
    Router,
    routing::{delete, get, post, put},
};

/// Build and return the router for all booking routes.
///
/// The router carries shared state (`BookingService`) to all handlers.
pub fn routes() -> Router<BookingService> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Resident-facing routes
        .route("/api/slots", get(floor_slots))
        .route("/api/bookings", post(create_booking))
        .route("/api/bookings/mine", get(my_bookings))
        .route("/api/bookings/{booking_id}", delete(cancel_booking))
        .route("/api/floors", get(list_floors))
        // Admin routes
        .route("/api/admin/bookings", get(all_bookings))
        .route("/api/admin/machines", get(list_machines))
        .route(
            "/api/admin/machines/{machine_id}/status",
            put(set_machine_status),
        )
}
