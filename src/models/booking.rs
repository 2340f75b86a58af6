//! A reservation of one machine, one slot, one date, by one resident.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lifecycle status of a booking.
///
/// Bookings move `confirmed -> cancelled` and are never physically
/// deleted. `completed` exists in the schema but no operation currently
/// drives that transition.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type, Debug)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Completed,
}

/// A booking row as stored.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
pub struct Booking {
    pub id: i64,
    pub resident_id: i64,
    pub machine_id: i64,
    pub slot_id: i64,
    pub booked_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub status: BookingStatus,
}

/// Flat resident-facing view of a booking, joined with the slot, machine
/// and floor it refers to.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
pub struct BookingSummary {
    pub id: i64,
    pub booked_date: NaiveDate,
    pub slot_id: i64,
    pub slot_description: String,
    pub machine_id: i64,
    pub machine_label: String,
    pub floor_number: i64,
}

/// Full join across all entities for the admin booking history, any
/// status included.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
pub struct AdminBookingRecord {
    pub id: i64,
    pub booked_date: NaiveDate,
    pub slot_description: String,
    pub slot_starts_at: NaiveTime,
    pub floor_number: i64,
    pub machine_label: String,
    pub resident_name: String,
    pub apartment: String,
    pub status: BookingStatus,
}
