//! Represents a bookable laundry machine located on a floor.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Operational status of a machine.
///
/// Machines toggle between `active` and `maintenance` under admin control;
/// both directions are unconditional and neither state is terminal. Only
/// `active` machines accept bookings or appear in availability output.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type, Debug)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MachineStatus {
    Active,
    Maintenance,
}

/// A single laundry machine.
///
/// Belongs to exactly one floor; the `label` is the human-facing
/// identifier and is unique within that floor.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
pub struct Machine {
    pub id: i64,

    /// Foreign key linking to the floor the machine sits on.
    pub floor_id: i64,

    /// Per-floor identifier shown to residents (e.g. "Machine 1").
    pub label: String,

    pub status: MachineStatus,
}

/// Machine joined with its floor number, as returned by admin listings
/// and status updates.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
pub struct MachineRecord {
    pub id: i64,
    pub floor_number: i64,
    pub label: String,
    pub status: MachineStatus,
}
