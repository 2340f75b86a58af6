//! One of the fixed global set of daily booking windows.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A fixed daily time window (e.g. "07:00-11:00").
///
/// Slot definitions are global: the same windows apply to every machine on
/// every floor and date. Seeded once, immutable afterwards.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
pub struct TimeSlot {
    pub id: i64,

    /// Globally unique human-readable window description.
    pub description: String,

    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
}
