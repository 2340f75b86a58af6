//! Core data models for the laundry booking service.
//!
//! Floors group machines and residents, time slots are a fixed global set
//! of daily windows, and bookings tie all of them together for a calendar
//! date. The entities map cleanly to database rows via `sqlx::FromRow` and
//! serialize naturally as JSON via `serde`. Foreign keys stay plain
//! identifiers, never live object references.

pub mod booking;
pub mod floor;
pub mod machine;
pub mod resident;
pub mod time_slot;
