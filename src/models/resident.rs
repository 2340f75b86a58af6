//! A resident of the building, optionally flagged as administrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered resident.
///
/// Credentials are stored as an opaque hash; verifying them is the job of
/// the excluded session layer, never of this service.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
pub struct Resident {
    pub id: i64,

    pub full_name: String,

    /// Globally unique contact address, used as the login identifier by
    /// the outer layer.
    pub email: String,

    /// Opaque credential hash. Never inspected here.
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Floor the resident lives on; bookings are restricted to machines
    /// on this floor.
    pub floor_id: i64,

    pub apartment: String,

    pub phone: Option<String>,

    pub registered_at: DateTime<Utc>,

    /// Inactive residents cannot act at all.
    pub is_active: bool,

    /// Grants access to the admin operations.
    pub is_admin: bool,
}
