//! A building level grouping machines and residents.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A floor of the building. Floors are seeded once and immutable.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
pub struct Floor {
    pub id: i64,

    /// Building-wide unique floor number.
    pub number: i64,
}
