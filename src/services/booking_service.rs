//! src/services/booking_service.rs
//!
//! BookingService — slot availability, booking creation/cancellation and
//! administrative machine control backed by SQLite. This file intentionally
//! does **not** perform any session or credential handling; callers pass an
//! explicit [`Actor`] context into every operation that acts on behalf of a
//! resident.

use crate::{
    auth::Actor,
    models::{
        booking::{AdminBookingRecord, Booking, BookingStatus, BookingSummary},
        floor::Floor,
        machine::{Machine, MachineRecord, MachineStatus},
        time_slot::TimeSlot,
    },
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use sqlx::{QueryBuilder, SqlitePool, sqlite::Sqlite};
use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};
use thiserror::Error;
use tracing::warn;

/// One slot of the availability grid for a single machine.
#[derive(Serialize, Clone, Debug)]
pub struct SlotAvailability {
    pub slot_id: i64,
    pub description: String,
    pub occupied: bool,
}

/// All slots of one machine for the requested date.
#[derive(Serialize, Clone, Debug)]
pub struct MachineSlots {
    pub label: String,
    pub slots: Vec<SlotAvailability>,
}

/// Optional predicates for the admin booking history.
#[derive(Clone, Debug, Default)]
pub struct BookingHistoryFilter {
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
    pub floor_number: Option<i64>,
}

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("machine {0} not found")]
    MachineNotFound(i64),
    #[error("time slot {0} not found")]
    SlotNotFound(i64),
    #[error("booking {0} not found")]
    BookingNotFound(i64),
    #[error("machine {0} is not on the resident's floor")]
    MachineNotOnFloor(i64),
    #[error("machine {0} is under maintenance and cannot be booked")]
    MachineUnavailable(i64),
    #[error("booking {0} belongs to another resident")]
    NotBookingOwner(i64),
    #[error("machine {machine} is already booked for slot {slot} on {date}")]
    SlotTaken {
        machine: i64,
        slot: i64,
        date: NaiveDate,
    },
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type BookingResult<T> = Result<T, BookingError>;

/// BookingService provides the core laundry-room operations:
/// - Compute the availability grid for a floor and date
/// - Create a booking under the store's uniqueness enforcement
/// - Cancel a booking under ownership/admin authorization
/// - Toggle machine status and list booking history for administrators
///
/// All cross-entity reads are plain snapshots; correctness under concurrent
/// booking attempts rests entirely on the partial unique index over
/// `(machine_id, slot_id, booked_date)` for confirmed rows, checked by the
/// store at insert time.
#[derive(Clone)]
pub struct BookingService {
    /// Shared SQLite connection pool.
    pub db: Arc<SqlitePool>,
}

impl BookingService {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    /// Fetch a machine row. Returns MachineNotFound if missing.
    async fn fetch_machine(&self, machine_id: i64) -> BookingResult<Machine> {
        sqlx::query_as::<_, Machine>(
            "SELECT id, floor_id, label, status FROM machines WHERE id = ?",
        )
        .bind(machine_id)
        .fetch_one(&*self.db)
        .await
        .map_err(|err| match err {
            sqlx::Error::RowNotFound => BookingError::MachineNotFound(machine_id),
            other => BookingError::Sqlx(other),
        })
    }

    /// Fetch a slot definition. Returns SlotNotFound if missing.
    async fn fetch_slot(&self, slot_id: i64) -> BookingResult<TimeSlot> {
        sqlx::query_as::<_, TimeSlot>(
            "SELECT id, description, starts_at, ends_at FROM time_slots WHERE id = ?",
        )
        .bind(slot_id)
        .fetch_one(&*self.db)
        .await
        .map_err(|err| match err {
            sqlx::Error::RowNotFound => BookingError::SlotNotFound(slot_id),
            other => BookingError::Sqlx(other),
        })
    }

    /// Fetch a booking row. Returns BookingNotFound if missing.
    async fn fetch_booking(&self, booking_id: i64) -> BookingResult<Booking> {
        sqlx::query_as::<_, Booking>(
            "SELECT id, resident_id, machine_id, slot_id, booked_date, created_at, status
             FROM bookings WHERE id = ?",
        )
        .bind(booking_id)
        .fetch_one(&*self.db)
        .await
        .map_err(|err| match err {
            sqlx::Error::RowNotFound => BookingError::BookingNotFound(booking_id),
            other => BookingError::Sqlx(other),
        })
    }

    /// Machine joined with its floor number, the shape returned to admins.
    async fn fetch_machine_record(&self, machine_id: i64) -> BookingResult<MachineRecord> {
        sqlx::query_as::<_, MachineRecord>(
            "SELECT m.id, f.number AS floor_number, m.label, m.status
             FROM machines m JOIN floors f ON f.id = m.floor_id
             WHERE m.id = ?",
        )
        .bind(machine_id)
        .fetch_one(&*self.db)
        .await
        .map_err(|err| match err {
            sqlx::Error::RowNotFound => BookingError::MachineNotFound(machine_id),
            other => BookingError::Sqlx(other),
        })
    }

    /// Compute the availability grid for one floor and date.
    ///
    /// Every `active` machine on the floor appears with the full set of
    /// slot definitions, each annotated with whether a confirmed booking
    /// already occupies it. Machines under maintenance are absent from the
    /// result entirely, regardless of any historical bookings they hold.
    ///
    /// Read-only; the snapshot carries no staleness guarantee.
    pub async fn floor_slots(
        &self,
        floor_id: i64,
        date: NaiveDate,
    ) -> BookingResult<BTreeMap<i64, MachineSlots>> {
        let machines = sqlx::query_as::<_, Machine>(
            "SELECT id, floor_id, label, status FROM machines
             WHERE floor_id = ? AND status = 'active'
             ORDER BY label",
        )
        .bind(floor_id)
        .fetch_all(&*self.db)
        .await?;

        let slots = sqlx::query_as::<_, TimeSlot>(
            "SELECT id, description, starts_at, ends_at FROM time_slots ORDER BY starts_at",
        )
        .fetch_all(&*self.db)
        .await?;

        let occupied: HashSet<(i64, i64)> = sqlx::query_as::<_, (i64, i64)>(
            "SELECT b.machine_id, b.slot_id FROM bookings b
             JOIN machines m ON m.id = b.machine_id
             WHERE m.floor_id = ? AND b.booked_date = ? AND b.status = 'confirmed'",
        )
        .bind(floor_id)
        .bind(date)
        .fetch_all(&*self.db)
        .await?
        .into_iter()
        .collect();

        let mut grid = BTreeMap::new();
        for machine in machines {
            let annotated = slots
                .iter()
                .map(|slot| SlotAvailability {
                    slot_id: slot.id,
                    description: slot.description.clone(),
                    occupied: occupied.contains(&(machine.id, slot.id)),
                })
                .collect();
            grid.insert(
                machine.id,
                MachineSlots {
                    label: machine.label,
                    slots: annotated,
                },
            );
        }
        Ok(grid)
    }

    /// Create a confirmed booking for the acting resident.
    ///
    /// Validates that the machine exists, sits on the actor's floor and is
    /// `active`, and that the slot definition exists. The insert itself is
    /// the only conflict check: a uniqueness violation reported by the
    /// store is classified as [`BookingError::SlotTaken`] rather than as an
    /// internal error, so concurrent attempts on the same triple race
    /// safely and exactly one wins. Never pre-checks occupancy with a read.
    pub async fn create_booking(
        &self,
        actor: &Actor,
        machine_id: i64,
        slot_id: i64,
        date: NaiveDate,
    ) -> BookingResult<BookingSummary> {
        let machine = self.fetch_machine(machine_id).await?;
        if machine.floor_id != actor.floor_id {
            return Err(BookingError::MachineNotOnFloor(machine_id));
        }
        if machine.status != MachineStatus::Active {
            return Err(BookingError::MachineUnavailable(machine_id));
        }
        let slot = self.fetch_slot(slot_id).await?;

        let floor_number: i64 = sqlx::query_scalar("SELECT number FROM floors WHERE id = ?")
            .bind(machine.floor_id)
            .fetch_one(&*self.db)
            .await?;

        let insert = sqlx::query_scalar::<_, i64>(
            "INSERT INTO bookings (resident_id, machine_id, slot_id, booked_date, created_at, status)
             VALUES (?, ?, ?, ?, ?, 'confirmed')
             RETURNING id",
        )
        .bind(actor.resident_id)
        .bind(machine_id)
        .bind(slot_id)
        .bind(date)
        .bind(Utc::now())
        .fetch_one(&*self.db)
        .await;

        match insert {
            Ok(id) => Ok(BookingSummary {
                id,
                booked_date: date,
                slot_id,
                slot_description: slot.description,
                machine_id,
                machine_label: machine.label,
                floor_number,
            }),
            Err(err) if is_unique_violation(&err) => Err(BookingError::SlotTaken {
                machine: machine_id,
                slot: slot_id,
                date,
            }),
            Err(err) => Err(BookingError::Sqlx(err)),
        }
    }

    /// Cancel a booking on behalf of its owner or an administrator.
    ///
    /// Idempotent: cancelling an already-cancelled booking is a no-op and
    /// succeeds. The row is kept; bookings are never physically deleted.
    pub async fn cancel_booking(&self, actor: &Actor, booking_id: i64) -> BookingResult<()> {
        let booking = self.fetch_booking(booking_id).await?;
        if booking.resident_id != actor.resident_id && !actor.is_admin {
            return Err(BookingError::NotBookingOwner(booking_id));
        }
        if booking.status == BookingStatus::Cancelled {
            return Ok(());
        }

        sqlx::query("UPDATE bookings SET status = 'cancelled' WHERE id = ?")
            .bind(booking_id)
            .execute(&*self.db)
            .await?;
        Ok(())
    }

    /// All confirmed bookings of the acting resident, ordered by date then
    /// slot start time, ascending.
    pub async fn my_bookings(&self, actor: &Actor) -> BookingResult<Vec<BookingSummary>> {
        let rows = sqlx::query_as::<_, BookingSummary>(
            "SELECT b.id, b.booked_date, b.slot_id, ts.description AS slot_description,
                    b.machine_id, m.label AS machine_label, f.number AS floor_number
             FROM bookings b
             JOIN time_slots ts ON ts.id = b.slot_id
             JOIN machines m ON m.id = b.machine_id
             JOIN floors f ON f.id = m.floor_id
             WHERE b.resident_id = ? AND b.status = 'confirmed'
             ORDER BY b.booked_date ASC, ts.starts_at ASC",
        )
        .bind(actor.resident_id)
        .fetch_all(&*self.db)
        .await?;
        Ok(rows)
    }

    /// Transition a machine between `active` and `maintenance`.
    ///
    /// Both directions are unconditional. When taking an active machine
    /// into maintenance, future confirmed bookings on it are counted and a
    /// warning is logged; the transition still proceeds and the bookings
    /// are neither cancelled nor migrated.
    pub async fn set_machine_status(
        &self,
        machine_id: i64,
        status: MachineStatus,
    ) -> BookingResult<MachineRecord> {
        let machine = self.fetch_machine(machine_id).await?;

        if machine.status == MachineStatus::Active && status == MachineStatus::Maintenance {
            let today = Utc::now().date_naive();
            let pending: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM bookings
                 WHERE machine_id = ? AND status = 'confirmed' AND booked_date >= ?",
            )
            .bind(machine_id)
            .bind(today)
            .fetch_one(&*self.db)
            .await?;
            if pending > 0 {
                warn!(
                    "machine {} entering maintenance with {} future confirmed bookings",
                    machine_id, pending
                );
            }
        }

        sqlx::query("UPDATE machines SET status = ? WHERE id = ?")
            .bind(status)
            .bind(machine_id)
            .execute(&*self.db)
            .await?;

        self.fetch_machine_record(machine_id).await
    }

    /// Booking history across all entities, any status, newest first.
    ///
    /// Filter predicates are combined dynamically; rows are ordered by date
    /// descending then slot start time descending.
    pub async fn all_bookings(
        &self,
        filter: BookingHistoryFilter,
    ) -> BookingResult<Vec<AdminBookingRecord>> {
        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT b.id, b.booked_date, ts.description AS slot_description, \
             ts.starts_at AS slot_starts_at, f.number AS floor_number, \
             m.label AS machine_label, r.full_name AS resident_name, \
             r.apartment, b.status \
             FROM bookings b \
             JOIN time_slots ts ON ts.id = b.slot_id \
             JOIN machines m ON m.id = b.machine_id \
             JOIN floors f ON f.id = m.floor_id \
             JOIN residents r ON r.id = b.resident_id \
             WHERE 1 = 1",
        );

        if let Some(start) = filter.date_start {
            builder.push(" AND b.booked_date >= ");
            builder.push_bind(start);
        }
        if let Some(end) = filter.date_end {
            builder.push(" AND b.booked_date <= ");
            builder.push_bind(end);
        }
        if let Some(floor) = filter.floor_number {
            builder.push(" AND f.number = ");
            builder.push_bind(floor);
        }

        builder.push(" ORDER BY b.booked_date DESC, ts.starts_at DESC");

        let rows = builder
            .build_query_as::<AdminBookingRecord>()
            .fetch_all(&*self.db)
            .await?;
        Ok(rows)
    }

    /// All machines joined with their floors, ordered by floor number then
    /// label.
    pub async fn list_machines(&self) -> BookingResult<Vec<MachineRecord>> {
        let rows = sqlx::query_as::<_, MachineRecord>(
            "SELECT m.id, f.number AS floor_number, m.label, m.status
             FROM machines m JOIN floors f ON f.id = m.floor_id
             ORDER BY f.number, m.label",
        )
        .fetch_all(&*self.db)
        .await?;
        Ok(rows)
    }

    /// All floors, ordered by number.
    pub async fn list_floors(&self) -> BookingResult<Vec<Floor>> {
        let rows = sqlx::query_as::<_, Floor>("SELECT id, number FROM floors ORDER BY number")
            .fetch_all(&*self.db)
            .await?;
        Ok(rows)
    }
}

/// Return true if SQLx error indicates a unique constraint violation.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.message().to_ascii_lowercase().contains("unique")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    const SCHEMA: &str = include_str!("../../migrations/0001_init.sql");

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    fn actor(resident_id: i64, floor_id: i64, is_admin: bool) -> Actor {
        Actor {
            resident_id,
            floor_id,
            is_admin,
        }
    }

    /// In-memory store with the real schema and a small fixture: two
    /// floors, machine 1 (active) and machine 2 (maintenance) on floor 1,
    /// machine 3 (active) on floor 2, four slot definitions, residents
    /// 1 and 2 on floor 1, admin 3 on floor 1, resident 4 on floor 2.
    async fn service() -> BookingService {
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("connect in-memory sqlite");
        for stmt in SCHEMA.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            sqlx::query(stmt).execute(&db).await.expect("apply schema");
        }

        let fixture = [
            "INSERT INTO floors (id, number) VALUES (1, 1), (2, 2)",
            "INSERT INTO machines (id, floor_id, label, status) VALUES
                (1, 1, 'Machine 1', 'active'),
                (2, 1, 'Machine 2', 'maintenance'),
                (3, 2, 'Machine 1', 'active')",
            "INSERT INTO time_slots (id, description, starts_at, ends_at) VALUES
                (1, '07:00-11:00', '07:00:00', '11:00:00'),
                (2, '11:00-15:00', '11:00:00', '15:00:00'),
                (3, '15:00-19:00', '15:00:00', '19:00:00'),
                (4, '19:00-23:00', '19:00:00', '23:00:00')",
            "INSERT INTO residents (id, full_name, email, password_hash, floor_id, apartment, is_active, is_admin) VALUES
                (1, 'Ana Souza', 'ana@example.com', '$opaque$1', 1, '101', 1, 0),
                (2, 'Bruno Lima', 'bruno@example.com', '$opaque$2', 1, '102', 1, 0),
                (3, 'Clara Dias', 'clara@example.com', '$opaque$3', 1, '103', 1, 1),
                (4, 'Davi Costa', 'davi@example.com', '$opaque$4', 2, '201', 1, 0)",
        ];
        for stmt in fixture {
            sqlx::query(stmt).execute(&db).await.expect("apply fixture");
        }

        BookingService::new(Arc::new(db))
    }

    #[tokio::test]
    async fn availability_scenario_with_booking_and_conflict() {
        let svc = service().await;
        let resident = actor(1, 1, false);
        let day = date("2025-06-01");

        // Maintenance machine 2 is absent entirely; machine 1 starts free.
        let grid = svc.floor_slots(1, day).await.unwrap();
        assert_eq!(grid.len(), 1);
        let machine = grid.get(&1).unwrap();
        assert_eq!(machine.label, "Machine 1");
        assert_eq!(machine.slots.len(), 4);
        assert!(machine.slots.iter().all(|slot| !slot.occupied));

        let summary = svc.create_booking(&resident, 1, 1, day).await.unwrap();
        assert_eq!(summary.machine_label, "Machine 1");
        assert_eq!(summary.slot_description, "07:00-11:00");
        assert_eq!(summary.floor_number, 1);

        let grid = svc.floor_slots(1, day).await.unwrap();
        let machine = grid.get(&1).unwrap();
        assert!(machine.slots.iter().find(|s| s.slot_id == 1).unwrap().occupied);
        assert!(machine.slots.iter().filter(|s| s.slot_id != 1).all(|s| !s.occupied));

        // A second resident racing for the same triple loses with a conflict.
        let other = actor(2, 1, false);
        let err = svc.create_booking(&other, 1, 1, day).await.unwrap_err();
        assert!(matches!(err, BookingError::SlotTaken { machine: 1, slot: 1, .. }));
    }

    #[tokio::test]
    async fn same_slot_is_free_on_other_dates_and_machines() {
        let svc = service().await;
        let resident = actor(1, 1, false);
        svc.create_booking(&resident, 1, 1, date("2025-06-01"))
            .await
            .unwrap();

        // Same machine, next day.
        svc.create_booking(&resident, 1, 1, date("2025-06-02"))
            .await
            .unwrap();
        // Same slot and date, different machine (floor 2 resident).
        svc.create_booking(&actor(4, 2, false), 3, 1, date("2025-06-01"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn booking_outside_own_floor_is_forbidden() {
        let svc = service().await;
        let resident = actor(1, 1, false);
        let err = svc
            .create_booking(&resident, 3, 1, date("2025-06-01"))
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::MachineNotOnFloor(3)));
    }

    #[tokio::test]
    async fn booking_a_maintenance_machine_is_forbidden() {
        let svc = service().await;
        let resident = actor(1, 1, false);
        let err = svc
            .create_booking(&resident, 2, 1, date("2025-06-01"))
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::MachineUnavailable(2)));
    }

    #[tokio::test]
    async fn unknown_machine_and_slot_are_not_found() {
        let svc = service().await;
        let resident = actor(1, 1, false);
        let err = svc
            .create_booking(&resident, 99, 1, date("2025-06-01"))
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::MachineNotFound(99)));

        let err = svc
            .create_booking(&resident, 1, 99, date("2025-06-01"))
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::SlotNotFound(99)));
    }

    #[tokio::test]
    async fn cancel_requires_owner_or_admin() {
        let svc = service().await;
        let owner = actor(1, 1, false);
        let booking = svc
            .create_booking(&owner, 1, 1, date("2025-06-01"))
            .await
            .unwrap();

        let stranger = actor(2, 1, false);
        let err = svc.cancel_booking(&stranger, booking.id).await.unwrap_err();
        assert!(matches!(err, BookingError::NotBookingOwner(_)));

        svc.cancel_booking(&owner, booking.id).await.unwrap();
    }

    #[tokio::test]
    async fn admin_may_cancel_any_booking() {
        let svc = service().await;
        let owner = actor(1, 1, false);
        let booking = svc
            .create_booking(&owner, 1, 1, date("2025-06-01"))
            .await
            .unwrap();

        let admin = actor(3, 1, true);
        svc.cancel_booking(&admin, booking.id).await.unwrap();
        // Idempotent: a second cancellation is a no-op and still succeeds.
        svc.cancel_booking(&admin, booking.id).await.unwrap();
    }

    #[tokio::test]
    async fn cancelling_a_missing_booking_is_not_found() {
        let svc = service().await;
        let err = svc
            .cancel_booking(&actor(1, 1, false), 42)
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::BookingNotFound(42)));
    }

    #[tokio::test]
    async fn cancelled_slot_reappears_free_and_can_be_rebooked() {
        let svc = service().await;
        let owner = actor(1, 1, false);
        let day = date("2025-06-01");
        let booking = svc.create_booking(&owner, 1, 1, day).await.unwrap();
        svc.cancel_booking(&owner, booking.id).await.unwrap();

        let grid = svc.floor_slots(1, day).await.unwrap();
        let machine = grid.get(&1).unwrap();
        assert!(machine.slots.iter().all(|slot| !slot.occupied));

        // The partial unique index only guards confirmed rows, so the
        // freed triple accepts a new booking from someone else.
        svc.create_booking(&actor(2, 1, false), 1, 1, day)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn my_bookings_ordered_by_date_then_slot_start() {
        let svc = service().await;
        let resident = actor(1, 1, false);
        svc.create_booking(&resident, 1, 3, date("2025-06-02"))
            .await
            .unwrap();
        svc.create_booking(&resident, 1, 1, date("2025-06-02"))
            .await
            .unwrap();
        svc.create_booking(&resident, 1, 4, date("2025-06-01"))
            .await
            .unwrap();

        let mine = svc.my_bookings(&resident).await.unwrap();
        let keys: Vec<(NaiveDate, i64)> = mine
            .iter()
            .map(|b| (b.booked_date, b.slot_id))
            .collect();
        assert_eq!(
            keys,
            vec![
                (date("2025-06-01"), 4),
                (date("2025-06-02"), 1),
                (date("2025-06-02"), 3),
            ]
        );
    }

    #[tokio::test]
    async fn my_bookings_excludes_cancelled() {
        let svc = service().await;
        let resident = actor(1, 1, false);
        let booking = svc
            .create_booking(&resident, 1, 1, date("2025-06-01"))
            .await
            .unwrap();
        svc.create_booking(&resident, 1, 2, date("2025-06-01"))
            .await
            .unwrap();
        svc.cancel_booking(&resident, booking.id).await.unwrap();

        let mine = svc.my_bookings(&resident).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].slot_id, 2);
    }

    #[tokio::test]
    async fn maintenance_hides_machine_even_with_history() {
        let svc = service().await;
        let resident = actor(1, 1, false);
        let day = date("2025-06-01");
        svc.create_booking(&resident, 1, 1, day).await.unwrap();

        svc.set_machine_status(1, MachineStatus::Maintenance)
            .await
            .unwrap();
        let grid = svc.floor_slots(1, day).await.unwrap();
        assert!(grid.is_empty());

        // Back to active: the historical booking still occupies its slot.
        svc.set_machine_status(1, MachineStatus::Active)
            .await
            .unwrap();
        let grid = svc.floor_slots(1, day).await.unwrap();
        assert!(grid.get(&1).unwrap().slots[0].occupied);
    }

    #[tokio::test]
    async fn status_transition_is_unconditional_and_keeps_bookings() {
        let svc = service().await;
        let resident = actor(1, 1, false);
        // Far-future booking so it always counts as pending.
        let booking = svc
            .create_booking(&resident, 1, 1, date("2099-01-01"))
            .await
            .unwrap();

        let record = svc
            .set_machine_status(1, MachineStatus::Maintenance)
            .await
            .unwrap();
        assert_eq!(record.status, MachineStatus::Maintenance);

        // The pending booking was neither cancelled nor migrated.
        let mine = svc.my_bookings(&resident).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, booking.id);

        let record = svc
            .set_machine_status(1, MachineStatus::Active)
            .await
            .unwrap();
        assert_eq!(record.status, MachineStatus::Active);
    }

    #[tokio::test]
    async fn set_status_on_unknown_machine_is_not_found() {
        let svc = service().await;
        let err = svc
            .set_machine_status(99, MachineStatus::Maintenance)
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::MachineNotFound(99)));
    }

    #[tokio::test]
    async fn admin_history_filters_and_ordering() {
        let svc = service().await;
        svc.create_booking(&actor(1, 1, false), 1, 1, date("2025-06-01"))
            .await
            .unwrap();
        svc.create_booking(&actor(1, 1, false), 1, 4, date("2025-06-01"))
            .await
            .unwrap();
        let cancelled = svc
            .create_booking(&actor(1, 1, false), 1, 2, date("2025-06-03"))
            .await
            .unwrap();
        svc.cancel_booking(&actor(1, 1, false), cancelled.id)
            .await
            .unwrap();
        svc.create_booking(&actor(4, 2, false), 3, 1, date("2025-06-02"))
            .await
            .unwrap();

        // Unfiltered: every status, newest date first, later slots first.
        let all = svc.all_bookings(BookingHistoryFilter::default()).await.unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].booked_date, date("2025-06-03"));
        assert_eq!(all[0].status, BookingStatus::Cancelled);
        assert_eq!(all[1].booked_date, date("2025-06-02"));
        assert_eq!(all[2].slot_description, "19:00-23:00");
        assert_eq!(all[3].slot_description, "07:00-11:00");

        let floor2 = svc
            .all_bookings(BookingHistoryFilter {
                floor_number: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(floor2.len(), 1);
        assert_eq!(floor2[0].resident_name, "Davi Costa");
        assert_eq!(floor2[0].apartment, "201");

        let range = svc
            .all_bookings(BookingHistoryFilter {
                date_start: Some(date("2025-06-02")),
                date_end: Some(date("2025-06-03")),
                floor_number: None,
            })
            .await
            .unwrap();
        assert_eq!(range.len(), 2);
    }

    #[tokio::test]
    async fn machine_and_floor_listings_are_ordered() {
        let svc = service().await;
        let machines = svc.list_machines().await.unwrap();
        let labels: Vec<(i64, &str)> = machines
            .iter()
            .map(|m| (m.floor_number, m.label.as_str()))
            .collect();
        assert_eq!(
            labels,
            vec![(1, "Machine 1"), (1, "Machine 2"), (2, "Machine 1")]
        );

        let floors = svc.list_floors().await.unwrap();
        assert_eq!(
            floors.iter().map(|f| f.number).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }
}
