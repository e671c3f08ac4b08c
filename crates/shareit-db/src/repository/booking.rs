//! # Booking Repository
//!
//! Storage, listing, and status transitions for bookings.
//!
//! ## Booking Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Booking Lifecycle                                 │
//! │                                                                         │
//! │  1. CREATE                                                             │
//! │     └── insert() → id, status WAITING                                  │
//! │                                                                         │
//! │  2. DECIDE (once)                                                      │
//! │     └── decide(id, APPROVED | REJECTED)                                │
//! │         UPDATE ... WHERE id = ? AND status = 'WAITING'                  │
//! │         0 rows → someone decided first, caller re-reads the booking    │
//! │                                                                         │
//! │  3. READ                                                               │
//! │     └── list(role, user, state, now, page)                             │
//! │     └── last_approved_before / next_after (item details)               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Time Representation
//! `start_ms` / `end_ms` are Unix milliseconds. Every predicate that depends
//! on the current time takes `now` as a bound parameter; the repository never
//! reads the clock itself.
//!
//! `now` keeps its full precision, so it is bound rounded down where a stored
//! start is compared against it and rounded up where a stored end (or "start
//! before now") is. A stored row then matches exactly when the same
//! comparison against the unrounded `now` holds.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use super::from_millis;
use crate::error::{DbError, DbResult};
use shareit_core::{
    ceil_to_millis, Booking, BookingId, BookingRole, BookingState, BookingStatus, ItemId, NewBooking,
    PageRequest, UserId,
};

/// Columns of a booking joined with the owner of its item.
const BOOKING_SELECT: &str = r#"
    SELECT
        b.id,
        b.item_id,
        i.owner_id,
        b.booker_id,
        b.start_ms,
        b.end_ms,
        b.status
    FROM bookings b
    JOIN items i ON i.id = b.item_id
"#;

#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: i64,
    item_id: i64,
    owner_id: i64,
    booker_id: i64,
    start_ms: i64,
    end_ms: i64,
    status: BookingStatus,
}

impl TryFrom<BookingRow> for Booking {
    type Error = DbError;

    fn try_from(row: BookingRow) -> DbResult<Self> {
        Ok(Booking {
            id: row.id,
            item_id: row.item_id,
            owner_id: row.owner_id,
            booker_id: row.booker_id,
            start: from_millis(row.start_ms)?,
            end: from_millis(row.end_ms)?,
            status: row.status,
        })
    }
}

fn into_bookings(rows: Vec<BookingRow>) -> DbResult<Vec<Booking>> {
    rows.into_iter().map(Booking::try_from).collect()
}

/// Side-of-booking predicate.
fn role_predicate(role: BookingRole) -> &'static str {
    match role {
        BookingRole::Booker => "b.booker_id = ?",
        BookingRole::Owner => "i.owner_id = ?",
    }
}

/// A clock reading as whole milliseconds, rounded both ways.
///
/// For a whole-millisecond `t`: `t < now` iff `t < ceil`, `t > now` iff
/// `t > floor`, `t <= now` iff `t <= floor`, `t >= now` iff `t >= ceil`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NowMillis {
    floor: i64,
    ceil: i64,
}

impl NowMillis {
    fn new(now: DateTime<Utc>) -> Self {
        NowMillis {
            floor: now.timestamp_millis(),
            ceil: ceil_to_millis(now).timestamp_millis(),
        }
    }
}

/// State predicate and the `now` values it binds, in order.
///
/// CURRENT is inclusive on both ends, PAST and FUTURE are strict.
fn state_predicate(state: BookingState, now: NowMillis) -> (&'static str, Vec<i64>) {
    match state {
        BookingState::All => ("", vec![]),
        BookingState::Current => (
            " AND b.start_ms <= ? AND b.end_ms >= ?",
            vec![now.floor, now.ceil],
        ),
        BookingState::Past => (" AND b.end_ms < ?", vec![now.ceil]),
        BookingState::Future => (" AND b.start_ms > ?", vec![now.floor]),
        BookingState::Waiting | BookingState::Rejected => (" AND b.status = ?", vec![]),
    }
}

/// Repository for booking database operations.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: SqlitePool,
}

impl BookingRepository {
    /// Creates a new BookingRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BookingRepository { pool }
    }

    /// Stores a new booking and returns its assigned ID.
    pub async fn insert(&self, booking: &NewBooking) -> DbResult<BookingId> {
        debug!(
            item_id = booking.item_id,
            booker_id = booking.booker_id,
            "Inserting booking"
        );

        let id = sqlx::query(
            r#"
            INSERT INTO bookings (item_id, booker_id, start_ms, end_ms, status)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(booking.item_id)
        .bind(booking.booker_id)
        .bind(booking.start.timestamp_millis())
        .bind(booking.end.timestamp_millis())
        .bind(booking.status)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(id)
    }

    /// Gets a booking by ID.
    pub async fn get_by_id(&self, id: BookingId) -> DbResult<Option<Booking>> {
        let sql = format!("{BOOKING_SELECT} WHERE b.id = ?1");
        let row = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Booking::try_from).transpose()
    }

    /// Moves a WAITING booking to `status`.
    ///
    /// ## Returns
    /// * `Ok(true)` - this call performed the transition
    /// * `Ok(false)` - the booking is missing or no longer WAITING
    ///
    /// The status check and the write are one statement, so of two
    /// concurrent decisions exactly one observes `true`.
    pub async fn decide(&self, id: BookingId, status: BookingStatus) -> DbResult<bool> {
        debug!(id, status = %status, "Deciding booking");

        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET status = ?2
            WHERE id = ?1 AND status = ?3
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(BookingStatus::Waiting)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Lists one page of bookings for a booker or an item owner.
    ///
    /// ## Ordering
    /// Start time descending; ties broken by ID descending so pages are
    /// stable.
    pub async fn list(
        &self,
        role: BookingRole,
        user_id: UserId,
        state: BookingState,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> DbResult<Vec<Booking>> {
        let (state_sql, now_binds) = state_predicate(state, NowMillis::new(now));
        let sql = format!(
            "{BOOKING_SELECT} WHERE {role}{state_sql} \
             ORDER BY b.start_ms DESC, b.id DESC \
             LIMIT ? OFFSET ?",
            role = role_predicate(role),
        );

        debug!(?role, user_id, state = %state, offset = page.offset, limit = page.limit, "Listing bookings");

        let mut query = sqlx::query_as::<_, BookingRow>(&sql).bind(user_id);
        for now_ms in now_binds {
            query = query.bind(now_ms);
        }
        query = match state {
            BookingState::Waiting => query.bind(BookingStatus::Waiting),
            BookingState::Rejected => query.bind(BookingStatus::Rejected),
            _ => query,
        };

        let rows = query
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;

        into_bookings(rows)
    }

    /// Lists every booking made by `booker_id`, newest start first.
    pub async fn list_all_for_booker(&self, booker_id: UserId) -> DbResult<Vec<Booking>> {
        let sql = format!("{BOOKING_SELECT} WHERE b.booker_id = ?1 ORDER BY b.start_ms DESC, b.id DESC");
        let rows = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(booker_id)
            .fetch_all(&self.pool)
            .await?;

        into_bookings(rows)
    }

    /// The APPROVED booking of `item_id` with the greatest start before `now`.
    pub async fn last_approved_before(
        &self,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> DbResult<Option<Booking>> {
        let sql = format!(
            "{BOOKING_SELECT} WHERE b.item_id = ?1 AND b.status = ?2 AND b.start_ms < ?3 \
             ORDER BY b.start_ms DESC, b.id DESC LIMIT 1"
        );
        let row = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(item_id)
            .bind(BookingStatus::Approved)
            .bind(NowMillis::new(now).ceil)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Booking::try_from).transpose()
    }

    /// The booking of `item_id` with the smallest start after `now`, any status.
    pub async fn next_after(&self, item_id: ItemId, now: DateTime<Utc>) -> DbResult<Option<Booking>> {
        let sql = format!(
            "{BOOKING_SELECT} WHERE b.item_id = ?1 AND b.start_ms > ?2 \
             ORDER BY b.start_ms ASC, b.id ASC LIMIT 1"
        );
        let row = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(item_id)
            .bind(NowMillis::new(now).floor)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Booking::try_from).transpose()
    }

    /// Whether `booker_id` has a booking of `item_id`, in any status, that
    /// ended before `now`.
    pub async fn has_finished_booking(
        &self,
        booker_id: UserId,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> DbResult<bool> {
        let found: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT id FROM bookings
            WHERE booker_id = ?1 AND item_id = ?2 AND end_ms < ?3
            LIMIT 1
            "#,
        )
        .bind(booker_id)
        .bind(item_id)
        .bind(NowMillis::new(now).ceil)
        .fetch_optional(&self.pool)
        .await?;

        Ok(found.is_some())
    }

    /// Counts all bookings.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
