//! Shared fixtures for the service tests.
//!
//! Item 42 is owned by user 3; user 7 books it, user 8 is a bystander.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use shareit_core::{BookingId, BookingStatus, Clock, ItemId, ManualClock, NewBooking, UserId};
use shareit_db::{Database, DbConfig};

pub(crate) const OWNER: UserId = 3;
pub(crate) const BOOKER: UserId = 7;
pub(crate) const STRANGER: UserId = 8;
pub(crate) const ITEM: ItemId = 42;
pub(crate) const LOCKED_ITEM: ItemId = 43;

pub(crate) struct Fixture {
    pub db: Database,
    pub clock: Arc<ManualClock>,
}

impl Fixture {
    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Stores a booking of `ITEM` by `BOOKER` directly, skipping validation.
    pub async fn stored(&self, start: Duration, end: Duration, status: BookingStatus) -> BookingId {
        let now = self.now();
        self.db
            .bookings()
            .insert(&NewBooking {
                item_id: ITEM,
                booker_id: BOOKER,
                start: now + start,
                end: now + end,
                status,
            })
            .await
            .unwrap()
    }
}

/// Fixed starting instant for every test.
pub(crate) fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 9, 14, 10, 0, 0).unwrap()
}

pub(crate) async fn fixture() -> Fixture {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();

    for (id, name) in [(OWNER, "owner"), (BOOKER, "booker"), (STRANGER, "stranger")] {
        sqlx::query("INSERT INTO users (id, name, email) VALUES (?1, ?2, ?3)")
            .bind(id)
            .bind(name)
            .bind(format!("{name}@example.com"))
            .execute(db.pool())
            .await
            .unwrap();
    }

    for (id, available) in [(ITEM, true), (LOCKED_ITEM, false)] {
        sqlx::query(
            "INSERT INTO items (id, owner_id, name, description, available) VALUES (?1, ?2, ?3, '', ?4)",
        )
        .bind(id)
        .bind(OWNER)
        .bind(format!("item {id}"))
        .bind(available)
        .execute(db.pool())
        .await
        .unwrap();
    }

    Fixture {
        db,
        clock: Arc::new(ManualClock::new(t0())),
    }
}
