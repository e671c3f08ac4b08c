//! # Booking Service
//!
//! The single entry point the transport layer talks to.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        BookingService                                   │
//! │                                                                         │
//! │  create_booking / set_approval / get_booking ──► BookingLifecycle       │
//! │  list_bookings_for_booker / _for_owner /                                │
//! │  list_all_bookings_for_booker                ──► BookingQueryEngine     │
//! │  item_bookings / item_bookings_bulk /                                   │
//! │  has_completed_booking                       ──► ItemAvailabilityView   │
//! │                                                                         │
//! │  All three share one Database (pool) and one Clock.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use shareit_core::{
    Booking, BookingId, Clock, ItemBookings, ItemId, SystemClock, UserId,
};
use shareit_db::Database;

use crate::availability::ItemAvailabilityView;
use crate::config::BookingConfig;
use crate::error::BookingResult;
use crate::lifecycle::BookingLifecycle;
use crate::query::BookingQueryEngine;

/// Booking operations over one store and one clock.
#[derive(Clone)]
pub struct BookingService {
    db: Database,
    lifecycle: BookingLifecycle,
    queries: BookingQueryEngine,
    availability: ItemAvailabilityView,
}

impl BookingService {
    /// Builds the service over an open database.
    pub fn new(db: Database, clock: Arc<dyn Clock>, default_page_size: i64) -> Self {
        BookingService {
            lifecycle: BookingLifecycle::new(db.clone(), clock.clone()),
            queries: BookingQueryEngine::new(db.clone(), clock.clone(), default_page_size),
            availability: ItemAvailabilityView::new(db.clone(), clock),
            db,
        }
    }

    /// Opens the configured database and builds the service on the wall clock.
    pub async fn connect(config: &BookingConfig) -> BookingResult<Self> {
        let db = Database::new(config.db_config()).await?;
        info!(
            path = %config.database_path.display(),
            default_page_size = config.default_page_size,
            "Booking service ready"
        );
        Ok(Self::new(db, Arc::new(SystemClock), config.default_page_size))
    }

    /// The underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    pub async fn create_booking(
        &self,
        item_id: ItemId,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        requester_id: UserId,
    ) -> BookingResult<Booking> {
        self.lifecycle.create(item_id, start, end, requester_id).await
    }

    pub async fn set_approval(
        &self,
        booking_id: BookingId,
        approved: bool,
        acting_user_id: UserId,
    ) -> BookingResult<Booking> {
        self.lifecycle
            .set_approval(booking_id, approved, acting_user_id)
            .await
    }

    pub async fn get_booking(
        &self,
        booking_id: BookingId,
        requester_id: UserId,
    ) -> BookingResult<Booking> {
        self.lifecycle.get(booking_id, requester_id).await
    }

    pub async fn list_bookings_for_booker(
        &self,
        user_id: UserId,
        state: &str,
        from: Option<i64>,
        size: Option<i64>,
    ) -> BookingResult<Vec<Booking>> {
        self.queries.list_for_booker(user_id, state, from, size).await
    }

    pub async fn list_bookings_for_owner(
        &self,
        user_id: UserId,
        state: &str,
        from: Option<i64>,
        size: Option<i64>,
    ) -> BookingResult<Vec<Booking>> {
        self.queries.list_for_owner(user_id, state, from, size).await
    }

    pub async fn list_all_bookings_for_booker(&self, user_id: UserId) -> BookingResult<Vec<Booking>> {
        self.queries.list_all_for_booker(user_id).await
    }

    /// Last / next booking of an item as `viewer_id` may see them.
    pub async fn item_bookings(
        &self,
        item_id: ItemId,
        viewer_id: UserId,
    ) -> BookingResult<ItemBookings> {
        self.availability.for_viewer(item_id, viewer_id).await
    }

    /// Last / next bookings of every item owned by `owner_id`.
    pub async fn item_bookings_bulk(&self, owner_id: UserId) -> BookingResult<Vec<ItemBookings>> {
        let item_ids: Vec<ItemId> = self
            .db
            .items()
            .list_by_owner(owner_id)
            .await?
            .into_iter()
            .map(|item| item.id)
            .collect();
        self.availability.for_items(&item_ids).await
    }

    pub async fn has_completed_booking(
        &self,
        user_id: UserId,
        item_id: ItemId,
    ) -> BookingResult<bool> {
        self.availability.has_completed_booking(user_id, item_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BookingError, ErrorCode};
    use crate::testing::{fixture, BOOKER, ITEM, LOCKED_ITEM, OWNER};
    use chrono::Duration;
    use shareit_core::{BookingStatus, DEFAULT_PAGE_SIZE};
    use shareit_db::DbConfig;

    #[tokio::test]
    async fn test_booking_round_trip() {
        let f = fixture().await;
        let service = BookingService::new(f.db.clone(), f.clock(), DEFAULT_PAGE_SIZE);
        let now = f.now();

        let booking = service
            .create_booking(ITEM, Some(now + Duration::days(1)), Some(now + Duration::days(2)), BOOKER)
            .await
            .unwrap();
        assert_eq!(booking.status, BookingStatus::Waiting);

        let err = service
            .create_booking(ITEM, Some(now + Duration::days(1)), Some(now + Duration::days(2)), OWNER)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::OwnerConflict);

        let approved = service.set_approval(booking.id, true, OWNER).await.unwrap();
        assert_eq!(approved.status, BookingStatus::Approved);
        let err = service.set_approval(booking.id, true, OWNER).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::AlreadyApproved);

        assert_eq!(service.get_booking(booking.id, BOOKER).await.unwrap(), approved);

        let err = service
            .list_bookings_for_booker(BOOKER, "UNKNOWN", None, None)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnsupportedState);

        let future = service
            .list_bookings_for_owner(OWNER, "FUTURE", None, None)
            .await
            .unwrap();
        assert_eq!(future, vec![approved.clone()]);
        assert_eq!(
            service.list_all_bookings_for_booker(BOOKER).await.unwrap(),
            vec![approved]
        );
    }

    #[tokio::test]
    async fn test_item_views() {
        let f = fixture().await;
        let service = BookingService::new(f.db.clone(), f.clock(), DEFAULT_PAGE_SIZE);
        let day = Duration::days(1);
        let last = f.stored(day * -2, day * -1, BookingStatus::Approved).await;
        let next = f.stored(day, day * 2, BookingStatus::Waiting).await;

        let details = service.item_bookings(ITEM, OWNER).await.unwrap();
        assert_eq!(details.last_booking.map(|b| b.id), Some(last));
        assert_eq!(details.next_booking.map(|b| b.id), Some(next));

        let bulk = service.item_bookings_bulk(OWNER).await.unwrap();
        assert_eq!(
            bulk.iter().map(|b| b.item_id).collect::<Vec<_>>(),
            vec![ITEM, LOCKED_ITEM]
        );

        assert!(service.has_completed_booking(BOOKER, ITEM).await.unwrap());
        assert!(!service.has_completed_booking(OWNER, ITEM).await.unwrap());
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_as_internal() {
        let f = fixture().await;
        let service = BookingService::new(f.db.clone(), f.clock(), DEFAULT_PAGE_SIZE);
        service.database().close().await;

        let err = service.get_booking(1, BOOKER).await.unwrap_err();
        assert!(matches!(err, BookingError::Store(_)));
        assert_eq!(err.code(), ErrorCode::Internal);
    }

    #[tokio::test]
    async fn test_connect_with_config() {
        let config = BookingConfig {
            database_path: DbConfig::in_memory().database_path,
            max_connections: 1,
            default_page_size: 5,
        };
        let service = BookingService::connect(&config).await.unwrap();
        assert!(service.database().health_check().await);
    }
}
