//! # Item Availability View
//!
//! Last and next booking of an item, as shown on item details.
//!
//! ```text
//!   ──── APPROVED ──── REJECTED ──── now ──── WAITING ──── APPROVED ────►
//!            ▲                               ▲
//!            last: APPROVED only,            next: any status,
//!            greatest start < now            smallest start > now
//! ```
//!
//! Without a last booking the next one is not reported either.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use shareit_core::{BookingSummary, Clock, CoreError, ItemBookings, ItemId, UserId};
use shareit_db::Database;

use crate::error::BookingResult;

/// Read-only projection of an item's bookings.
#[derive(Clone)]
pub struct ItemAvailabilityView {
    db: Database,
    clock: Arc<dyn Clock>,
}

impl ItemAvailabilityView {
    pub fn new(db: Database, clock: Arc<dyn Clock>) -> Self {
        ItemAvailabilityView { db, clock }
    }

    /// The APPROVED booking with the greatest start before `now`.
    pub async fn last_booking(
        &self,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> BookingResult<Option<BookingSummary>> {
        let booking = self.db.bookings().last_approved_before(item_id, now).await?;
        Ok(booking.map(|b| b.summary()))
    }

    /// The booking, of any status, with the smallest start after `now`.
    pub async fn next_booking(
        &self,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> BookingResult<Option<BookingSummary>> {
        let booking = self.db.bookings().next_after(item_id, now).await?;
        Ok(booking.map(|b| b.summary()))
    }

    /// Last and next booking of one item at the current clock reading.
    pub async fn for_item(&self, item_id: ItemId) -> BookingResult<ItemBookings> {
        self.at(item_id, self.clock.now()).await
    }

    /// Item details as `viewer_id` may see them: only the owner gets
    /// booking information.
    pub async fn for_viewer(&self, item_id: ItemId, viewer_id: UserId) -> BookingResult<ItemBookings> {
        let item = self
            .db
            .items()
            .get_by_id(item_id)
            .await?
            .ok_or(CoreError::ItemNotFound(item_id))?;

        if item.is_owned_by(viewer_id) {
            self.for_item(item_id).await
        } else {
            Ok(ItemBookings::empty(item_id))
        }
    }

    /// Bulk variant for an owner's item listing, in the order given.
    ///
    /// One clock reading serves the whole batch.
    pub async fn for_items(&self, item_ids: &[ItemId]) -> BookingResult<Vec<ItemBookings>> {
        let now = self.clock.now();
        let mut views = Vec::with_capacity(item_ids.len());
        for &item_id in item_ids {
            views.push(self.at(item_id, now).await?);
        }
        Ok(views)
    }

    /// Whether `user_id` has a booking of `item_id` that has already ended.
    ///
    /// ## Errors
    /// `UserNotFound`, then `ItemNotFound`, for unknown IDs.
    pub async fn has_completed_booking(&self, user_id: UserId, item_id: ItemId) -> BookingResult<bool> {
        if !self.db.users().exists(user_id).await? {
            return Err(CoreError::UserNotFound(user_id).into());
        }
        if self.db.items().get_by_id(item_id).await?.is_none() {
            return Err(CoreError::ItemNotFound(item_id).into());
        }

        Ok(self
            .db
            .bookings()
            .has_finished_booking(user_id, item_id, self.clock.now())
            .await?)
    }

    async fn at(&self, item_id: ItemId, now: DateTime<Utc>) -> BookingResult<ItemBookings> {
        let last = self.last_booking(item_id, now).await?;
        let next = self.next_booking(item_id, now).await?;
        Ok(ItemBookings::new(item_id, last, next))
    }
}
