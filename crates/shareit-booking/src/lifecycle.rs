//! # Booking Lifecycle
//!
//! Creation and the owner's one-time decision.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   create() ──► WAITING ──set_approval(true)──►  APPROVED                │
//! │                   │                                │                    │
//! │                   └──set_approval(false)─► REJECTED│                    │
//! │                                               │    │                    │
//! │   APPROVED + approve again  → AlreadyApproved │    │                    │
//! │   any other call once decided → AlreadyDecided ◄───┘                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The transition out of WAITING is a compare-and-set in the store. When two
//! decisions race, the loser re-reads the booking and reports the error the
//! winner's outcome implies.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use shareit_core::validation::{validate_booking_request, BookingCheck};
use shareit_core::{
    Booking, BookingId, BookingStatus, Clock, CoreError, ItemId, NewBooking, UserId,
};
use shareit_db::Database;

use crate::error::{BookingError, BookingResult};

/// Creates bookings and applies owner decisions.
#[derive(Clone)]
pub struct BookingLifecycle {
    db: Database,
    clock: Arc<dyn Clock>,
}

impl BookingLifecycle {
    pub fn new(db: Database, clock: Arc<dyn Clock>) -> Self {
        BookingLifecycle { db, clock }
    }

    /// Creates a WAITING booking of `item_id` for `requester_id`.
    ///
    /// ## Errors
    /// - `ItemNotFound` / `UserNotFound`
    /// - `Validation` for a missing, reversed, or past window
    /// - `OwnerConflict` when the requester owns the item
    /// - `ItemUnavailable` when the item is closed for booking
    pub async fn create(
        &self,
        item_id: ItemId,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        requester_id: UserId,
    ) -> BookingResult<Booking> {
        let item = self
            .db
            .items()
            .get_by_id(item_id)
            .await?
            .ok_or(CoreError::ItemNotFound(item_id))?;

        if !self.db.users().exists(requester_id).await? {
            return Err(CoreError::UserNotFound(requester_id).into());
        }

        let check = BookingCheck {
            start,
            end,
            item_owner_id: item.owner_id,
            requester_id,
            item_available: item.available,
        };
        let (start, end) = validate_booking_request(&check, self.clock.now())?;

        let id = self
            .db
            .bookings()
            .insert(&NewBooking {
                item_id,
                booker_id: requester_id,
                start,
                end,
                status: BookingStatus::Waiting,
            })
            .await?;

        info!(booking_id = id, item_id, booker_id = requester_id, "Booking created");

        self.fetch(id).await
    }

    /// Applies the owner's decision to a WAITING booking.
    ///
    /// ## Errors
    /// - `UserNotFound` / `BookingNotFound`
    /// - `NotOwner` unless `acting_user_id` owns the booked item
    /// - `AlreadyApproved` when approving an APPROVED booking
    /// - `AlreadyDecided` for any other call on a decided booking
    pub async fn set_approval(
        &self,
        booking_id: BookingId,
        approved: bool,
        acting_user_id: UserId,
    ) -> BookingResult<Booking> {
        if !self.db.users().exists(acting_user_id).await? {
            return Err(CoreError::UserNotFound(acting_user_id).into());
        }

        let booking = self.fetch(booking_id).await?;
        if booking.owner_id != acting_user_id {
            warn!(booking_id, acting_user_id, "Decision by non-owner refused");
            return Err(CoreError::NotOwner {
                user_id: acting_user_id,
                booking_id,
            }
            .into());
        }
        check_decidable(&booking, approved)?;

        let target = BookingStatus::decided(approved);
        if !self.db.bookings().decide(booking_id, target).await? {
            // Another decision landed between the read and the write.
            let current = self.fetch(booking_id).await?;
            check_decidable(&current, approved)?;
            return Err(CoreError::AlreadyDecided {
                booking_id,
                status: current.status,
            }
            .into());
        }

        info!(booking_id, status = %target, "Booking decided");

        Ok(Booking {
            status: target,
            ..booking
        })
    }

    /// Returns a booking to its booker or to the owner of the booked item.
    pub async fn get(&self, booking_id: BookingId, requester_id: UserId) -> BookingResult<Booking> {
        let booking = self.fetch(booking_id).await?;

        if !self.db.users().exists(requester_id).await? {
            return Err(CoreError::UserNotFound(requester_id).into());
        }

        if !booking.is_visible_to(requester_id) {
            return Err(CoreError::NotOwner {
                user_id: requester_id,
                booking_id,
            }
            .into());
        }

        Ok(booking)
    }

    async fn fetch(&self, booking_id: BookingId) -> BookingResult<Booking> {
        self.db
            .bookings()
            .get_by_id(booking_id)
            .await?
            .ok_or_else(|| CoreError::BookingNotFound(booking_id).into())
    }
}

/// Fails unless `booking` may still take the decision `approved`.
fn check_decidable(booking: &Booking, approved: bool) -> Result<(), BookingError> {
    match (booking.status, approved) {
        (BookingStatus::Waiting, _) => Ok(()),
        (BookingStatus::Approved, true) => {
            warn!(booking_id = booking.id, "Booking already approved");
            Err(CoreError::AlreadyApproved(booking.id).into())
        }
        (status, _) => {
            warn!(booking_id = booking.id, status = %status, "Booking already decided");
            Err(CoreError::AlreadyDecided {
                booking_id: booking.id,
                status,
            }
            .into())
        }
    }
}
