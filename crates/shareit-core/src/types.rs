//! # Domain Types
//!
//! Core domain types used throughout the booking engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │      Item       │   │    Booking      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  owner_id       │◄──│  item_id        │       │
//! │  │  name           │   │  available      │   │  booker_id ─────┼──►User│
//! │  │  email          │   │  name           │   │  start / end    │       │
//! │  └─────────────────┘   └─────────────────┘   │  status         │       │
//! │                                              └─────────────────┘       │
//! │                                                                         │
//! │  BookingStatus: WAITING ──► APPROVED                                    │
//! │                    └──────► REJECTED                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Users and items belong to collaborators; this crate only reads them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Identifier of a user.
pub type UserId = i64;

/// Identifier of an item.
pub type ItemId = i64;

/// Identifier of a booking.
pub type BookingId = i64;

// =============================================================================
// User / Item (collaborator records)
// =============================================================================

/// A registered user, either booker or owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// A shareable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Item {
    pub id: ItemId,
    pub owner_id: UserId,
    pub name: String,
    pub description: String,
    /// Whether new bookings may be requested.
    pub available: bool,
}

impl Item {
    /// Checks whether `user_id` owns this item.
    #[inline]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }
}

// =============================================================================
// Booking Status
// =============================================================================

/// Lifecycle stage of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum BookingStatus {
    /// Requested, waiting for the owner's decision.
    Waiting,
    /// Accepted by the owner.
    Approved,
    /// Declined by the owner.
    Rejected,
}

impl BookingStatus {
    /// Returns the canonical upper-case name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
        }
    }

    /// Status reached from WAITING for the given owner decision.
    pub const fn decided(approved: bool) -> Self {
        if approved {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        }
    }
}

impl Default for BookingStatus {
    fn default() -> Self {
        BookingStatus::Waiting
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Booking
// =============================================================================

/// A reservation of an item by a booker for a time window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Booking {
    pub id: BookingId,
    pub item_id: ItemId,
    /// Owner of the booked item, resolved when the booking was read.
    pub owner_id: UserId,
    pub booker_id: UserId,
    #[ts(as = "String")]
    pub start: DateTime<Utc>,
    #[ts(as = "String")]
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
}

impl Booking {
    /// Booker or item owner may see the booking.
    pub fn is_visible_to(&self, user_id: UserId) -> bool {
        self.booker_id == user_id || self.owner_id == user_id
    }

    /// Condensed form shown on item details.
    pub fn summary(&self) -> BookingSummary {
        BookingSummary {
            id: self.id,
            booker_id: self.booker_id,
            start: self.start,
            end: self.end,
            status: self.status,
        }
    }
}

/// A booking about to be persisted; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub item_id: ItemId,
    pub booker_id: UserId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
}

/// Booking as shown next to an item (last / next booking).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BookingSummary {
    pub id: BookingId,
    pub booker_id: UserId,
    #[ts(as = "String")]
    pub start: DateTime<Utc>,
    #[ts(as = "String")]
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
}

/// Last and next booking of one item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ItemBookings {
    pub item_id: ItemId,
    pub last_booking: Option<BookingSummary>,
    pub next_booking: Option<BookingSummary>,
}

impl ItemBookings {
    /// Pairs last and next, hiding `next` when there is no `last`.
    pub fn new(item_id: ItemId, last: Option<BookingSummary>, next: Option<BookingSummary>) -> Self {
        let next_booking = if last.is_some() { next } else { None };
        ItemBookings {
            item_id,
            last_booking: last,
            next_booking,
        }
    }

    /// View without any booking information.
    pub fn empty(item_id: ItemId) -> Self {
        ItemBookings {
            item_id,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn booking() -> Booking {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap();
        Booking {
            id: 1,
            item_id: 42,
            owner_id: 3,
            booker_id: 7,
            start,
            end: start + Duration::days(1),
            status: BookingStatus::Waiting,
        }
    }

    #[test]
    fn test_status_default_and_names() {
        assert_eq!(BookingStatus::default(), BookingStatus::Waiting);
        assert_eq!(BookingStatus::Approved.to_string(), "APPROVED");
        assert_eq!(BookingStatus::decided(true), BookingStatus::Approved);
        assert_eq!(BookingStatus::decided(false), BookingStatus::Rejected);
    }

    #[test]
    fn test_booking_visibility() {
        let b = booking();
        assert!(b.is_visible_to(7));
        assert!(b.is_visible_to(3));
        assert!(!b.is_visible_to(8));
    }

    #[test]
    fn test_booking_json_shape() {
        let json = serde_json::to_value(booking()).unwrap();
        assert_eq!(json["itemId"], 42);
        assert_eq!(json["bookerId"], 7);
        assert_eq!(json["status"], "WAITING");
        assert_eq!(json["start"], "2026-03-01T10:00:00Z");
    }

    #[test]
    fn test_item_bookings_hides_next_without_last() {
        let summary = booking().summary();
        let view = ItemBookings::new(42, None, Some(summary.clone()));
        assert!(view.next_booking.is_none());

        let view = ItemBookings::new(42, Some(summary.clone()), Some(summary));
        assert!(view.last_booking.is_some());
        assert!(view.next_booking.is_some());
    }
}
