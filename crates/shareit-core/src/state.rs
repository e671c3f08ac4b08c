//! # Booking State Filter
//!
//! Query-side classification of bookings, distinct from [`BookingStatus`].
//!
//! ## Classification
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   time ──────────────────────── now ──────────────────────────────►     │
//! │                                  │                                      │
//! │   PAST     [start ─── end]       │            end < now                 │
//! │   CURRENT          [start ───────┼──── end]   start <= now <= end       │
//! │   FUTURE                         │   [start ─── end]   start > now      │
//! │                                                                         │
//! │   WAITING / REJECTED: status equals the named status                    │
//! │   ALL: no filter                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Raw filter strings are parsed once, at the boundary, into [`BookingState`];
//! everything past that point matches exhaustively on the enum.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::error::CoreError;
use crate::types::{Booking, BookingStatus, UserId};

/// Filter applied when listing bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BookingState {
    #[default]
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl BookingState {
    /// Every state, in declaration order.
    pub const ALL_STATES: [BookingState; 6] = [
        BookingState::All,
        BookingState::Current,
        BookingState::Past,
        BookingState::Future,
        BookingState::Waiting,
        BookingState::Rejected,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            BookingState::All => "ALL",
            BookingState::Current => "CURRENT",
            BookingState::Past => "PAST",
            BookingState::Future => "FUTURE",
            BookingState::Waiting => "WAITING",
            BookingState::Rejected => "REJECTED",
        }
    }

    /// Parses a filter string, ignoring ASCII case.
    ///
    /// ## Example
    /// ```rust
    /// use shareit_core::BookingState;
    ///
    /// assert_eq!(BookingState::parse("current").unwrap(), BookingState::Current);
    /// assert!(BookingState::parse("UNKNOWN").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        Self::ALL_STATES
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(raw))
            .ok_or_else(|| CoreError::UnsupportedState(raw.to_string()))
    }

    /// Whether `booking` belongs to this state at instant `now`.
    pub fn matches(&self, booking: &Booking, now: DateTime<Utc>) -> bool {
        match self {
            BookingState::All => true,
            BookingState::Current => booking.start <= now && now <= booking.end,
            BookingState::Past => booking.end < now,
            BookingState::Future => booking.start > now,
            BookingState::Waiting => booking.status == BookingStatus::Waiting,
            BookingState::Rejected => booking.status == BookingStatus::Rejected,
        }
    }
}

impl FromStr for BookingState {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingState::parse(s)
    }
}

impl fmt::Display for BookingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Booking Role
// =============================================================================

/// Side of the booking a listing is made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingRole {
    /// Bookings the user requested.
    Booker,
    /// Bookings of items the user owns.
    Owner,
}

impl BookingRole {
    /// Whether `user_id` plays this role in `booking`.
    pub fn matches(&self, booking: &Booking, user_id: UserId) -> bool {
        match self {
            BookingRole::Booker => booking.booker_id == user_id,
            BookingRole::Owner => booking.owner_id == user_id,
        }
    }
}
