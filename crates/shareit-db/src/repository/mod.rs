//! # Repository Module
//!
//! Database repository implementations for the booking store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Layout                                    │
//! │                                                                         │
//! │  shareit-booking                                                       │
//! │       │                                                                 │
//! │       │  db.bookings().list(role, user, state, now, page)              │
//! │       ▼                                                                 │
//! │  BookingRepository                                                     │
//! │  ├── insert / get_by_id                                                │
//! │  ├── decide          (WAITING → APPROVED | REJECTED, atomic)           │
//! │  ├── list            (booker or owner side, state filter, paged)       │
//! │  └── last_approved_before / next_after                                 │
//! │                                                                         │
//! │  ItemRepository / UserRepository                                       │
//! │  └── lookups of collaborator records                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`BookingRepository`](booking::BookingRepository) - Booking storage and listings
//! - [`ItemRepository`](item::ItemRepository) - Item lookups
//! - [`UserRepository`](user::UserRepository) - User lookups

use chrono::{DateTime, Utc};

use crate::error::{DbError, DbResult};

pub mod booking;
pub mod item;
pub mod user;

/// Converts a stored millisecond timestamp back into a UTC instant.
pub(crate) fn from_millis(ms: i64) -> DbResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| DbError::Internal(format!("timestamp out of range: {ms}")))
}
