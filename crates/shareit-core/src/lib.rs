//! # shareit-core: Pure Booking Rules for ShareIt
//!
//! This crate is the **heart** of the booking engine. It contains the booking
//! rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ShareIt Booking Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 shareit-booking (service layer)                 │   │
//! │  │   create_booking, set_approval, list_bookings_for_owner, ...   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ shareit-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   state   │  │   clock   │  │ validation│  │   │
//! │  │   │  Booking  │  │ ALL/PAST/ │  │  Clock    │  │  window   │  │   │
//! │  │   │  Item     │  │ FUTURE... │  │  trait    │  │  paging   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    shareit-db (Database Layer)                  │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Booking, Item, User, BookingStatus)
//! - [`state`] - Query-side state classification (ALL, CURRENT, PAST, ...)
//! - [`clock`] - Injected time source
//! - [`error`] - Domain error types
//! - [`validation`] - Booking window and pagination rules
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{Duration, Utc};
//! use shareit_core::validation::{validate_booking_request, BookingCheck};
//!
//! let now = Utc::now();
//! let check = BookingCheck {
//!     start: Some(now + Duration::hours(1)),
//!     end: Some(now + Duration::days(1)),
//!     item_owner_id: 3,
//!     requester_id: 7,
//!     item_available: true,
//! };
//! assert!(validate_booking_request(&check, now).is_ok());
//! ```

pub mod clock;
pub mod error;
pub mod state;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use clock::{ceil_to_millis, Clock, ManualClock, SystemClock};
pub use error::{CoreError, CoreResult, ValidationError};
pub use state::{BookingRole, BookingState};
pub use types::*;
pub use validation::PageRequest;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Page length used when a listing request omits `size`.
pub const DEFAULT_PAGE_SIZE: i64 = 10;
