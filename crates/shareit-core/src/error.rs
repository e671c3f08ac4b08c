//! # Error Types
//!
//! Domain-specific error types for shareit-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shareit-core errors (this file)                                       │
//! │  ├── CoreError        - Booking rule violations                        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  shareit-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  shareit-booking errors (service crate)                                │
//! │  └── BookingError     - CoreError | DbError, with a stable code        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → BookingError → caller             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::{BookingId, BookingStatus, ItemId, UserId};

// =============================================================================
// Core Error
// =============================================================================

/// Booking rule violations.
///
/// Every variant carries enough context to build a human-readable message;
/// none of them is retried by the engine.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The referenced user does not exist.
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// The referenced item does not exist.
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    /// The referenced booking does not exist.
    #[error("Booking not found: {0}")]
    BookingNotFound(BookingId),

    /// The requester owns the item they are trying to book.
    #[error("User {user_id} owns the item and cannot book it")]
    OwnerConflict { user_id: UserId },

    /// The item is flagged as not available for booking.
    #[error("Item is not available for booking")]
    ItemUnavailable,

    /// The acting user is not allowed to decide on or view the booking.
    ///
    /// ## When This Occurs
    /// - Approval attempted by someone other than the item owner
    /// - Booking viewed by someone who is neither booker nor owner
    #[error("User {user_id} has no rights on booking {booking_id}")]
    NotOwner {
        user_id: UserId,
        booking_id: BookingId,
    },

    /// Approval requested for a booking that is already approved.
    #[error("Booking {0} is already approved")]
    AlreadyApproved(BookingId),

    /// A decision was requested on a booking that already left WAITING.
    #[error("Booking {booking_id} is already {status}")]
    AlreadyDecided {
        booking_id: BookingId,
        status: BookingStatus,
    },

    /// The state filter did not match any known state.
    #[error("Unknown state: {0}")]
    UnsupportedState(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any booking rule runs: malformed windows and bad paging.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing.
    #[error("{field} is required")]
    Required { field: String },

    /// One timestamp must strictly precede another.
    #[error("{field} must be before {other}")]
    NotBefore { field: String, other: String },

    /// The timestamp lies before the current clock reading.
    #[error("{field} must not be in the past")]
    InPast { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    Negative { field: String },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    pub(crate) fn in_past(field: &str) -> Self {
        ValidationError::InPast {
            field: field.to_string(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
