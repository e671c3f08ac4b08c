//! # Service Error Type
//!
//! Unified error type for booking operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in ShareIt Booking                        │
//! │                                                                         │
//! │  BookingService::create_booking(...)                                   │
//! │         │                                                               │
//! │         ├── rule violated?   CoreError ──────────┐                      │
//! │         │                                        ▼                      │
//! │         ├── store failed?    DbError ──────► BookingError               │
//! │         │                                        │                      │
//! │         ▼                                        ▼                      │
//! │      Booking                          code() → ErrorCode                │
//! │                                       ErrorResponse { code, message }   │
//! │                                                                         │
//! │  The transport layer maps ErrorCode to its own status codes and         │
//! │  serializes ErrorResponse unchanged.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

use shareit_core::{CoreError, ValidationError};
use shareit_db::DbError;

/// Error returned by every booking operation.
#[derive(Debug, Error)]
pub enum BookingError {
    /// A booking rule rejected the request.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The store failed. Never retried.
    #[error(transparent)]
    Store(#[from] DbError),
}

impl From<ValidationError> for BookingError {
    fn from(err: ValidationError) -> Self {
        BookingError::Core(CoreError::Validation(err))
    }
}

/// Result type for booking operations.
pub type BookingResult<T> = Result<T, BookingError>;

/// Machine-readable error codes.
///
/// ## Suggested HTTP mapping
/// ```text
/// NOT_FOUND                          → 404
/// VALIDATION_ERROR, UNSUPPORTED_STATE,
/// ITEM_UNAVAILABLE, ALREADY_APPROVED,
/// ALREADY_DECIDED                    → 400
/// OWNER_CONFLICT, NOT_OWNER          → 404 / 403
/// INTERNAL                           → 500
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorCode {
    /// User, item, or booking does not exist
    NotFound,

    /// Malformed window or paging parameters
    ValidationError,

    /// Owner tried to book their own item
    OwnerConflict,

    /// Item is not open for booking
    ItemUnavailable,

    /// Acting user has no rights on the booking
    NotOwner,

    /// Booking is already approved
    AlreadyApproved,

    /// Booking already left WAITING
    AlreadyDecided,

    /// Unknown state filter
    UnsupportedState,

    /// Store failure
    Internal,
}

impl BookingError {
    /// Classifies the error.
    pub fn code(&self) -> ErrorCode {
        match self {
            BookingError::Core(err) => match err {
                CoreError::UserNotFound(_)
                | CoreError::ItemNotFound(_)
                | CoreError::BookingNotFound(_) => ErrorCode::NotFound,
                CoreError::OwnerConflict { .. } => ErrorCode::OwnerConflict,
                CoreError::ItemUnavailable => ErrorCode::ItemUnavailable,
                CoreError::NotOwner { .. } => ErrorCode::NotOwner,
                CoreError::AlreadyApproved(_) => ErrorCode::AlreadyApproved,
                CoreError::AlreadyDecided { .. } => ErrorCode::AlreadyDecided,
                CoreError::UnsupportedState(_) => ErrorCode::UnsupportedState,
                CoreError::Validation(_) => ErrorCode::ValidationError,
            },
            BookingError::Store(_) => ErrorCode::Internal,
        }
    }

    /// Builds the serializable response for this error.
    ///
    /// Store details stay in the logs; callers only see a generic message.
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            BookingError::Core(err) => err.to_string(),
            BookingError::Store(_) => "Internal storage error".to_string(),
        };
        ErrorResponse {
            code: self.code(),
            message,
        }
    }
}

/// Error as seen by clients.
///
/// ```json
/// {
///   "code": "UNSUPPORTED_STATE",
///   "message": "Unknown state: UNKNOWN"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ErrorResponse {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

impl From<BookingError> for ErrorResponse {
    fn from(err: BookingError) -> Self {
        err.to_response()
    }
}
