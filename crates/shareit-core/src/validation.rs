//! # Validation Module
//!
//! The single place where booking requests and listing parameters are
//! checked. Callers at the edge only reshape the resulting errors.
//!
//! ## Booking Request Checks (in order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  validate_booking_request(check, now)                                   │
//! │       │                                                                 │
//! │       ├── start / end missing?        → ValidationError::Required       │
//! │       ├── round both up to whole ms                                     │
//! │       ├── start >= end?               → ValidationError::NotBefore      │
//! │       ├── start < now?                → ValidationError::InPast         │
//! │       ├── end < now?                  → ValidationError::InPast         │
//! │       ├── requester owns the item?    → CoreError::OwnerConflict        │
//! │       ├── item not available?         → CoreError::ItemUnavailable      │
//! │       │                                                                 │
//! │       └── OK → booking may be stored as WAITING                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `now` is always passed in by the caller, sampled from a
//! [`Clock`](crate::clock::Clock) for the request being validated.

use chrono::{DateTime, Utc};

use crate::clock::ceil_to_millis;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::UserId;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Booking Request
// =============================================================================

/// Everything the validator needs to judge a creation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingCheck {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub item_owner_id: UserId,
    pub requester_id: UserId,
    pub item_available: bool,
}

/// Validates a booking creation request against the clock reading `now`.
///
/// Returns the checked `(start, end)` window at storage precision.
///
/// ## Example
/// ```rust
/// use chrono::{Duration, Utc};
/// use shareit_core::validation::{validate_booking_request, BookingCheck};
/// use shareit_core::CoreError;
///
/// let now = Utc::now();
/// let check = BookingCheck {
///     start: Some(now + Duration::hours(1)),
///     end: Some(now + Duration::days(1)),
///     item_owner_id: 3,
///     requester_id: 3,
///     item_available: true,
/// };
/// let err = validate_booking_request(&check, now).unwrap_err();
/// assert!(matches!(err, CoreError::OwnerConflict { user_id: 3 }));
/// ```
pub fn validate_booking_request(
    check: &BookingCheck,
    now: DateTime<Utc>,
) -> CoreResult<(DateTime<Utc>, DateTime<Utc>)> {
    let window = validate_window(check.start, check.end, now)?;

    if check.requester_id == check.item_owner_id {
        return Err(CoreError::OwnerConflict {
            user_id: check.requester_id,
        });
    }

    if !check.item_available {
        return Err(CoreError::ItemUnavailable);
    }

    Ok(window)
}

/// Validates a booking time window.
///
/// ## Rules
/// - Both ends are required
/// - Both ends are rounded up to whole milliseconds; the rules below apply
///   to the rounded window, which is also what is returned
/// - `start` strictly before `end`
/// - Neither end before `now` (`start == now` is accepted)
pub fn validate_window(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> ValidationResult<(DateTime<Utc>, DateTime<Utc>)> {
    let start = ceil_to_millis(start.ok_or_else(|| ValidationError::required("start"))?);
    let end = ceil_to_millis(end.ok_or_else(|| ValidationError::required("end"))?);

    if start >= end {
        return Err(ValidationError::NotBefore {
            field: "start".to_string(),
            other: "end".to_string(),
        });
    }

    if start < now {
        return Err(ValidationError::in_past("start"));
    }

    if end < now {
        return Err(ValidationError::in_past("end"));
    }

    Ok((start, end))
}

// =============================================================================
// Pagination
// =============================================================================

/// A validated page of results.
///
/// `from` is an offset in result units, but pages are aligned to `size`:
/// the page index is `from / size`, so `from = 5, size = 10` reads the
/// first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Rows to skip.
    pub offset: i64,
    /// Rows to return.
    pub limit: i64,
}

impl PageRequest {
    /// Builds a page from optional `from` / `size` parameters.
    ///
    /// ## Rules
    /// - Omitted `from` → 0, omitted `size` → `default_size`
    /// - Negative `from` or `size` → `ValidationError::Negative`
    /// - `size == 0` → `ValidationError::MustBePositive`
    ///
    /// ## Example
    /// ```rust
    /// use shareit_core::PageRequest;
    ///
    /// let page = PageRequest::from_params(Some(25), Some(10), 10).unwrap();
    /// assert_eq!(page.offset, 20);
    /// assert_eq!(page.limit, 10);
    ///
    /// assert!(PageRequest::from_params(Some(0), Some(0), 10).is_err());
    /// ```
    pub fn from_params(
        from: Option<i64>,
        size: Option<i64>,
        default_size: i64,
    ) -> ValidationResult<Self> {
        let from = from.unwrap_or(0);
        let size = size.unwrap_or(default_size);

        if from < 0 {
            return Err(ValidationError::Negative {
                field: "from".to_string(),
            });
        }

        if size < 0 {
            return Err(ValidationError::Negative {
                field: "size".to_string(),
            });
        }

        if size == 0 {
            return Err(ValidationError::MustBePositive {
                field: "size".to_string(),
            });
        }

        let page = from / size;
        Ok(PageRequest {
            offset: page * size,
            limit: size,
        })
    }

    /// Zero-based page index.
    pub fn page_index(&self) -> i64 {
        self.offset / self.limit
    }
}
