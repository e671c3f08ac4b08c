//! # shareit-booking: Booking Lifecycle and Queries
//!
//! Service layer of the ShareIt booking engine.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ShareIt Booking Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              ★ shareit-booking (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐  ┌────────────┐  ┌──────────────┐             │   │
//! │  │   │ lifecycle  │  │   query    │  │ availability │             │   │
//! │  │   │ create     │  │ by state,  │  │ last / next  │             │   │
//! │  │   │ approve    │  │ paginated  │  │ per item     │             │   │
//! │  │   └─────┬──────┘  └─────┬──────┘  └──────┬───────┘             │   │
//! │  │         └───────────────┼────────────────┘                     │   │
//! │  │                   BookingService                                │   │
//! │  └─────────────────────────┬───────────────────────────────────────┘   │
//! │                            │                                            │
//! │        ┌───────────────────┴───────────────────┐                       │
//! │        ▼                                       ▼                       │
//! │  shareit-core (rules, no I/O)           shareit-db (SQLite)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shareit_booking::{BookingConfig, BookingService};
//!
//! let service = BookingService::connect(&BookingConfig::from_env()?).await?;
//! let booking = service.create_booking(42, Some(start), Some(end), 7).await?;
//! let approved = service.set_approval(booking.id, true, 3).await?;
//! ```

pub mod availability;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod query;
pub mod service;

#[cfg(test)]
mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use availability::ItemAvailabilityView;
pub use config::{BookingConfig, ConfigError};
pub use error::{BookingError, BookingResult, ErrorCode, ErrorResponse};
pub use lifecycle::BookingLifecycle;
pub use query::BookingQueryEngine;
pub use service::BookingService;
