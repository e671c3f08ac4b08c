//! # Booking Query Engine
//!
//! Paged listings for the two sides of a booking.
//!
//! ## Request Handling (in order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  list_for_booker / list_for_owner (user, state, from, size)            │
//! │       │                                                                 │
//! │       ├── 1. PageRequest::from_params     → ValidationError            │
//! │       ├── 2. BookingState::parse           → UnsupportedState           │
//! │       ├── 3. user exists?                  → UserNotFound               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BookingRepository::list(role, user, state, clock.now(), page)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<Booking>, start descending                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::debug;

use shareit_core::{Booking, BookingRole, BookingState, Clock, CoreError, PageRequest, UserId};
use shareit_db::Database;

use crate::error::BookingResult;

/// Read side of the booking store.
#[derive(Clone)]
pub struct BookingQueryEngine {
    db: Database,
    clock: Arc<dyn Clock>,
    default_page_size: i64,
}

impl BookingQueryEngine {
    pub fn new(db: Database, clock: Arc<dyn Clock>, default_page_size: i64) -> Self {
        BookingQueryEngine {
            db,
            clock,
            default_page_size,
        }
    }

    /// Bookings made by `user_id`.
    pub async fn list_for_booker(
        &self,
        user_id: UserId,
        state: &str,
        from: Option<i64>,
        size: Option<i64>,
    ) -> BookingResult<Vec<Booking>> {
        self.list(BookingRole::Booker, user_id, state, from, size).await
    }

    /// Bookings of items owned by `user_id`.
    pub async fn list_for_owner(
        &self,
        user_id: UserId,
        state: &str,
        from: Option<i64>,
        size: Option<i64>,
    ) -> BookingResult<Vec<Booking>> {
        self.list(BookingRole::Owner, user_id, state, from, size).await
    }

    /// Every booking made by `user_id`, unpaged.
    pub async fn list_all_for_booker(&self, user_id: UserId) -> BookingResult<Vec<Booking>> {
        self.ensure_user(user_id).await?;
        Ok(self.db.bookings().list_all_for_booker(user_id).await?)
    }

    async fn list(
        &self,
        role: BookingRole,
        user_id: UserId,
        state: &str,
        from: Option<i64>,
        size: Option<i64>,
    ) -> BookingResult<Vec<Booking>> {
        let page = PageRequest::from_params(from, size, self.default_page_size)?;
        let state = BookingState::parse(state)?;
        self.ensure_user(user_id).await?;

        let bookings = self
            .db
            .bookings()
            .list(role, user_id, state, self.clock.now(), page)
            .await?;

        debug!(?role, user_id, state = %state, found = bookings.len(), "Bookings listed");
        Ok(bookings)
    }

    async fn ensure_user(&self, user_id: UserId) -> BookingResult<()> {
        if self.db.users().exists(user_id).await? {
            Ok(())
        } else {
            Err(CoreError::UserNotFound(user_id).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BookingError;
    use crate::testing::{fixture, t0, Fixture, BOOKER, OWNER, STRANGER};
    use chrono::Duration;
    use shareit_core::{BookingStatus, ValidationError, DEFAULT_PAGE_SIZE};

    fn engine(f: &Fixture) -> BookingQueryEngine {
        BookingQueryEngine::new(f.db.clone(), f.clock(), DEFAULT_PAGE_SIZE)
    }

    fn ids(bookings: &[Booking]) -> Vec<i64> {
        bookings.iter().map(|b| b.id).collect()
    }

    /// Past, current, future-waiting, and future-rejected bookings.
    async fn timeline(f: &Fixture) -> [i64; 4] {
        let h = Duration::hours;
        [
            f.stored(h(-48), h(-24), BookingStatus::Approved).await,
            f.stored(h(-1), h(1), BookingStatus::Approved).await,
            f.stored(h(24), h(48), BookingStatus::Waiting).await,
            f.stored(h(72), h(96), BookingStatus::Rejected).await,
        ]
    }

    #[tokio::test]
    async fn test_states_for_both_roles() {
        let f = fixture().await;
        let [past, current, waiting, rejected] = timeline(&f).await;
        let q = engine(&f);

        let cases = [
            ("ALL", vec![rejected, waiting, current, past]),
            ("current", vec![current]),
            ("Past", vec![past]),
            ("FUTURE", vec![rejected, waiting]),
            ("waiting", vec![waiting]),
            ("REJECTED", vec![rejected]),
        ];

        for (state, expected) in cases {
            let booker = q.list_for_booker(BOOKER, state, None, None).await.unwrap();
            assert_eq!(ids(&booker), expected, "booker {state}");

            let owner = q.list_for_owner(OWNER, state, None, None).await.unwrap();
            assert_eq!(ids(&owner), expected, "owner {state}");
        }

        assert!(q
            .list_for_owner(BOOKER, "ALL", None, None)
            .await
            .unwrap()
            .is_empty());
        assert!(q
            .list_for_booker(STRANGER, "ALL", None, None)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_state_sets_follow_the_clock() {
        let f = fixture().await;
        let [past, current, waiting, rejected] = timeline(&f).await;
        let q = engine(&f);

        // 30 hours on: current has ended, waiting is running.
        f.clock.advance(Duration::hours(30));
        let found = q.list_for_booker(BOOKER, "PAST", None, None).await.unwrap();
        assert_eq!(ids(&found), vec![current, past]);
        let found = q.list_for_booker(BOOKER, "CURRENT", None, None).await.unwrap();
        assert_eq!(ids(&found), vec![waiting]);
        let found = q.list_for_booker(BOOKER, "FUTURE", None, None).await.unwrap();
        assert_eq!(ids(&found), vec![rejected]);
    }

    #[tokio::test]
    async fn test_listing_matches_state_predicate() {
        let f = fixture().await;
        let statuses = [
            BookingStatus::Waiting,
            BookingStatus::Approved,
            BookingStatus::Rejected,
        ];
        for i in 0..18i64 {
            let start = Duration::hours(i * 7 - 60);
            let end = start + Duration::hours(1 + (i % 5) * 6);
            f.stored(start, end, statuses[(i % 3) as usize]).await;
        }

        let q = engine(&f);
        let everything = f.db.bookings().list_all_for_booker(BOOKER).await.unwrap();

        // Whole and sub-millisecond readings, some on booking bounds
        let readings = [
            t0(),
            t0() + Duration::hours(1),
            t0() + Duration::hours(1) + Duration::microseconds(250),
            t0() - Duration::hours(4) - Duration::nanoseconds(1),
        ];
        for now in readings {
            f.clock.set(now);
            for state in BookingState::ALL_STATES {
                let listed = q
                    .list_for_booker(BOOKER, state.as_str(), Some(0), Some(100))
                    .await
                    .unwrap();
                let expected: Vec<i64> = everything
                    .iter()
                    .filter(|b| state.matches(b, now))
                    .map(|b| b.id)
                    .collect();
                assert_eq!(ids(&listed), expected, "state {state} at {now}");
            }
        }
    }

    #[tokio::test]
    async fn test_sub_millisecond_clock() {
        let f = fixture().await;
        let ended = f
            .stored(Duration::hours(-2), Duration::hours(-1), BookingStatus::Approved)
            .await;
        let q = engine(&f);

        // Half a millisecond after the end
        f.clock.set(t0() - Duration::hours(1) + Duration::microseconds(500));
        let past = q.list_for_booker(BOOKER, "PAST", None, None).await.unwrap();
        assert_eq!(ids(&past), vec![ended]);
        let current = q.list_for_booker(BOOKER, "CURRENT", None, None).await.unwrap();
        assert!(current.is_empty());

        // Half a millisecond before the start
        f.clock.set(t0() - Duration::hours(2) - Duration::microseconds(500));
        let future = q.list_for_owner(OWNER, "FUTURE", None, None).await.unwrap();
        assert_eq!(ids(&future), vec![ended]);
        let current = q.list_for_owner(OWNER, "CURRENT", None, None).await.unwrap();
        assert!(current.is_empty());
    }

    #[tokio::test]
    async fn test_pagination() {
        let f = fixture().await;
        let mut all = Vec::new();
        for d in 1..=12 {
            let start = Duration::days(d);
            let id = f
                .stored(start, start + Duration::hours(2), BookingStatus::Waiting)
                .await;
            all.push(id);
        }
        all.reverse();
        let q = engine(&f);

        let first = q.list_for_booker(BOOKER, "ALL", None, None).await.unwrap();
        assert_eq!(ids(&first), all[..10]);

        let second = q.list_for_booker(BOOKER, "ALL", Some(10), None).await.unwrap();
        assert_eq!(ids(&second), all[10..]);

        // from is aligned down to a page boundary
        let aligned = q.list_for_booker(BOOKER, "ALL", Some(5), Some(4)).await.unwrap();
        assert_eq!(ids(&aligned), all[4..8]);
    }

    #[tokio::test]
    async fn test_invalid_paging() {
        let f = fixture().await;
        let q = engine(&f);

        let cases = [
            (Some(0), Some(0)),
            (None, Some(0)),
            (Some(-1), Some(5)),
            (Some(0), Some(-5)),
        ];
        for (from, size) in cases {
            let err = q.list_for_owner(OWNER, "ALL", from, size).await.unwrap_err();
            assert!(matches!(err, BookingError::Core(CoreError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_check_order() {
        let f = fixture().await;
        let q = engine(&f);

        // Paging beats state, state beats user lookup.
        let err = q.list_for_booker(999, "UNKNOWN", Some(0), Some(0)).await.unwrap_err();
        assert!(matches!(
            err,
            BookingError::Core(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));

        let err = q.list_for_booker(999, "UNKNOWN", None, None).await.unwrap_err();
        assert!(matches!(err, BookingError::Core(CoreError::UnsupportedState(ref s)) if s == "UNKNOWN"));

        let err = q.list_for_booker(999, "ALL", None, None).await.unwrap_err();
        assert!(matches!(err, BookingError::Core(CoreError::UserNotFound(999))));
    }

    #[tokio::test]
    async fn test_list_all_for_booker() {
        let f = fixture().await;
        let [past, current, waiting, rejected] = timeline(&f).await;
        let q = engine(&f);

        let all = q.list_all_for_booker(BOOKER).await.unwrap();
        assert_eq!(ids(&all), vec![rejected, waiting, current, past]);

        assert!(q.list_all_for_booker(OWNER).await.unwrap().is_empty());
        assert!(q.list_all_for_booker(999).await.is_err());
    }
}
