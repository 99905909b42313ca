//! Availability check: does a requested stay collide with any existing
//! booking for the room?
//!
//! Read-only. The result can go stale the moment it is returned; the
//! ledger holds the per-room lock across check + insert so staleness can
//! never produce a double booking.

use crate::domain::{intervals_overlap, DomainError};
use crate::ports::{BookingStore, RoomDirectory};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::debug;

/// Availability checker. Consults the room directory and the booking set.
pub struct AvailabilityChecker {
    rooms: Arc<dyn RoomDirectory>,
    bookings: Arc<dyn BookingStore>,
}

impl AvailabilityChecker {
    pub fn new(rooms: Arc<dyn RoomDirectory>, bookings: Arc<dyn BookingStore>) -> Self {
        Self { rooms, bookings }
    }

    /// True iff no active booking for `room_id` overlaps `[check_in, check_out)`.
    ///
    /// Fails with `RoomNotFound` when the room id does not resolve.
    /// Callers must pass `check_in < check_out`; the ledger validates this
    /// before delegating here.
    pub async fn is_room_available(
        &self,
        room_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<bool, DomainError> {
        if !self.rooms.room_exists(room_id).await? {
            return Err(DomainError::RoomNotFound(room_id));
        }

        let existing = self.bookings.get_bookings_for_room(room_id).await?;
        for booking in &existing {
            if intervals_overlap(check_in, check_out, booking.check_in, booking.check_out) {
                debug!(
                    room_id,
                    %check_in,
                    %check_out,
                    conflicting_booking = booking.id,
                    "requested range overlaps existing booking"
                );
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::memory::MemoryStore;
    use crate::domain::BookingRequest;
    use crate::ports::RoomAdmin;
    use rust_decimal::Decimal;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn request(check_in: &str, check_out: &str) -> BookingRequest {
        BookingRequest {
            check_in: d(check_in),
            check_out: d(check_out),
            guest_full_name: "Aliya Bekova".into(),
            guest_email: "aliya@example.com".into(),
            adults: 2,
            children: 0,
        }
    }

    async fn checker_with_booking() -> (AvailabilityChecker, i64) {
        let store = Arc::new(MemoryStore::new());
        let room = store
            .add_room("Deluxe", Decimal::new(15000, 2), None)
            .await
            .unwrap();
        store
            .insert_booking(room.id, &request("2024-06-01", "2024-06-05"), "code-1")
            .await
            .unwrap();
        let checker = AvailabilityChecker::new(store.clone(), store);
        (checker, room.id)
    }

    #[tokio::test]
    async fn test_unknown_room_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let checker = AvailabilityChecker::new(store.clone(), store);
        let err = checker
            .is_room_available(42, d("2024-06-01"), d("2024-06-02"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::RoomNotFound(42)));
    }

    #[tokio::test]
    async fn test_free_range_is_available() {
        let (checker, room_id) = checker_with_booking().await;
        assert!(checker
            .is_room_available(room_id, d("2024-07-01"), d("2024-07-03"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_back_to_back_is_available() {
        let (checker, room_id) = checker_with_booking().await;
        assert!(checker
            .is_room_available(room_id, d("2024-06-05"), d("2024-06-08"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_overlapping_range_is_unavailable() {
        let (checker, room_id) = checker_with_booking().await;
        assert!(!checker
            .is_room_available(room_id, d("2024-06-03"), d("2024-06-06"))
            .await
            .unwrap());
    }
}
