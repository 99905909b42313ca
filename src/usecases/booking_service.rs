//! Booking ledger: creates, looks up and cancels bookings.
//!
//! - Validates the request before any write; no partial bookings
//! - Serializes availability check + insert per room id (lock table)
//! - Assigns confirmation codes with a bounded collision retry

use crate::domain::{Booking, BookingRequest, DomainError};
use crate::ports::{BookingPort, BookingStore, RoomDirectory};
use crate::usecases::availability::AvailabilityChecker;
use crate::usecases::confirmation::ConfirmationCodes;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Booking ledger. Owns the authoritative booking set via its store handle;
/// stateless apart from that handle and the per-room lock table.
pub struct BookingLedger {
    bookings: Arc<dyn BookingStore>,
    availability: AvailabilityChecker,
    codes: Arc<dyn ConfirmationCodes>,
    /// Upper bound on confirmation-code generation attempts per booking.
    code_attempt_limit: u32,
    /// Per-room serialization of check-then-insert. Entry guards are held
    /// across the availability read and the booking write so two writers
    /// can never interleave on the same room.
    room_locks: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

impl BookingLedger {
    pub fn new(
        rooms: Arc<dyn RoomDirectory>,
        bookings: Arc<dyn BookingStore>,
        codes: Arc<dyn ConfirmationCodes>,
        code_attempt_limit: u32,
    ) -> Self {
        Self {
            availability: AvailabilityChecker::new(rooms, Arc::clone(&bookings)),
            bookings,
            codes,
            code_attempt_limit,
            room_locks: Mutex::new(HashMap::new()),
        }
    }

    async fn room_lock(&self, room_id: i64) -> Arc<Mutex<()>> {
        let mut locks = self.room_locks.lock().await;
        Arc::clone(
            locks
                .entry(room_id)
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }

    /// Request-shape validation. Runs before any storage access.
    fn validate_request(request: &BookingRequest) -> Result<(), DomainError> {
        if request.check_in >= request.check_out {
            return Err(DomainError::InvalidBookingRequest(
                "check-in date must come before check-out date".into(),
            ));
        }
        if request.guest_full_name.trim().is_empty() {
            return Err(DomainError::InvalidBookingRequest(
                "guest full name must not be empty".into(),
            ));
        }
        if request.guest_email.trim().is_empty() {
            return Err(DomainError::InvalidBookingRequest(
                "guest email must not be empty".into(),
            ));
        }
        if request.total_guests() < 1 {
            return Err(DomainError::InvalidBookingRequest(
                "at least one guest is required".into(),
            ));
        }
        Ok(())
    }

    /// Generate a code, re-check uniqueness against the store, insert.
    /// The store's uniqueness constraint is the last-resort guard: a
    /// `Conflict` from insert also triggers regeneration.
    async fn insert_with_fresh_code(
        &self,
        room_id: i64,
        request: &BookingRequest,
    ) -> Result<Booking, DomainError> {
        for attempt in 1..=self.code_attempt_limit {
            let code = self.codes.generate();
            if self.bookings.confirmation_code_exists(&code).await? {
                warn!(room_id, attempt, "confirmation code collision, regenerating");
                continue;
            }
            match self.bookings.insert_booking(room_id, request, &code).await {
                Ok(booking) => return Ok(booking),
                Err(DomainError::Conflict(reason)) => {
                    warn!(
                        room_id,
                        attempt, %reason, "confirmation code conflict on insert, regenerating"
                    );
                }
                Err(e) => return Err(e),
            }
        }
        Err(DomainError::Conflict(format!(
            "could not assign a unique confirmation code after {} attempts",
            self.code_attempt_limit
        )))
    }
}

#[async_trait::async_trait]
impl BookingPort for BookingLedger {
    /// Reserve a room for the requested stay.
    ///
    /// Validation order: request shape, then room existence, then
    /// availability, all before any write. The per-room lock is held from
    /// the availability read through the insert.
    async fn create_booking(
        &self,
        room_id: i64,
        request: BookingRequest,
    ) -> Result<String, DomainError> {
        Self::validate_request(&request)?;

        let lock = self.room_lock(room_id).await;
        let _guard = lock.lock().await;

        let available = self
            .availability
            .is_room_available(room_id, request.check_in, request.check_out)
            .await?;
        if !available {
            return Err(DomainError::InvalidBookingRequest(
                "room not available for selected date range".into(),
            ));
        }

        let booking = self.insert_with_fresh_code(room_id, &request).await?;
        info!(
            booking_id = booking.id,
            room_id,
            check_in = %booking.check_in,
            check_out = %booking.check_out,
            guests = booking.total_guests(),
            "booking confirmed"
        );
        Ok(booking.confirmation_code)
    }

    /// Cancel by booking id. Unknown ids fail with `BookingNotFound` so
    /// callers can tell "cancelled" from "never existed"; cancelling twice
    /// therefore reports not-found the second time.
    async fn cancel_booking(&self, booking_id: i64) -> Result<(), DomainError> {
        self.bookings.delete_booking(booking_id).await?;
        info!(booking_id, "booking cancelled");
        Ok(())
    }

    async fn get_all_bookings(&self) -> Result<Vec<Booking>, DomainError> {
        self.bookings.get_all_bookings().await
    }

    async fn find_by_confirmation_code(&self, code: &str) -> Result<Booking, DomainError> {
        self.bookings.find_by_confirmation_code(code).await
    }

    async fn get_bookings_for_room(&self, room_id: i64) -> Result<Vec<Booking>, DomainError> {
        self.bookings.get_bookings_for_room(room_id).await
    }
}
