//! Inbound ports. The surrounding API layer calls into the application.

use crate::domain::{Booking, BookingRequest, DomainError, Room};
use rust_decimal::Decimal;

/// Booking lifecycle operations exposed to the API layer.
#[async_trait::async_trait]
pub trait BookingPort: Send + Sync {
    /// Reserve a room. Returns the confirmation code on success.
    async fn create_booking(
        &self,
        room_id: i64,
        request: BookingRequest,
    ) -> Result<String, DomainError>;

    /// Cancel a booking by id. Fails with `BookingNotFound` for unknown
    /// ids so callers can tell "cancelled" from "never existed".
    async fn cancel_booking(&self, booking_id: i64) -> Result<(), DomainError>;

    /// All bookings, insertion order.
    async fn get_all_bookings(&self) -> Result<Vec<Booking>, DomainError>;

    /// Guest-facing lookup by confirmation code.
    async fn find_by_confirmation_code(&self, code: &str) -> Result<Booking, DomainError>;

    /// Bookings for one room.
    async fn get_bookings_for_room(&self, room_id: i64) -> Result<Vec<Booking>, DomainError>;
}

/// Staff room inventory operations exposed to the API layer.
#[async_trait::async_trait]
pub trait RoomPort: Send + Sync {
    async fn add_room(
        &self,
        room_type: &str,
        price: Decimal,
        photo_ref: Option<&str>,
    ) -> Result<Room, DomainError>;

    /// Partial update: absent fields keep their current values.
    async fn update_room(
        &self,
        room_id: i64,
        room_type: Option<&str>,
        price: Option<Decimal>,
        photo_ref: Option<&str>,
    ) -> Result<Room, DomainError>;

    async fn delete_room(&self, room_id: i64) -> Result<(), DomainError>;

    async fn get_room(&self, room_id: i64) -> Result<Room, DomainError>;

    async fn get_all_rooms(&self) -> Result<Vec<Room>, DomainError>;

    async fn get_room_types(&self) -> Result<Vec<String>, DomainError>;
}
