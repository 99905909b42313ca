//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{Booking, BookingRequest, DomainError, Room};
use rust_decimal::Decimal;

/// Read-only room lookup. The booking core consults this and never
/// mutates rooms through it.
#[async_trait::async_trait]
pub trait RoomDirectory: Send + Sync {
    /// Cheap existence probe.
    async fn room_exists(&self, room_id: i64) -> Result<bool, DomainError>;

    /// Fetch one room. Fails with `RoomNotFound` when the id does not resolve.
    async fn get_room(&self, room_id: i64) -> Result<Room, DomainError>;

    /// All rooms, insertion order.
    async fn get_all_rooms(&self) -> Result<Vec<Room>, DomainError>;

    /// Distinct room category labels.
    async fn get_room_types(&self) -> Result<Vec<String>, DomainError>;
}

/// Staff-side room inventory writes. Kept separate from `RoomDirectory`
/// so the booking core only holds the read capability.
#[async_trait::async_trait]
pub trait RoomAdmin: Send + Sync {
    /// Insert a new room and return it with its storage-assigned id.
    async fn add_room(
        &self,
        room_type: &str,
        price: Decimal,
        photo_ref: Option<&str>,
    ) -> Result<Room, DomainError>;

    /// Overwrite a room's fields. Fails with `RoomNotFound` when absent.
    async fn update_room(&self, room: &Room) -> Result<(), DomainError>;

    /// Delete a room row. Fails with `RoomNotFound` when absent.
    /// Gating deletion against live bookings is the caller's responsibility.
    async fn delete_room(&self, room_id: i64) -> Result<(), DomainError>;
}

/// Booking persistence. The ledger owns the booking set exclusively and
/// serializes check-and-insert per room; implementations must map a
/// confirmation-code uniqueness violation to `DomainError::Conflict`.
#[async_trait::async_trait]
pub trait BookingStore: Send + Sync {
    /// Insert a validated booking and return it with its storage-assigned id.
    /// The confirmation code must be unique across all bookings.
    async fn insert_booking(
        &self,
        room_id: i64,
        request: &BookingRequest,
        confirmation_code: &str,
    ) -> Result<Booking, DomainError>;

    /// All bookings, insertion order.
    async fn get_all_bookings(&self) -> Result<Vec<Booking>, DomainError>;

    /// Active bookings for one room.
    async fn get_bookings_for_room(&self, room_id: i64) -> Result<Vec<Booking>, DomainError>;

    /// Guest-facing lookup. Fails with `BookingNotFound` on an unknown code.
    async fn find_by_confirmation_code(&self, code: &str) -> Result<Booking, DomainError>;

    /// True if any booking already carries this confirmation code.
    async fn confirmation_code_exists(&self, code: &str) -> Result<bool, DomainError>;

    /// Remove a booking row. Fails with `BookingNotFound` when absent.
    async fn delete_booking(&self, booking_id: i64) -> Result<(), DomainError>;
}
