//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Referenced room id does not exist. Surfaced to the caller, not retried.
    #[error("Room not found: {0}")]
    RoomNotFound(i64),

    /// Bad date range, unavailable room, or invalid guest data.
    /// Detected before any write; nothing is persisted.
    #[error("Invalid booking request: {0}")]
    InvalidBookingRequest(String),

    /// Staff-side room data failed validation (empty type, negative price).
    #[error("Invalid room: {0}")]
    InvalidRoom(String),

    /// Lookup or cancel of an unknown booking id / confirmation code.
    #[error("Booking not found: {0}")]
    BookingNotFound(String),

    /// Confirmation-code collision. The ledger retries generation a bounded
    /// number of times before surfacing this as fatal.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Underlying persistence failure. Never swallowed.
    #[error("Storage error: {0}")]
    Storage(String),
}
