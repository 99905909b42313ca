//! Application use cases. Orchestrate domain logic via ports.

pub mod availability;
pub mod booking_query;
pub mod booking_service;
pub mod confirmation;
pub mod room_service;

pub use availability::AvailabilityChecker;
pub use booking_query::{BookingQueryService, BookingView, RoomSummary, RoomView};
pub use booking_service::BookingLedger;
pub use confirmation::{ConfirmationCodes, UuidCodes};
pub use room_service::RoomService;
