//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: Called by the API layer into the application
//! - Outbound: Called by application into infrastructure

pub mod inbound;
pub mod outbound;

pub use inbound::{BookingPort, RoomPort};
pub use outbound::{BookingStore, RoomAdmin, RoomDirectory};
