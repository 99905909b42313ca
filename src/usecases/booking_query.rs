//! Read-only view assembly for the API layer.
//!
//! Joins bookings with their room's directory entry. Never mutates state.

use crate::domain::{Booking, DomainError, Room};
use crate::ports::{BookingStore, RoomDirectory};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

/// Room fields carried inside a booking view.
#[derive(Debug, Clone, Serialize)]
pub struct RoomSummary {
    pub id: i64,
    pub room_type: String,
    pub price: Decimal,
    pub has_photo: bool,
}

impl From<&Room> for RoomSummary {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id,
            room_type: room.room_type.clone(),
            price: room.price,
            has_photo: room.photo_ref.is_some(),
        }
    }
}

/// Response-ready booking shape: booking fields plus the resolved room.
#[derive(Debug, Clone, Serialize)]
pub struct BookingView {
    pub id: i64,
    pub check_in: chrono::NaiveDate,
    pub check_out: chrono::NaiveDate,
    pub guest_full_name: String,
    pub guest_email: String,
    pub adults: u32,
    pub children: u32,
    pub total_guests: u32,
    pub confirmation_code: String,
    pub room: RoomSummary,
}

/// Response-ready room shape for inventory listings. `booked` is derived
/// from the active booking set at read time.
#[derive(Debug, Clone, Serialize)]
pub struct RoomView {
    pub id: i64,
    pub room_type: String,
    pub price: Decimal,
    pub booked: bool,
    pub has_photo: bool,
}

/// Query facade over the room directory and the booking set.
pub struct BookingQueryService {
    rooms: Arc<dyn RoomDirectory>,
    bookings: Arc<dyn BookingStore>,
}

impl BookingQueryService {
    pub fn new(rooms: Arc<dyn RoomDirectory>, bookings: Arc<dyn BookingStore>) -> Self {
        Self { rooms, bookings }
    }

    /// Resolve the booking's room and assemble the view.
    ///
    /// The ownership invariant says the room should always resolve; a
    /// vanished room still surfaces as `RoomNotFound` rather than a panic.
    async fn assemble(&self, booking: Booking) -> Result<BookingView, DomainError> {
        let room = self.rooms.get_room(booking.room_id).await?;
        Ok(BookingView {
            id: booking.id,
            check_in: booking.check_in,
            check_out: booking.check_out,
            total_guests: booking.total_guests(),
            guest_full_name: booking.guest_full_name,
            guest_email: booking.guest_email,
            adults: booking.adults,
            children: booking.children,
            confirmation_code: booking.confirmation_code,
            room: RoomSummary::from(&room),
        })
    }

    /// Guest-facing lookup: confirmation code to full booking view.
    pub async fn booking_view_by_code(&self, code: &str) -> Result<BookingView, DomainError> {
        let booking = self.bookings.find_by_confirmation_code(code).await?;
        self.assemble(booking).await
    }

    /// All bookings as views, insertion order.
    pub async fn all_booking_views(&self) -> Result<Vec<BookingView>, DomainError> {
        let mut views = Vec::new();
        for booking in self.bookings.get_all_bookings().await? {
            views.push(self.assemble(booking).await?);
        }
        Ok(views)
    }

    /// One room with its derived booked flag.
    pub async fn room_view(&self, room_id: i64) -> Result<RoomView, DomainError> {
        let room = self.rooms.get_room(room_id).await?;
        let booked = !self.bookings.get_bookings_for_room(room_id).await?.is_empty();
        Ok(RoomView {
            id: room.id,
            room_type: room.room_type,
            price: room.price,
            booked,
            has_photo: room.photo_ref.is_some(),
        })
    }

    /// Full inventory listing with derived booked flags.
    pub async fn all_room_views(&self) -> Result<Vec<RoomView>, DomainError> {
        let mut views = Vec::new();
        for room in self.rooms.get_all_rooms().await? {
            let booked = !self
                .bookings
                .get_bookings_for_room(room.id)
                .await?
                .is_empty();
            views.push(RoomView {
                id: room.id,
                room_type: room.room_type,
                price: room.price,
                booked,
                has_photo: room.photo_ref.is_some(),
            });
        }
        Ok(views)
    }
}
