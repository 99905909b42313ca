//! Staff room inventory management.
//!
//! Feeds the room directory the booking core reads from. Deleting a room
//! with live bookings is not gated here; that policy belongs to the caller.

use crate::domain::{DomainError, Room};
use crate::ports::{RoomAdmin, RoomDirectory, RoomPort};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

pub struct RoomService {
    directory: Arc<dyn RoomDirectory>,
    admin: Arc<dyn RoomAdmin>,
}

impl RoomService {
    pub fn new(directory: Arc<dyn RoomDirectory>, admin: Arc<dyn RoomAdmin>) -> Self {
        Self { directory, admin }
    }

    fn validate_room_fields(room_type: &str, price: Decimal) -> Result<(), DomainError> {
        if room_type.trim().is_empty() {
            return Err(DomainError::InvalidRoom("room type must not be empty".into()));
        }
        if price < Decimal::ZERO {
            return Err(DomainError::InvalidRoom(
                "room price must not be negative".into(),
            ));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl RoomPort for RoomService {
    async fn add_room(
        &self,
        room_type: &str,
        price: Decimal,
        photo_ref: Option<&str>,
    ) -> Result<Room, DomainError> {
        Self::validate_room_fields(room_type, price)?;
        let room = self.admin.add_room(room_type, price, photo_ref).await?;
        info!(room_id = room.id, room_type, %price, "room added");
        Ok(room)
    }

    /// Partial update: absent fields keep their current values.
    async fn update_room(
        &self,
        room_id: i64,
        room_type: Option<&str>,
        price: Option<Decimal>,
        photo_ref: Option<&str>,
    ) -> Result<Room, DomainError> {
        let mut room = self.directory.get_room(room_id).await?;
        if let Some(t) = room_type {
            room.room_type = t.to_string();
        }
        if let Some(p) = price {
            room.price = p;
        }
        if let Some(photo) = photo_ref {
            room.photo_ref = Some(photo.to_string());
        }
        Self::validate_room_fields(&room.room_type, room.price)?;
        self.admin.update_room(&room).await?;
        info!(room_id, "room updated");
        Ok(room)
    }

    async fn delete_room(&self, room_id: i64) -> Result<(), DomainError> {
        self.admin.delete_room(room_id).await?;
        info!(room_id, "room deleted");
        Ok(())
    }

    async fn get_room(&self, room_id: i64) -> Result<Room, DomainError> {
        self.directory.get_room(room_id).await
    }

    async fn get_all_rooms(&self) -> Result<Vec<Room>, DomainError> {
        self.directory.get_all_rooms().await
    }

    async fn get_room_types(&self) -> Result<Vec<String>, DomainError> {
        self.directory.get_room_types().await
    }
}
