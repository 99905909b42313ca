//! In-process store behind a `tokio::sync::RwLock`.
//!
//! Backs the test suites and serves as the fallback when no database
//! directory is configured. Implements the same uniqueness rules as the
//! SQLite store so the ledger sees identical behavior.

use crate::domain::{Booking, BookingRequest, DomainError, Room};
use crate::ports::{BookingStore, RoomAdmin, RoomDirectory};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Inner {
    rooms: BTreeMap<i64, Room>,
    bookings: BTreeMap<i64, Booking>,
    next_room_id: i64,
    next_booking_id: i64,
}

/// Shared-memory room directory and booking store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl RoomDirectory for MemoryStore {
    async fn room_exists(&self, room_id: i64) -> Result<bool, DomainError> {
        Ok(self.inner.read().await.rooms.contains_key(&room_id))
    }

    async fn get_room(&self, room_id: i64) -> Result<Room, DomainError> {
        self.inner
            .read()
            .await
            .rooms
            .get(&room_id)
            .cloned()
            .ok_or(DomainError::RoomNotFound(room_id))
    }

    async fn get_all_rooms(&self) -> Result<Vec<Room>, DomainError> {
        Ok(self.inner.read().await.rooms.values().cloned().collect())
    }

    async fn get_room_types(&self) -> Result<Vec<String>, DomainError> {
        let inner = self.inner.read().await;
        let mut types: Vec<String> = Vec::new();
        for room in inner.rooms.values() {
            if !types.contains(&room.room_type) {
                types.push(room.room_type.clone());
            }
        }
        Ok(types)
    }
}

#[async_trait::async_trait]
impl RoomAdmin for MemoryStore {
    async fn add_room(
        &self,
        room_type: &str,
        price: Decimal,
        photo_ref: Option<&str>,
    ) -> Result<Room, DomainError> {
        let mut inner = self.inner.write().await;
        inner.next_room_id += 1;
        let room = Room {
            id: inner.next_room_id,
            room_type: room_type.to_string(),
            price,
            photo_ref: photo_ref.map(str::to_string),
        };
        inner.rooms.insert(room.id, room.clone());
        Ok(room)
    }

    async fn update_room(&self, room: &Room) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;
        if !inner.rooms.contains_key(&room.id) {
            return Err(DomainError::RoomNotFound(room.id));
        }
        inner.rooms.insert(room.id, room.clone());
        Ok(())
    }

    async fn delete_room(&self, room_id: i64) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;
        inner
            .rooms
            .remove(&room_id)
            .map(|_| ())
            .ok_or(DomainError::RoomNotFound(room_id))
    }
}

#[async_trait::async_trait]
impl BookingStore for MemoryStore {
    async fn insert_booking(
        &self,
        room_id: i64,
        request: &BookingRequest,
        confirmation_code: &str,
    ) -> Result<Booking, DomainError> {
        let mut inner = self.inner.write().await;
        if inner
            .bookings
            .values()
            .any(|b| b.confirmation_code == confirmation_code)
        {
            return Err(DomainError::Conflict(format!(
                "confirmation code already in use: {confirmation_code}"
            )));
        }
        inner.next_booking_id += 1;
        let booking = Booking {
            id: inner.next_booking_id,
            room_id,
            check_in: request.check_in,
            check_out: request.check_out,
            guest_full_name: request.guest_full_name.clone(),
            guest_email: request.guest_email.clone(),
            adults: request.adults,
            children: request.children,
            confirmation_code: confirmation_code.to_string(),
        };
        inner.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn get_all_bookings(&self) -> Result<Vec<Booking>, DomainError> {
        Ok(self.inner.read().await.bookings.values().cloned().collect())
    }

    async fn get_bookings_for_room(&self, room_id: i64) -> Result<Vec<Booking>, DomainError> {
        Ok(self
            .inner
            .read()
            .await
            .bookings
            .values()
            .filter(|b| b.room_id == room_id)
            .cloned()
            .collect())
    }

    async fn find_by_confirmation_code(&self, code: &str) -> Result<Booking, DomainError> {
        self.inner
            .read()
            .await
            .bookings
            .values()
            .find(|b| b.confirmation_code == code)
            .cloned()
            .ok_or_else(|| DomainError::BookingNotFound(code.to_string()))
    }

    async fn confirmation_code_exists(&self, code: &str) -> Result<bool, DomainError> {
        Ok(self
            .inner
            .read()
            .await
            .bookings
            .values()
            .any(|b| b.confirmation_code == code))
    }

    async fn delete_booking(&self, booking_id: i64) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;
        inner
            .bookings
            .remove(&booking_id)
            .map(|_| ())
            .ok_or_else(|| DomainError::BookingNotFound(booking_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn request() -> BookingRequest {
        BookingRequest {
            check_in: d("2024-06-01"),
            check_out: d("2024-06-05"),
            guest_full_name: "Aliya Bekova".into(),
            guest_email: "aliya@example.com".into(),
            adults: 1,
            children: 0,
        }
    }

    #[tokio::test]
    async fn test_room_ids_are_assigned_sequentially() {
        let store = MemoryStore::new();
        let a = store
            .add_room("Standard", Decimal::new(8000, 2), None)
            .await
            .unwrap();
        let b = store
            .add_room("Deluxe", Decimal::new(15000, 2), None)
            .await
            .unwrap();
        assert!(b.id > a.id);
        assert!(store.room_exists(a.id).await.unwrap());
        assert!(!store.room_exists(999).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_confirmation_code_conflicts() {
        let store = MemoryStore::new();
        let room = store
            .add_room("Standard", Decimal::new(8000, 2), None)
            .await
            .unwrap();
        store
            .insert_booking(room.id, &request(), "dup")
            .await
            .unwrap();
        let err = store
            .insert_booking(room.id, &request(), "dup")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_bookings_filtered_by_room() {
        let store = MemoryStore::new();
        let a = store
            .add_room("Standard", Decimal::new(8000, 2), None)
            .await
            .unwrap();
        let b = store
            .add_room("Deluxe", Decimal::new(15000, 2), None)
            .await
            .unwrap();
        store.insert_booking(a.id, &request(), "one").await.unwrap();
        store.insert_booking(b.id, &request(), "two").await.unwrap();

        let for_a = store.get_bookings_for_room(a.id).await.unwrap();
        assert_eq!(for_a.len(), 1);
        assert_eq!(for_a[0].confirmation_code, "one");
        assert_eq!(store.get_all_bookings().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_booking_is_not_idempotent() {
        let store = MemoryStore::new();
        let room = store
            .add_room("Standard", Decimal::new(8000, 2), None)
            .await
            .unwrap();
        let booking = store
            .insert_booking(room.id, &request(), "one")
            .await
            .unwrap();
        store.delete_booking(booking.id).await.unwrap();
        assert!(matches!(
            store.delete_booking(booking.id).await.unwrap_err(),
            DomainError::BookingNotFound(_)
        ));
    }
}
