//! SQLite-backed store via libsql. Implements the room directory, room
//! admin and booking store ports over one database file.
//!
//! Single `hotel.db` file; rooms and bookings tables with a UNIQUE
//! constraint on `confirmation_code` as the last-resort collision guard.
//! Dates and prices are text-encoded in their canonical string forms.

use crate::domain::{Booking, BookingRequest, DomainError, Room};
use crate::ports::{BookingStore, RoomAdmin, RoomDirectory};
use chrono::NaiveDate;
use libsql::{params, Database, Row};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use tracing::info;

const ROOMS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS rooms (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    room_type TEXT NOT NULL,
    price TEXT NOT NULL,
    photo_ref TEXT
)"#;

const BOOKINGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS bookings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    room_id INTEGER NOT NULL REFERENCES rooms (id),
    check_in TEXT NOT NULL,
    check_out TEXT NOT NULL,
    guest_full_name TEXT NOT NULL,
    guest_email TEXT NOT NULL,
    adults INTEGER NOT NULL,
    children INTEGER NOT NULL,
    confirmation_code TEXT NOT NULL UNIQUE
)"#;

const BOOKINGS_ROOM_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_bookings_room ON bookings (room_id)";

/// SQLite store. One database file (hotel.db) in the given base directory.
pub struct SqliteStore {
    db: Database,
    db_path: PathBuf,
}

impl SqliteStore {
    /// Connect to (or create) the SQLite database and ensure the schema
    /// exists. Call this once at startup; the returned store is safe to
    /// share via Arc.
    ///
    /// Sets WAL mode and synchronous=NORMAL for concurrent read/write
    /// without sacrificing durability.
    pub async fn connect(base_dir: impl AsRef<Path>) -> Result<Self, DomainError> {
        let base = base_dir.as_ref();
        std::fs::create_dir_all(base).map_err(|e| DomainError::Storage(e.to_string()))?;
        let db_path = base.join("hotel.db");
        let path_str = db_path.to_string_lossy();
        let db = libsql::Builder::new_local(path_str.as_ref())
            .build()
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        let conn = db.connect().map_err(|e| DomainError::Storage(e.to_string()))?;

        // WAL enables concurrent readers + one writer. PRAGMA returns a row
        // (the new value); consume it via query (execute fails when rows
        // are returned).
        let mut wal_rows = conn
            .query("PRAGMA journal_mode=WAL", ())
            .await
            .map_err(|e| DomainError::Storage(format!("WAL pragma failed: {}", e)))?;
        while wal_rows
            .next()
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?
            .is_some()
        {}
        let mut sync_rows = conn
            .query("PRAGMA synchronous=NORMAL", ())
            .await
            .map_err(|e| DomainError::Storage(format!("synchronous pragma failed: {}", e)))?;
        while sync_rows
            .next()
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?
            .is_some()
        {}

        conn.execute(ROOMS_TABLE, ())
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        conn.execute(BOOKINGS_TABLE, ())
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        conn.execute(BOOKINGS_ROOM_INDEX, ())
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        info!(path = %db_path.display(), "SQLite connected with WAL mode");

        Ok(Self {
            db,
            db_path: db_path.to_path_buf(),
        })
    }

    /// Path of the backing database file.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn connect_conn(&self) -> Result<libsql::Connection, DomainError> {
        self.db
            .connect()
            .map_err(|e| DomainError::Storage(e.to_string()))
    }

    fn decode_room(row: &Row) -> Result<Room, DomainError> {
        let price_text: String = row.get(2).map_err(|e| DomainError::Storage(e.to_string()))?;
        let price: Decimal = price_text
            .parse()
            .map_err(|e| DomainError::Storage(format!("bad price column: {}", e)))?;
        Ok(Room {
            id: row.get(0).map_err(|e| DomainError::Storage(e.to_string()))?,
            room_type: row.get(1).map_err(|e| DomainError::Storage(e.to_string()))?,
            price,
            photo_ref: row.get(3).ok(),
        })
    }

    fn decode_booking(row: &Row) -> Result<Booking, DomainError> {
        let check_in: String = row.get(2).map_err(|e| DomainError::Storage(e.to_string()))?;
        let check_out: String = row.get(3).map_err(|e| DomainError::Storage(e.to_string()))?;
        let adults: i64 = row.get(6).map_err(|e| DomainError::Storage(e.to_string()))?;
        let children: i64 = row.get(7).map_err(|e| DomainError::Storage(e.to_string()))?;
        Ok(Booking {
            id: row.get(0).map_err(|e| DomainError::Storage(e.to_string()))?,
            room_id: row.get(1).map_err(|e| DomainError::Storage(e.to_string()))?,
            check_in: parse_date(&check_in)?,
            check_out: parse_date(&check_out)?,
            guest_full_name: row.get(4).map_err(|e| DomainError::Storage(e.to_string()))?,
            guest_email: row.get(5).map_err(|e| DomainError::Storage(e.to_string()))?,
            adults: adults as u32,
            children: children as u32,
            confirmation_code: row.get(8).map_err(|e| DomainError::Storage(e.to_string()))?,
        })
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, DomainError> {
    s.parse()
        .map_err(|e| DomainError::Storage(format!("bad date column: {}", e)))
}

/// Map a libsql execution error, routing uniqueness violations to
/// `Conflict` so the ledger can regenerate the confirmation code.
fn map_insert_error(e: libsql::Error) -> DomainError {
    let text = e.to_string();
    if text.contains("UNIQUE constraint failed") {
        DomainError::Conflict(text)
    } else {
        DomainError::Storage(text)
    }
}

#[async_trait::async_trait]
impl RoomDirectory for SqliteStore {
    async fn room_exists(&self, room_id: i64) -> Result<bool, DomainError> {
        let conn = self.connect_conn()?;
        let mut rows = conn
            .query("SELECT 1 FROM rooms WHERE id = ?1 LIMIT 1", params![room_id])
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        Ok(rows
            .next()
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?
            .is_some())
    }

    async fn get_room(&self, room_id: i64) -> Result<Room, DomainError> {
        let conn = self.connect_conn()?;
        let mut rows = conn
            .query(
                "SELECT id, room_type, price, photo_ref FROM rooms WHERE id = ?1",
                params![room_id],
            )
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        match rows
            .next()
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?
        {
            Some(row) => Self::decode_room(&row),
            None => Err(DomainError::RoomNotFound(room_id)),
        }
    }

    async fn get_all_rooms(&self) -> Result<Vec<Room>, DomainError> {
        let conn = self.connect_conn()?;
        let mut rows = conn
            .query(
                "SELECT id, room_type, price, photo_ref FROM rooms ORDER BY id",
                (),
            )
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        let mut rooms = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?
        {
            rooms.push(Self::decode_room(&row)?);
        }
        Ok(rooms)
    }

    async fn get_room_types(&self) -> Result<Vec<String>, DomainError> {
        let conn = self.connect_conn()?;
        let mut rows = conn
            .query("SELECT DISTINCT room_type FROM rooms ORDER BY room_type", ())
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        let mut types = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?
        {
            let room_type: String = row.get(0).map_err(|e| DomainError::Storage(e.to_string()))?;
            types.push(room_type);
        }
        Ok(types)
    }
}

#[async_trait::async_trait]
impl RoomAdmin for SqliteStore {
    async fn add_room(
        &self,
        room_type: &str,
        price: Decimal,
        photo_ref: Option<&str>,
    ) -> Result<Room, DomainError> {
        let conn = self.connect_conn()?;
        conn.execute(
            "INSERT INTO rooms (room_type, price, photo_ref) VALUES (?1, ?2, ?3)",
            params![room_type, price.to_string(), photo_ref],
        )
        .await
        .map_err(|e| DomainError::Storage(e.to_string()))?;
        let id = conn.last_insert_rowid();
        Ok(Room {
            id,
            room_type: room_type.to_string(),
            price,
            photo_ref: photo_ref.map(str::to_string),
        })
    }

    async fn update_room(&self, room: &Room) -> Result<(), DomainError> {
        let conn = self.connect_conn()?;
        let affected = conn
            .execute(
                "UPDATE rooms SET room_type = ?2, price = ?3, photo_ref = ?4 WHERE id = ?1",
                params![
                    room.id,
                    room.room_type.as_str(),
                    room.price.to_string(),
                    room.photo_ref.as_deref()
                ],
            )
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        if affected == 0 {
            return Err(DomainError::RoomNotFound(room.id));
        }
        Ok(())
    }

    async fn delete_room(&self, room_id: i64) -> Result<(), DomainError> {
        let conn = self.connect_conn()?;
        let affected = conn
            .execute("DELETE FROM rooms WHERE id = ?1", params![room_id])
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        if affected == 0 {
            return Err(DomainError::RoomNotFound(room_id));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl BookingStore for SqliteStore {
    async fn insert_booking(
        &self,
        room_id: i64,
        request: &BookingRequest,
        confirmation_code: &str,
    ) -> Result<Booking, DomainError> {
        let conn = self.connect_conn()?;
        conn.execute(
            r#"
            INSERT INTO bookings
                (room_id, check_in, check_out, guest_full_name, guest_email,
                 adults, children, confirmation_code)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                room_id,
                request.check_in.to_string(),
                request.check_out.to_string(),
                request.guest_full_name.as_str(),
                request.guest_email.as_str(),
                i64::from(request.adults),
                i64::from(request.children),
                confirmation_code
            ],
        )
        .await
        .map_err(map_insert_error)?;
        let id = conn.last_insert_rowid();
        Ok(Booking {
            id,
            room_id,
            check_in: request.check_in,
            check_out: request.check_out,
            guest_full_name: request.guest_full_name.clone(),
            guest_email: request.guest_email.clone(),
            adults: request.adults,
            children: request.children,
            confirmation_code: confirmation_code.to_string(),
        })
    }

    async fn get_all_bookings(&self) -> Result<Vec<Booking>, DomainError> {
        let conn = self.connect_conn()?;
        let mut rows = conn
            .query(
                r#"
                SELECT id, room_id, check_in, check_out, guest_full_name,
                       guest_email, adults, children, confirmation_code
                FROM bookings
                ORDER BY id
                "#,
                (),
            )
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        let mut bookings = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?
        {
            bookings.push(Self::decode_booking(&row)?);
        }
        Ok(bookings)
    }

    async fn get_bookings_for_room(&self, room_id: i64) -> Result<Vec<Booking>, DomainError> {
        let conn = self.connect_conn()?;
        let mut rows = conn
            .query(
                r#"
                SELECT id, room_id, check_in, check_out, guest_full_name,
                       guest_email, adults, children, confirmation_code
                FROM bookings
                WHERE room_id = ?1
                ORDER BY id
                "#,
                params![room_id],
            )
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        let mut bookings = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?
        {
            bookings.push(Self::decode_booking(&row)?);
        }
        Ok(bookings)
    }

    async fn find_by_confirmation_code(&self, code: &str) -> Result<Booking, DomainError> {
        let conn = self.connect_conn()?;
        let mut rows = conn
            .query(
                r#"
                SELECT id, room_id, check_in, check_out, guest_full_name,
                       guest_email, adults, children, confirmation_code
                FROM bookings
                WHERE confirmation_code = ?1
                "#,
                params![code],
            )
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        match rows
            .next()
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?
        {
            Some(row) => Self::decode_booking(&row),
            None => Err(DomainError::BookingNotFound(code.to_string())),
        }
    }

    async fn confirmation_code_exists(&self, code: &str) -> Result<bool, DomainError> {
        let conn = self.connect_conn()?;
        let mut rows = conn
            .query(
                "SELECT 1 FROM bookings WHERE confirmation_code = ?1 LIMIT 1",
                params![code],
            )
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        Ok(rows
            .next()
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?
            .is_some())
    }

    async fn delete_booking(&self, booking_id: i64) -> Result<(), DomainError> {
        let conn = self.connect_conn()?;
        let affected = conn
            .execute("DELETE FROM bookings WHERE id = ?1", params![booking_id])
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        if affected == 0 {
            return Err(DomainError::BookingNotFound(booking_id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    async fn store() -> (tempfile::TempDir, SqliteStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::connect(dir.path()).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_room_round_trip() {
        let (_dir, store) = store().await;
        let room = store
            .add_room("Deluxe", Decimal::new(15000, 2), Some("photos/3"))
            .await
            .unwrap();
        assert!(store.room_exists(room.id).await.unwrap());

        let fetched = store.get_room(room.id).await.unwrap();
        assert_eq!(fetched.room_type, "Deluxe");
        assert_eq!(fetched.price, Decimal::new(15000, 2));
        assert_eq!(fetched.photo_ref.as_deref(), Some("photos/3"));
    }

    #[tokio::test]
    async fn test_update_and_delete_room() {
        let (_dir, store) = store().await;
        let mut room = store
            .add_room("Deluxe", Decimal::new(15000, 2), None)
            .await
            .unwrap();
        room.price = Decimal::new(18000, 2);
        store.update_room(&room).await.unwrap();
        assert_eq!(
            store.get_room(room.id).await.unwrap().price,
            Decimal::new(18000, 2)
        );

        store.delete_room(room.id).await.unwrap();
        assert!(matches!(
            store.get_room(room.id).await.unwrap_err(),
            DomainError::RoomNotFound(_)
        ));
        assert!(matches!(
            store.delete_room(room.id).await.unwrap_err(),
            DomainError::RoomNotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_booking_round_trip_and_code_lookup() {
        let (_dir, store) = store().await;
        let room = store
            .add_room("Deluxe", Decimal::new(15000, 2), None)
            .await
            .unwrap();
        let booking = store
            .insert_booking(room.id, &request("2024-06-01", "2024-06-05"), "code-1")
            .await
            .unwrap();

        let fetched = store.find_by_confirmation_code("code-1").await.unwrap();
        assert_eq!(fetched.id, booking.id);
        assert_eq!(fetched.check_in, d("2024-06-01"));
        assert_eq!(fetched.check_out, d("2024-06-05"));
        assert_eq!(fetched.adults, 2);
        assert!(store.confirmation_code_exists("code-1").await.unwrap());
        assert!(!store.confirmation_code_exists("code-2").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_code_maps_to_conflict() {
        let (_dir, store) = store().await;
        let room = store
            .add_room("Deluxe", Decimal::new(15000, 2), None)
            .await
            .unwrap();
        store
            .insert_booking(room.id, &request("2024-06-01", "2024-06-05"), "dup")
            .await
            .unwrap();
        let err = store
            .insert_booking(room.id, &request("2024-07-01", "2024-07-05"), "dup")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_bookings_for_room_and_delete() {
        let (_dir, store) = store().await;
        let a = store
            .add_room("Standard", Decimal::new(8000, 2), None)
            .await
            .unwrap();
        let b = store
            .add_room("Deluxe", Decimal::new(15000, 2), None)
            .await
            .unwrap();
        let kept = store
            .insert_booking(a.id, &request("2024-06-01", "2024-06-05"), "one")
            .await
            .unwrap();
        let dropped = store
            .insert_booking(b.id, &request("2024-06-01", "2024-06-05"), "two")
            .await
            .unwrap();

        assert_eq!(store.get_bookings_for_room(a.id).await.unwrap().len(), 1);
        store.delete_booking(dropped.id).await.unwrap();
        assert!(matches!(
            store.delete_booking(dropped.id).await.unwrap_err(),
            DomainError::BookingNotFound(_)
        ));
        let all = store.get_all_bookings().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, kept.id);
    }

    #[tokio::test]
    async fn test_room_types_distinct() {
        let (_dir, store) = store().await;
        store
            .add_room("Deluxe", Decimal::new(15000, 2), None)
            .await
            .unwrap();
        store
            .add_room("Deluxe", Decimal::new(16000, 2), None)
            .await
            .unwrap();
        store
            .add_room("Suite", Decimal::new(30000, 2), None)
            .await
            .unwrap();
        assert_eq!(
            store.get_room_types().await.unwrap(),
            vec!["Deluxe".to_string(), "Suite".to_string()]
        );
    }
}
