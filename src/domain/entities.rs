//! Domain entities. Pure data structures for the core business.
//!
//! No storage/IO types here — these are mapped from adapters.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A bookable hotel room.
///
/// `photo_ref` is an opaque handle for an external photo store to resolve;
/// the core only ever reports whether one is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub room_type: String,
    pub price: Decimal,
    pub photo_ref: Option<String>,
}

/// A confirmed reservation of one room for a half-open date interval
/// `[check_in, check_out)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub room_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_full_name: String,
    pub guest_email: String,
    pub adults: u32,
    pub children: u32,
    /// Public, unique lookup key handed to the guest. Immutable once assigned.
    pub confirmation_code: String,
}

impl Booking {
    /// Total guest count. Always adults + children; never stored separately.
    pub fn total_guests(&self) -> u32 {
        self.adults + self.children
    }
}

/// An incoming reservation request, before validation and code assignment.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_full_name: String,
    pub guest_email: String,
    pub adults: u32,
    pub children: u32,
}

impl BookingRequest {
    pub fn total_guests(&self) -> u32 {
        self.adults + self.children
    }
}

/// Half-open interval overlap: `[a_in, a_out)` vs `[b_in, b_out)`.
///
/// Checkout on day X and a new check-in on day X do not overlap, so
/// back-to-back turnover is allowed.
pub fn intervals_overlap(
    a_in: NaiveDate,
    a_out: NaiveDate,
    b_in: NaiveDate,
    b_out: NaiveDate,
) -> bool {
    !(a_out <= b_in || a_in >= b_out)
}
