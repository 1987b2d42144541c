use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle tag of an appointment offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Offered,
    Confirmed,
    Declined,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Offered,
        BookingStatus::Confirmed,
        BookingStatus::Declined,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Offered => "offered",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Declined => "declined",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(BookingStatus::Pending),
            "offered" => Some(BookingStatus::Offered),
            "confirmed" => Some(BookingStatus::Confirmed),
            "declined" => Some(BookingStatus::Declined),
            _ => None,
        }
    }

    /// Whether moving to `to` follows pending -> offered -> confirmed | declined.
    ///
    /// Advisory only: status changes are never rejected, callers just log
    /// when a change falls outside this path.
    pub fn is_lifecycle_step(&self, to: BookingStatus) -> bool {
        matches!(
            (self, to),
            (BookingStatus::Pending, BookingStatus::Offered)
                | (BookingStatus::Offered, BookingStatus::Confirmed)
                | (BookingStatus::Offered, BookingStatus::Declined)
        )
    }
}

/// A single appointment record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub service: String,
    pub master: String,
    /// Calendar date as entered, e.g. `2026-01-20`
    pub date: String,
    /// Time of day as entered, e.g. `14:00`
    pub time: String,
    pub status: BookingStatus,
    created_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(
        id: impl Into<String>,
        service: impl Into<String>,
        master: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        status: BookingStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            service: service.into(),
            master: master.into(),
            date: date.into(),
            time: time.into(),
            status,
            created_at,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
