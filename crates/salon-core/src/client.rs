use serde::{Deserialize, Serialize};

use crate::booking::Booking;

/// A client conversation: identity, last inbound message and their bookings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub is_new: bool,
    pub last_message: String,
    pub bookings: Vec<Booking>,
}

impl Client {
    /// The most recently created booking, if any.
    pub fn latest_booking(&self) -> Option<&Booking> {
        self.bookings.iter().max_by_key(|b| b.created_at())
    }

    /// Two-letter initials for the avatar slot
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase()
    }
}
