pub mod actions;
pub mod booking;
pub mod client;
pub mod config;
pub mod draft;
pub mod error;
pub mod history;
pub mod mock;
pub mod router;
pub mod status;

// Re-export main types for convenience
pub use actions::{Action, ActionGroup, ActionStatus, GroupColor, LoadRing};
pub use booking::{Booking, BookingStatus};
pub use client::Client;
pub use config::Config;
pub use draft::{BookingDraft, DraftField};
pub use error::NavError;
pub use history::{format_long_date, history_entries, sort_by_created_desc, HistoryEntry};
pub use router::{AutoReturn, Screen, Session, Variant};
pub use status::{action_status_style, booking_status_style, StatusStyle, Tone};
