//! Screen navigation for the booking assistant.
//!
//! A [`Session`] owns the current screen, the booking draft and the booking
//! status shown in chat. Every change goes through a named transition; a
//! transition asked for from the wrong screen is rejected and leaves the
//! session untouched. "Back" transitions always land on one fixed screen,
//! there is no history stack.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::booking::BookingStatus;
use crate::draft::{BookingDraft, DraftField};
use crate::error::NavError;

/// How long the result screen stays up before returning to chat.
pub const DEFAULT_RESULT_DELAY: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Dashboard,
    Chat,
    Inbox,
    Client,
    Booking,
    Result,
    History,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Dashboard => "Панель",
            Screen::Chat => "Чат",
            Screen::Inbox => "Входящие",
            Screen::Client => "Карточка клиента",
            Screen::Booking => "Предложить время",
            Screen::Result => "Готово",
            Screen::History => "История записей",
        }
    }
}

/// Which screen set is wired in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Loading ring and action groups only
    Dashboard,
    /// Chat, inbox and the booking flow
    Basic,
    /// Adds the client card and booking history
    #[default]
    Full,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Dashboard => "dashboard",
            Variant::Basic => "basic",
            Variant::Full => "full",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dashboard" => Some(Variant::Dashboard),
            "basic" => Some(Variant::Basic),
            "full" => Some(Variant::Full),
            _ => None,
        }
    }

    pub fn all() -> Vec<Variant> {
        vec![Variant::Dashboard, Variant::Basic, Variant::Full]
    }

    pub fn screens(&self) -> &'static [Screen] {
        match self {
            Variant::Dashboard => &[Screen::Dashboard],
            Variant::Basic => &[Screen::Chat, Screen::Inbox, Screen::Booking, Screen::Result],
            Variant::Full => &[
                Screen::Chat,
                Screen::Inbox,
                Screen::Client,
                Screen::Booking,
                Screen::Result,
                Screen::History,
            ],
        }
    }

    pub fn has_screen(&self, screen: Screen) -> bool {
        self.screens().contains(&screen)
    }

    pub fn default_screen(&self) -> Screen {
        match self {
            Variant::Dashboard => Screen::Dashboard,
            Variant::Basic => Screen::Inbox,
            Variant::Full => Screen::Chat,
        }
    }
}

/// Issued on submit: fire [`Session::finish_result`] with `ticket` after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoReturn {
    pub ticket: u64,
    pub delay: Duration,
}

#[derive(Debug, Clone)]
pub struct Session {
    variant: Variant,
    screen: Screen,
    draft: BookingDraft,
    status: BookingStatus,
    result_delay: Duration,
    live_ticket: Option<u64>,
    next_ticket: u64,
}

impl Session {
    pub fn new(variant: Variant) -> Self {
        Self::with_delay(variant, DEFAULT_RESULT_DELAY)
    }

    pub fn with_delay(variant: Variant, result_delay: Duration) -> Self {
        Self {
            variant,
            screen: variant.default_screen(),
            draft: BookingDraft::default(),
            status: BookingStatus::Pending,
            result_delay,
            live_ticket: None,
            next_ticket: 1,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn result_delay(&self) -> Duration {
        self.result_delay
    }

    /// Ticket of the outstanding auto-return, if one is scheduled.
    pub fn pending_return(&self) -> Option<u64> {
        self.live_ticket
    }

    fn transition(&mut self, action: &'static str, from: Screen, to: Screen) -> Result<(), NavError> {
        if self.screen != from {
            return Err(NavError::NotAvailable {
                action,
                from: self.screen,
            });
        }
        if !self.variant.has_screen(to) {
            return Err(NavError::ScreenMissing {
                variant: self.variant,
                screen: to,
            });
        }
        tracing::info!(action, ?from, ?to, "screen transition");
        self.screen = to;
        Ok(())
    }

    /// Chat -> booking form ("offer time").
    pub fn offer_time(&mut self) -> Result<(), NavError> {
        self.transition("offer_time", Screen::Chat, Screen::Booking)
    }

    /// Chat -> client card.
    pub fn open_client(&mut self) -> Result<(), NavError> {
        self.transition("open_client", Screen::Chat, Screen::Client)
    }

    /// Inbox -> booking form.
    pub fn book_from_inbox(&mut self) -> Result<(), NavError> {
        self.transition("book_from_inbox", Screen::Inbox, Screen::Booking)
    }

    /// Client card -> chat.
    pub fn close_client(&mut self) -> Result<(), NavError> {
        self.transition("close_client", Screen::Client, Screen::Chat)
    }

    /// Client card -> booking form.
    pub fn book_from_client(&mut self) -> Result<(), NavError> {
        self.transition("book_from_client", Screen::Client, Screen::Booking)
    }

    /// Client card -> booking history.
    pub fn open_history(&mut self) -> Result<(), NavError> {
        self.transition("open_history", Screen::Client, Screen::History)
    }

    /// Booking history -> client card.
    pub fn close_history(&mut self) -> Result<(), NavError> {
        self.transition("close_history", Screen::History, Screen::Client)
    }

    /// Replace one draft field, keeping the other three.
    pub fn edit_draft(&mut self, field: DraftField, value: impl Into<String>) -> Result<(), NavError> {
        if self.screen != Screen::Booking {
            return Err(NavError::NotAvailable {
                action: "edit_draft",
                from: self.screen,
            });
        }
        self.draft = self.draft.with_field(field, value);
        Ok(())
    }

    /// Set the booking status directly. Every status is accepted from every
    /// other one; off-lifecycle changes are only logged.
    pub fn set_status(&mut self, status: BookingStatus) {
        if self.status != status && !self.status.is_lifecycle_step(status) {
            tracing::warn!(
                from = self.status.as_str(),
                to = status.as_str(),
                "status change outside the offer lifecycle"
            );
        }
        self.status = status;
    }

    /// Submit the draft as an offer. Always succeeds from the booking form,
    /// whatever the draft holds.
    pub fn submit_booking(&mut self) -> Result<AutoReturn, NavError> {
        self.transition("submit_booking", Screen::Booking, Screen::Result)?;
        self.status = BookingStatus::Offered;

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.live_ticket = Some(ticket);

        tracing::info!(
            ticket,
            service = %self.draft.service,
            master = %self.draft.master,
            date = %self.draft.date,
            time = %self.draft.time,
            "booking offered"
        );

        Ok(AutoReturn {
            ticket,
            delay: self.result_delay,
        })
    }

    /// Result -> chat, for the ticket issued by the last submit.
    pub fn finish_result(&mut self, ticket: u64) -> Result<(), NavError> {
        if self.live_ticket != Some(ticket) {
            return Err(NavError::StaleTicket(ticket));
        }
        self.transition("finish_result", Screen::Result, Screen::Chat)?;
        self.live_ticket = None;
        Ok(())
    }

    /// Drop the outstanding auto-return so a late timer cannot fire.
    pub fn cancel_auto_return(&mut self) -> Option<u64> {
        let ticket = self.live_ticket.take();
        if let Some(ticket) = ticket {
            tracing::debug!(ticket, "auto-return cancelled");
        }
        ticket
    }
}
