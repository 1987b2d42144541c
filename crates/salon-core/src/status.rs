//! Display label and colour treatment for every status value.

use crate::actions::ActionStatus;
use crate::booking::BookingStatus;

/// Colour family a UI maps onto its own palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Amber,
    Blue,
    Green,
    Red,
    Teal,
    Muted,
    Dim,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    pub label: &'static str,
    pub tone: Tone,
}

pub fn booking_status_style(status: BookingStatus) -> StatusStyle {
    match status {
        BookingStatus::Pending => StatusStyle {
            label: "Ожидает",
            tone: Tone::Amber,
        },
        BookingStatus::Offered => StatusStyle {
            label: "Предложено",
            tone: Tone::Blue,
        },
        BookingStatus::Confirmed => StatusStyle {
            label: "Подтверждено",
            tone: Tone::Green,
        },
        BookingStatus::Declined => StatusStyle {
            label: "Отклонено",
            tone: Tone::Red,
        },
    }
}

pub fn action_status_style(status: ActionStatus) -> StatusStyle {
    match status {
        ActionStatus::Active => StatusStyle {
            label: "Активно",
            tone: Tone::Teal,
        },
        ActionStatus::Pending => StatusStyle {
            label: "В очереди",
            tone: Tone::Amber,
        },
        ActionStatus::Completed => StatusStyle {
            label: "Готово",
            tone: Tone::Muted,
        },
    }
}
