//! Seed data loaded at startup. Nothing here is persisted.

use chrono::{DateTime, NaiveDate, Utc};

use crate::actions::{Action, ActionGroup, ActionStatus, GroupColor, LoadRing};
use crate::booking::{Booking, BookingStatus};
use crate::client::Client;

pub const SEED_LOAD_PROGRESS: u8 = 44;

fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

pub fn clients() -> Vec<Client> {
    vec![
        Client {
            id: "1".into(),
            name: "Анна Смирнова".into(),
            is_new: false,
            last_message: "Здравствуйте! Можно записаться на стрижку на следующей неделе?".into(),
            bookings: vec![
                Booking::new(
                    "b1",
                    "Стрижка",
                    "Мария",
                    "2025-12-12",
                    "11:00",
                    BookingStatus::Confirmed,
                    at(2025, 12, 10, 9),
                ),
                Booking::new(
                    "b2",
                    "Окрашивание",
                    "Елена",
                    "2026-01-14",
                    "15:30",
                    BookingStatus::Offered,
                    at(2026, 1, 10, 18),
                ),
                Booking::new(
                    "b3",
                    "Укладка",
                    "Мария",
                    "2025-12-31",
                    "10:00",
                    BookingStatus::Declined,
                    at(2025, 12, 28, 12),
                ),
            ],
        },
        Client {
            id: "2".into(),
            name: "Ирина Волкова".into(),
            is_new: true,
            last_message: "Добрый день, есть свободное время на маникюр в субботу?".into(),
            bookings: Vec::new(),
        },
        Client {
            id: "3".into(),
            name: "Ольга Петрова".into(),
            is_new: false,
            last_message: "Спасибо, до встречи!".into(),
            bookings: vec![Booking::new(
                "b4",
                "Маникюр",
                "Светлана",
                "2026-01-22",
                "17:00",
                BookingStatus::Pending,
                at(2026, 1, 15, 8),
            )],
        },
    ]
}

fn action(id: &str, title: &str, description: &str, icon: &str, status: ActionStatus) -> Action {
    Action {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        icon: icon.into(),
        status,
    }
}

pub fn action_groups() -> Vec<ActionGroup> {
    vec![
        ActionGroup {
            title: "Действия".into(),
            subtitle: None,
            color: GroupColor::Red,
            actions: vec![action(
                "1",
                "No-show алерты",
                "Пинг опаздывающим / уточнить статус",
                "AlertTriangle",
                ActionStatus::Active,
            )],
        },
        ActionGroup {
            title: "Окна".into(),
            subtitle: Some("Заполнить экспресс-услугами".into()),
            color: GroupColor::Teal,
            actions: vec![
                action("2", "Запись быстрых услуг...", "", "Zap", ActionStatus::Active),
                action("3", "Передвижка встреч...", "", "MoveHorizontal", ActionStatus::Pending),
                action("4", "Назначение клиентов...", "", "Send", ActionStatus::Pending),
            ],
        },
        ActionGroup {
            title: "События (inbox)".into(),
            subtitle: None,
            color: GroupColor::Gray,
            actions: vec![
                action("5", "Клиент пришел", "", "UserCheck", ActionStatus::Completed),
                action("6", "Перенос", "", "Calendar", ActionStatus::Completed),
                action("7", "Риск no-show", "", "AlertCircle", ActionStatus::Completed),
            ],
        },
    ]
}

pub fn load_ring() -> LoadRing {
    LoadRing::new(SEED_LOAD_PROGRESS)
}
