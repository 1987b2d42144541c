use chrono::{Locale, NaiveDate, NaiveTime};

use crate::booking::Booking;

/// A booking paired with its display date.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub booking: Booking,
    pub display_date: String,
}

/// Newest first by creation time. Equal timestamps keep their input order.
pub fn sort_by_created_desc(bookings: &[Booking]) -> Vec<Booking> {
    let mut sorted = bookings.to_vec();
    sorted.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    sorted
}

/// Long-form Russian date: `2026-01-20` becomes `20 января 2026 г.`
///
/// Input that is not an ISO calendar date is returned unchanged.
pub fn format_long_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") {
        Ok(parsed) => parsed
            .and_time(NaiveTime::MIN)
            .and_utc()
            .format_localized("%-d %B %Y г.", Locale::ru_RU)
            .to_string(),
        Err(_) => date.to_string(),
    }
}

pub fn history_entries(bookings: &[Booking]) -> Vec<HistoryEntry> {
    sort_by_created_desc(bookings)
        .into_iter()
        .map(|booking| {
            let display_date = format_long_date(&booking.date);
            HistoryEntry {
                booking,
                display_date,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::BookingStatus;
    use chrono::{TimeZone, Utc};

    fn created(id: &str, y: i32, m: u32, d: u32) -> Booking {
        Booking::new(
            id,
            "Стрижка",
            "Мария",
            format!("{:04}-{:02}-{:02}", y, m, d),
            "12:00",
            BookingStatus::Confirmed,
            Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_sort_scenario() {
        let input = vec![
            created("a", 2025, 12, 10),
            created("b", 2026, 1, 10),
            created("c", 2025, 12, 28),
        ];
        let ids: Vec<_> = sort_by_created_desc(&input).into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_sort_is_non_increasing_permutation() {
        let input = vec![
            created("a", 2025, 3, 1),
            created("b", 2025, 11, 5),
            created("c", 2024, 7, 30),
            created("d", 2025, 11, 5),
            created("e", 2026, 2, 14),
        ];
        let sorted = sort_by_created_desc(&input);
        assert_eq!(sorted.len(), input.len());
        for pair in sorted.windows(2) {
            assert!(pair[0].created_at() >= pair[1].created_at());
        }
        for booking in &input {
            assert!(sorted.iter().any(|b| b.id == booking.id));
        }
        // ties keep input order
        let b_pos = sorted.iter().position(|b| b.id == "b").unwrap();
        let d_pos = sorted.iter().position(|b| b.id == "d").unwrap();
        assert!(b_pos < d_pos);
    }

    #[test]
    fn test_sort_empty() {
        assert!(sort_by_created_desc(&[]).is_empty());
    }

    #[test]
    fn test_format_long_date() {
        assert_eq!(format_long_date("2026-01-20"), "20 января 2026 г.");
        assert_eq!(format_long_date("2025-12-01"), "1 декабря 2025 г.");
        assert_eq!(format_long_date("2025-05-09"), "9 мая 2025 г.");
    }

    #[test]
    fn test_format_malformed_date_passthrough() {
        assert_eq!(format_long_date("завтра"), "завтра");
        assert_eq!(format_long_date(""), "");
        assert_eq!(format_long_date("2026-13-40"), "2026-13-40");
    }

    #[test]
    fn test_history_entries() {
        let input = vec![created("a", 2025, 12, 10), created("b", 2026, 1, 10)];
        let entries = history_entries(&input);
        assert_eq!(entries[0].booking.id, "b");
        assert_eq!(entries[0].display_date, "10 января 2026 г.");
        assert_eq!(entries[1].display_date, "10 декабря 2025 г.");
    }
}
