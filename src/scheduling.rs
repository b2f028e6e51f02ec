use chrono::{DateTime, NaiveDate, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

/// First bookable hour of the clinic day.
pub const OPENING_HOUR: u32 = 9;
/// First hour past the clinic day; the 17:00 slot itself is not bookable.
pub const CLOSING_HOUR: u32 = 17;

/// Slot
///
/// One hourly appointment opportunity. `display_time` is the human-facing
/// label ("9:00 AM") rendered server-side so every client agrees on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Slot {
    #[ts(type = "string")]
    pub time: DateTime<Utc>,
    pub display_time: String,
}

/// available_slots
///
/// Enumerates the open hourly slots for one psychologist on one calendar day.
/// A slot is taken iff some blocking appointment (the caller passes only
/// PENDING/CONFIRMED start times) begins at the same hour of that day.
/// With no bookings this yields exactly eight slots, 9:00 through 16:00.
///
/// Pure: the repository supplies the blocking start times, which keeps the
/// daily-window property directly testable.
pub fn available_slots(date: NaiveDate, booked: &[DateTime<Utc>]) -> Vec<Slot> {
    let mut slots = Vec::new();

    for hour in OPENING_HOUR..CLOSING_HOUR {
        let time = match date.and_hms_opt(hour, 0, 0) {
            Some(naive) => Utc.from_utc_datetime(&naive),
            None => continue,
        };

        let is_booked = booked
            .iter()
            .any(|apt| apt.date_naive() == date && apt.hour() == hour);

        if !is_booked {
            slots.push(Slot {
                time,
                display_time: format_slot(hour),
            });
        }
    }

    slots
}

/// 12-hour clock label for an on-the-hour slot.
fn format_slot(hour: u32) -> String {
    let (h12, meridiem) = match hour {
        0 => (12, "AM"),
        1..=11 => (hour, "AM"),
        12 => (12, "PM"),
        _ => (hour - 12, "PM"),
    };
    format!("{}:00 {}", h12, meridiem)
}

/// Bounds of the calendar day, for fetching that day's blocking appointments.
pub fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("midnight is valid"));
    let end = start + chrono::Duration::days(1);
    (start, end)
}
