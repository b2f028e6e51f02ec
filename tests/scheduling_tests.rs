use calme_portal::scheduling::{CLOSING_HOUR, OPENING_HOUR, available_slots, day_bounds};
use chrono::{NaiveDate, TimeZone, Timelike, Utc};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn empty_day_yields_exactly_eight_hourly_slots() {
    let slots = available_slots(day(2025, 6, 2), &[]);

    assert_eq!(slots.len(), 8);
    assert_eq!(slots.first().unwrap().time.hour(), OPENING_HOUR);
    // Last bookable slot starts one hour before closing.
    assert_eq!(slots.last().unwrap().time.hour(), CLOSING_HOUR - 1);

    // Strictly hourly, on the hour.
    for (i, slot) in slots.iter().enumerate() {
        assert_eq!(slot.time.hour(), OPENING_HOUR + i as u32);
        assert_eq!(slot.time.minute(), 0);
    }
}

#[test]
fn booked_hour_is_removed() {
    let date = day(2025, 6, 2);
    let booked = vec![
        Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2025, 6, 2, 14, 0, 0).unwrap(),
    ];

    let slots = available_slots(date, &booked);

    assert_eq!(slots.len(), 6);
    assert!(slots.iter().all(|s| s.time.hour() != 10));
    assert!(slots.iter().all(|s| s.time.hour() != 14));
}

#[test]
fn bookings_on_other_days_do_not_block() {
    let date = day(2025, 6, 2);
    let booked = vec![Utc.with_ymd_and_hms(2025, 6, 3, 10, 0, 0).unwrap()];

    let slots = available_slots(date, &booked);

    assert_eq!(slots.len(), 8);
}

#[test]
fn off_hour_booking_blocks_its_hour() {
    // A 10:30 appointment still occupies the 10:00 slot.
    let date = day(2025, 6, 2);
    let booked = vec![Utc.with_ymd_and_hms(2025, 6, 2, 10, 30, 0).unwrap()];

    let slots = available_slots(date, &booked);

    assert_eq!(slots.len(), 7);
    assert!(slots.iter().all(|s| s.time.hour() != 10));
}

#[test]
fn fully_booked_day_yields_no_slots() {
    let date = day(2025, 6, 2);
    let booked: Vec<_> = (OPENING_HOUR..CLOSING_HOUR)
        .map(|h| Utc.with_ymd_and_hms(2025, 6, 2, h, 0, 0).unwrap())
        .collect();

    let slots = available_slots(date, &booked);

    assert!(slots.is_empty());
}

#[test]
fn display_time_uses_twelve_hour_clock() {
    let slots = available_slots(day(2025, 6, 2), &[]);

    assert_eq!(slots[0].display_time, "9:00 AM");
    assert_eq!(slots[3].display_time, "12:00 PM");
    assert_eq!(slots[7].display_time, "4:00 PM");
}

#[test]
fn day_bounds_cover_exactly_one_day() {
    let (from, to) = day_bounds(day(2025, 6, 2));

    assert_eq!(from, Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap());
    assert_eq!(to, Utc.with_ymd_and_hms(2025, 6, 3, 0, 0, 0).unwrap());
    assert_eq!((to - from).num_hours(), 24);
}
