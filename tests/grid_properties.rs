// Property-based tests for the time-grid model and event placement

use chrono::{Datelike, Duration, Local, NaiveDate, TimeZone};
use proptest::prelude::*;

use week_grid::grid::week::{
    minutes_to_y, week_days, y_to_slot_minutes, WeekStart, LAST_SLOT_START_MINUTES,
    SLOT_INTERVAL_MINUTES,
};
use week_grid::grid::{events_by_day, timed_event_geometry};
use week_grid::models::event::CalendarEvent;

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn arb_week_start() -> impl Strategy<Value = WeekStart> {
    prop_oneof![Just(WeekStart::Sunday), Just(WeekStart::Monday)]
}

proptest! {
    /// Any anchor yields exactly 7 contiguous days starting on the
    /// requested weekday, with the anchor inside the week.
    #[test]
    fn prop_week_days_shape(anchor in arb_date(), convention in arb_week_start()) {
        let days = week_days(anchor, convention);

        prop_assert_eq!(days.len(), 7);
        for pair in days.windows(2) {
            prop_assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
        prop_assert_eq!(
            days[0].weekday().num_days_from_sunday() as u8,
            convention.offset_from_sunday()
        );
        prop_assert!(days.contains(&anchor));
    }

    /// Pixel -> minute -> pixel round-trips land within one slot.
    #[test]
    fn prop_pixel_minute_roundtrip(minutes in 0u32..=LAST_SLOT_START_MINUTES) {
        let slot_minute = y_to_slot_minutes(minutes_to_y(minutes));
        prop_assert!(slot_minute <= minutes);
        prop_assert!(minutes - slot_minute < SLOT_INTERVAL_MINUTES);
    }

    /// Minute -> pixel is monotone, so event ordering is preserved visually.
    #[test]
    fn prop_minutes_to_y_monotone(a in 0u32..1440, b in 0u32..1440) {
        if a < b {
            prop_assert!(minutes_to_y(a) < minutes_to_y(b));
        }
    }

    /// Timed geometry never drops below the half-hour visual floor.
    #[test]
    fn prop_geometry_height_floor(start_hour in 0u32..23, duration_min in 1i64..120) {
        let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        // Skip instants that do not exist in the local timezone (DST gaps).
        let Some(start) = Local
            .from_local_datetime(&day.and_hms_opt(start_hour, 0, 0).unwrap())
            .single()
        else {
            return Ok(());
        };
        let event = CalendarEvent::new("x", start, start + Duration::minutes(duration_min)).unwrap();

        let geometry = timed_event_geometry(&event).unwrap();
        prop_assert!(geometry.height >= week_grid::grid::week::HOUR_HEIGHT / 2.0);
        prop_assert_eq!(geometry.top, minutes_to_y(start_hour * 60));
    }

    /// Re-bucketing identical inputs gives identical output (no hidden
    /// mutable state in placement).
    #[test]
    fn prop_placement_idempotent(anchor in arb_date(), offset_days in 0i64..7, start_hour in 0u32..23) {
        let days = week_days(anchor, WeekStart::Monday);
        let day = days[0] + Duration::days(offset_days);
        let Some(start) = Local
            .from_local_datetime(&day.and_hms_opt(start_hour, 0, 0).unwrap())
            .single()
        else {
            return Ok(());
        };
        let events = vec![CalendarEvent::new("x", start, start + Duration::hours(1)).unwrap()];

        let first = events_by_day(&days, &events);
        let second = events_by_day(&days, &events);
        for d in &days {
            prop_assert_eq!(&first[d].timed, &second[d].timed);
            prop_assert_eq!(&first[d].all_day, &second[d].all_day);
        }
    }
}
