//! Event placement: bucketing the flat event list into per-day lanes and
//! computing vertical geometry for timed events.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Timelike};

use super::week::{minutes_to_y, HOUR_HEIGHT};
use crate::models::event::CalendarEvent;
use crate::utils::date::{end_of_day, start_of_day};

/// Minimum duration used for geometry so short events stay clickable.
pub const MIN_EVENT_MINUTES: i64 = 30;

/// Vertical placement of a timed event inside its day column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventGeometry {
    pub top: f32,
    pub height: f32,
}

/// Events occurring on a single day, split into the all-day lane and the
/// timed grid.
#[derive(Debug, Clone, Default)]
pub struct DayEvents {
    pub all_day: Vec<CalendarEvent>,
    pub timed: Vec<CalendarEvent>,
}

/// Per-day buckets for one rendered week, keyed by date so iteration order
/// matches the columns.
pub type EventsByDay = BTreeMap<NaiveDate, DayEvents>;

/// Bucket `events` into the given week days.
///
/// All-day events appear under every day their inclusive date range covers;
/// timed events appear only under their start day (a span crossing midnight
/// is not split into a second-day segment). Events failing validation are
/// skipped with a warning so one bad record cannot break the week's render.
pub fn events_by_day(week_days: &[NaiveDate], events: &[CalendarEvent]) -> EventsByDay {
    let mut buckets: EventsByDay = week_days
        .iter()
        .map(|day| (*day, DayEvents::default()))
        .collect();

    for event in events {
        if let Err(err) = event.validate() {
            log::warn!("skipping event {:?} ({}): {}", event.id, event.title, err);
            continue;
        }

        if event.all_day {
            // Inclusive date-range membership, normalized to midnight and
            // end-of-day so partial-day timestamps cannot shift membership.
            let first = start_of_day(event.start).date_naive();
            let last = end_of_day(event.end).date_naive();
            for (day, bucket) in buckets.iter_mut() {
                if first <= *day && *day <= last {
                    bucket.all_day.push(event.clone());
                }
            }
        } else if let Some(bucket) = buckets.get_mut(&event.start.date_naive()) {
            bucket.timed.push(event.clone());
        }
    }

    buckets
}

/// Geometry for a timed event; all-day events have none.
pub fn timed_event_geometry(event: &CalendarEvent) -> Option<EventGeometry> {
    if event.all_day {
        return None;
    }

    let start_minutes = (event.start.time().num_seconds_from_midnight() / 60) as i64;
    let end_minutes = (event.end.time().num_seconds_from_midnight() / 60) as i64;

    // Cross-midnight spans yield a negative difference here; the duration
    // floor keeps such events visible on their start day.
    let duration = (end_minutes - start_minutes).max(MIN_EVENT_MINUTES);

    let top = minutes_to_y(start_minutes as u32);
    let height = (duration as f32 / 60.0 * HOUR_HEIGHT).max(HOUR_HEIGHT / 2.0);

    Some(EventGeometry { top, height })
}
