//! Time-grid model: week derivation, the slot table, and pixel geometry.
//!
//! Everything here is a pure function of its inputs so the grid re-renders
//! deterministically and the math is testable without a UI.

use chrono::{Datelike, Duration, NaiveDate};

/// Minutes per drag/grid slot.
pub const SLOT_INTERVAL_MINUTES: u32 = 10;
/// Number of slots in one day (24h at 10-minute resolution).
pub const SLOTS_PER_DAY: u32 = 144;
/// Minutes in a full day; the exclusive upper bound for slot times.
pub const MINUTES_PER_DAY: u32 = 24 * 60;
/// Start minute of the last slot of the day (23:50).
pub const LAST_SLOT_START_MINUTES: u32 = MINUTES_PER_DAY - SLOT_INTERVAL_MINUTES;

/// Pixel height of one hour in the scrollable grid.
pub const HOUR_HEIGHT: f32 = 48.0;
/// Pixel height of one slot.
pub const SLOT_HEIGHT: f32 = HOUR_HEIGHT * SLOT_INTERVAL_MINUTES as f32 / 60.0;
/// Total pixel height of a day column.
pub const DAY_HEIGHT: f32 = HOUR_HEIGHT * 24.0;

/// First day of week convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekStart {
    Sunday,
    #[default]
    Monday,
}

impl WeekStart {
    /// Days from Sunday, matching the 0=Sunday / 1=Monday convention.
    pub fn offset_from_sunday(self) -> u8 {
        match self {
            WeekStart::Sunday => 0,
            WeekStart::Monday => 1,
        }
    }
}

/// Calculate the start of the week containing the given date.
pub fn week_start(anchor: NaiveDate, week_starts_on: WeekStart) -> NaiveDate {
    let weekday = anchor.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - week_starts_on.offset_from_sunday() as i64 + 7) % 7;
    anchor - Duration::days(offset)
}

/// The seven consecutive dates of the week containing `anchor`.
pub fn week_days(anchor: NaiveDate, week_starts_on: WeekStart) -> [NaiveDate; 7] {
    let start = week_start(anchor, week_starts_on);
    std::array::from_fn(|i| start + Duration::days(i as i64))
}

/// One background slot of the grid.
///
/// `label` is non-empty only on hour boundaries; minor slots render as
/// unlabeled gridlines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    pub hour: u32,
    pub minute: u32,
    pub label: String,
}

impl TimeSlot {
    pub fn start_minutes(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    pub fn is_hour_start(&self) -> bool {
        self.minute == 0
    }
}

/// The full 144-entry slot table for one day.
pub fn time_slots() -> Vec<TimeSlot> {
    (0..SLOTS_PER_DAY)
        .map(|i| {
            let minutes = i * SLOT_INTERVAL_MINUTES;
            let (hour, minute) = (minutes / 60, minutes % 60);
            let label = if minute == 0 {
                format!("{:02}:00", hour)
            } else {
                String::new()
            };
            TimeSlot {
                hour,
                minute,
                label,
            }
        })
        .collect()
}

/// Vertical pixel offset of a minutes-since-midnight value.
pub fn minutes_to_y(minutes: u32) -> f32 {
    minutes as f32 / 60.0 * HOUR_HEIGHT
}

/// Inverse of [`minutes_to_y`], quantized down to the containing slot and
/// clamped to `[0, 23:50]` so a pointer below the grid still maps to the
/// last slot of the day.
pub fn y_to_slot_minutes(y: f32) -> u32 {
    let raw_minutes = (y.max(0.0) / HOUR_HEIGHT * 60.0) as u32;
    let quantized = raw_minutes / SLOT_INTERVAL_MINUTES * SLOT_INTERVAL_MINUTES;
    quantized.min(LAST_SLOT_START_MINUTES)
}

/// Format minutes-since-midnight as `HH:mm`.
///
/// Accepts the exclusive day bound (1440 formats as `24:00`), which is why
/// drag endpoints are carried as minutes rather than `NaiveTime`.
pub fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
