// Event module
// Calendar event model consumed by the weekly scheduling grid

use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Closed palette of supported event colors.
///
/// The grid never renders arbitrary colors; unknown values coming from the
/// event store deserialize to the gray fallback so the mapping stays total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventColor {
    #[default]
    Blue,
    Green,
    Red,
    Yellow,
    Purple,
    Orange,
    Teal,
    Gray,
}

impl<'de> Deserialize<'de> for EventColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(match name.as_str() {
            "blue" => Self::Blue,
            "green" => Self::Green,
            "red" => Self::Red,
            "yellow" => Self::Yellow,
            "purple" => Self::Purple,
            "orange" => Self::Orange,
            "teal" => Self::Teal,
            _ => Self::Gray,
        })
    }
}

/// Validation failures for event data supplied by the external store.
///
/// The grid excludes invalid events from placement instead of failing the
/// whole render; see `grid::placement`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidEventData {
    #[error("event title cannot be empty")]
    EmptyTitle,
    #[error("timed event must end after it starts")]
    NonPositiveDuration,
    #[error("event start and end times are required")]
    MissingTimes,
}

/// A calendar event as supplied by the external event store.
///
/// The grid treats events as read-only input; rescheduling is expressed as
/// an emitted intent, never as a mutation of this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub all_day: bool,
    pub color: Option<EventColor>,
}

impl CalendarEvent {
    /// Create a new timed event with required fields.
    pub fn new(
        title: impl Into<String>,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Result<Self, InvalidEventData> {
        let event = Self {
            id: None,
            title: title.into(),
            description: None,
            start,
            end,
            all_day: false,
            color: None,
        };
        event.validate()?;
        Ok(event)
    }

    /// Create a builder for constructing events with optional fields.
    pub fn builder() -> CalendarEventBuilder {
        CalendarEventBuilder::new()
    }

    /// Validate the event.
    ///
    /// All-day events are exempt from the duration check: the store commonly
    /// sends them with equal start/end timestamps at midnight.
    pub fn validate(&self) -> Result<(), InvalidEventData> {
        if self.title.trim().is_empty() {
            return Err(InvalidEventData::EmptyTitle);
        }
        if !self.all_day && self.end <= self.start {
            return Err(InvalidEventData::NonPositiveDuration);
        }
        Ok(())
    }

    /// Get the duration of the event.
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }
}

/// Builder for creating events with optional fields
pub struct CalendarEventBuilder {
    title: Option<String>,
    description: Option<String>,
    start: Option<DateTime<Local>>,
    end: Option<DateTime<Local>>,
    all_day: bool,
    color: Option<EventColor>,
}

impl CalendarEventBuilder {
    pub fn new() -> Self {
        Self {
            title: None,
            description: None,
            start: None,
            end: None,
            all_day: false,
            color: None,
        }
    }

    /// Set the event title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the event description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the start time
    pub fn start(mut self, start: DateTime<Local>) -> Self {
        self.start = Some(start);
        self
    }

    /// Set the end time
    pub fn end(mut self, end: DateTime<Local>) -> Self {
        self.end = Some(end);
        self
    }

    /// Set as all-day event
    pub fn all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    /// Set the event color
    pub fn color(mut self, color: EventColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Build the event
    pub fn build(self) -> Result<CalendarEvent, InvalidEventData> {
        let event = CalendarEvent {
            id: None,
            title: self.title.unwrap_or_default(),
            description: self.description,
            start: self.start.ok_or(InvalidEventData::MissingTimes)?,
            end: self.end.ok_or(InvalidEventData::MissingTimes)?,
            all_day: self.all_day,
            color: self.color,
        };
        event.validate()?;
        Ok(event)
    }
}

impl Default for CalendarEventBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn sample_start() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()
    }

    fn sample_end() -> DateTime<Local> {
        sample_start() + Duration::hours(1)
    }

    #[test]
    fn test_new_event_success() {
        let event = CalendarEvent::new("Meeting", sample_start(), sample_end()).unwrap();
        assert_eq!(event.title, "Meeting");
        assert_eq!(event.start, sample_start());
        assert_eq!(event.end, sample_end());
        assert!(!event.all_day);
        assert!(event.description.is_none());
    }

    #[test]
    fn test_new_event_empty_title() {
        let result = CalendarEvent::new("", sample_start(), sample_end());
        assert_eq!(result.unwrap_err(), InvalidEventData::EmptyTitle);
    }

    #[test]
    fn test_new_event_whitespace_title() {
        let result = CalendarEvent::new("   ", sample_start(), sample_end());
        assert_eq!(result.unwrap_err(), InvalidEventData::EmptyTitle);
    }

    #[test]
    fn test_new_event_invalid_times() {
        let result = CalendarEvent::new("Meeting", sample_end(), sample_start());
        assert_eq!(result.unwrap_err(), InvalidEventData::NonPositiveDuration);
    }

    #[test]
    fn test_new_event_equal_times() {
        let result = CalendarEvent::new("Meeting", sample_start(), sample_start());
        assert!(result.is_err());
    }

    #[test]
    fn test_all_day_event_equal_times_valid() {
        let event = CalendarEvent::builder()
            .title("Holiday")
            .start(sample_start())
            .end(sample_start())
            .all_day(true)
            .build()
            .unwrap();
        assert!(event.all_day);
        assert!(event.validate().is_ok());
    }

    #[test]
    fn test_builder_with_optional_fields() {
        let event = CalendarEvent::builder()
            .title("Conference")
            .description("Annual tech conference")
            .start(sample_start())
            .end(sample_end())
            .color(EventColor::Purple)
            .build()
            .unwrap();

        assert_eq!(event.title, "Conference");
        assert_eq!(
            event.description,
            Some("Annual tech conference".to_string())
        );
        assert_eq!(event.color, Some(EventColor::Purple));
    }

    #[test]
    fn test_builder_missing_title() {
        let result = CalendarEvent::builder()
            .start(sample_start())
            .end(sample_end())
            .build();
        assert_eq!(result.unwrap_err(), InvalidEventData::EmptyTitle);
    }

    #[test]
    fn test_duration() {
        let event = CalendarEvent::new("Meeting", sample_start(), sample_end()).unwrap();
        assert_eq!(event.duration(), Duration::hours(1));
    }

    #[test]
    fn test_color_roundtrip_serde() {
        let json = serde_json::to_string(&EventColor::Teal).unwrap();
        assert_eq!(json, "\"teal\"");
        let back: EventColor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, EventColor::Teal);
    }

    #[test]
    fn test_unknown_color_falls_back() {
        let color: EventColor = serde_json::from_str("\"chartreuse\"").unwrap();
        assert_eq!(color, EventColor::Gray);
    }

    #[test]
    fn test_event_json_roundtrip() {
        let event = CalendarEvent::builder()
            .title("Standup")
            .start(sample_start())
            .end(sample_end())
            .color(EventColor::Green)
            .build()
            .unwrap();
        let json = serde_json::to_string(&event).unwrap();
        let back: CalendarEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
