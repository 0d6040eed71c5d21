//! Drag-reschedule controller: moving an existing event to a new day/time.
//!
//! Independent of the selection controller; the render shell suppresses
//! selection starts while an event drag is active. The controller only
//! computes the target instant. Whether the move preserves the original
//! duration is the event store's decision.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::week::LAST_SLOT_START_MINUTES;
use crate::models::event::CalendarEvent;

/// Where a dragged event was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropTarget {
    /// A time slot: the target day combined with the slot's time of day.
    Slot(NaiveDateTime),
    /// The all-day lane of a day; carries no time component.
    AllDay(NaiveDate),
}

/// Reschedule intent emitted to the event store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMove {
    pub event_id: i64,
    pub target: DropTarget,
}

/// Ephemeral hover target used only for visual feedback; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragOver {
    pub date: NaiveDate,
    /// Slot start minute, or `None` when hovering the all-day lane.
    pub minute: Option<u32>,
}

#[derive(Debug, Clone, Copy)]
struct DraggedEvent {
    id: i64,
    all_day: bool,
}

/// State machine for dragging an existing event block.
#[derive(Debug, Clone, Copy, Default)]
pub struct RescheduleController {
    dragged: Option<DraggedEvent>,
    drag_over: Option<DragOver>,
}

impl RescheduleController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged.is_some()
    }

    /// Begin dragging `event`. Events without an identity cannot be
    /// rescheduled and are ignored.
    pub fn begin(&mut self, event: &CalendarEvent) {
        match event.id {
            Some(id) => {
                self.dragged = Some(DraggedEvent {
                    id,
                    all_day: event.all_day,
                });
                self.drag_over = None;
            }
            None => log::debug!("ignoring drag of unsaved event {:?}", event.title),
        }
    }

    /// Record the hovered time slot for highlighting.
    pub fn drag_over_slot(&mut self, date: NaiveDate, minute: u32) {
        if self.dragged.is_some() {
            self.drag_over = Some(DragOver {
                date,
                minute: Some(minute.min(LAST_SLOT_START_MINUTES)),
            });
        }
    }

    /// Record the hovered all-day lane cell for highlighting.
    pub fn drag_over_all_day(&mut self, date: NaiveDate) {
        if self.dragged.is_some() {
            self.drag_over = Some(DragOver { date, minute: None });
        }
    }

    pub fn drag_over(&self) -> Option<DragOver> {
        self.drag_over
    }

    /// Drop on the currently hovered target. Emits the reschedule intent
    /// and resets to idle; returns `None` (still resetting) when there is
    /// no active drag, no hover target, or the target does not apply to
    /// the dragged event.
    pub fn drop_on_hover(&mut self) -> Option<EventMove> {
        let dragged = self.dragged.take()?;
        let over = self.drag_over.take()?;

        match over.minute {
            Some(minute) => {
                let time = chrono::NaiveTime::from_hms_opt(minute / 60, minute % 60, 0)?;
                Some(EventMove {
                    event_id: dragged.id,
                    target: DropTarget::Slot(over.date.and_time(time)),
                })
            }
            // Only all-day events land in the all-day lane; a timed event
            // dropped there resolves to a cancelled gesture.
            None if dragged.all_day => Some(EventMove {
                event_id: dragged.id,
                target: DropTarget::AllDay(over.date),
            }),
            None => None,
        }
    }

    /// Drag ended without a successful drop: clear everything, emit nothing.
    pub fn cancel(&mut self) {
        self.dragged = None;
        self.drag_over = None;
    }
}
