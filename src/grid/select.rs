//! Drag-selection controller: the pointer-drag state machine that proposes
//! a new event's time range.
//!
//! The controller is a plain value type driven by the render shell, so every
//! transition is unit-testable without mounting a UI. All minute values are
//! slot-quantized minutes since midnight.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::week::{format_minutes, LAST_SLOT_START_MINUTES, SLOT_INTERVAL_MINUTES};

/// A quantized grid position: a day column plus a slot start minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPoint {
    pub date: NaiveDate,
    pub minute: u32,
}

/// A proposed time range for a new event, emitted on pointer release.
///
/// `end_minute` is exclusive and one slot past the released position, so a
/// zero-movement drag still yields a one-slot range. It can be `1440`
/// (`24:00`), which is why minutes are carried instead of `NaiveTime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragSelection {
    pub date: NaiveDate,
    pub start_minute: u32,
    pub end_minute: u32,
}

impl DragSelection {
    /// Start of the range as `HH:mm`.
    pub fn start_label(&self) -> String {
        format_minutes(self.start_minute)
    }

    /// Exclusive end of the range as `HH:mm` (up to `24:00`).
    pub fn end_label(&self) -> String {
        format_minutes(self.end_minute)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Phase {
    #[default]
    Idle,
    Dragging {
        start: SlotPoint,
        end: SlotPoint,
    },
}

/// State machine for drawing a new time range on the grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragSelectionController {
    phase: Phase,
}

impl DragSelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    /// Pointer pressed over a slot cell. The render shell only calls this
    /// when the drag-selection capability is enabled and no event drag is
    /// in progress.
    pub fn pointer_down(&mut self, date: NaiveDate, minute: u32) {
        let start = SlotPoint {
            date,
            minute: clamp_slot(minute),
        };
        self.phase = Phase::Dragging { start, end: start };
    }

    /// Pointer moved while dragging. Moves over a different day column are
    /// ignored; a selection is single-day by design.
    pub fn pointer_move(&mut self, date: NaiveDate, minute: u32) {
        if let Phase::Dragging { start, end } = &mut self.phase {
            if date == start.date {
                end.minute = clamp_slot(minute);
            }
        }
    }

    /// Pointer released: emit the selection and reset to idle. Returns
    /// `None` when no drag was in progress.
    pub fn pointer_up(&mut self) -> Option<DragSelection> {
        let phase = std::mem::take(&mut self.phase);
        match phase {
            Phase::Idle => None,
            Phase::Dragging { start, end } => {
                let from = start.minute.min(end.minute);
                let to = start.minute.max(end.minute) + SLOT_INTERVAL_MINUTES;
                Some(DragSelection {
                    date: start.date,
                    start_minute: from,
                    end_minute: to,
                })
            }
        }
    }

    /// Abort the gesture without emitting anything. Stale drag state must
    /// never leak into the next gesture.
    pub fn cancel(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Current highlight range `(date, start_minute, exclusive_end_minute)`
    /// for the translucent drag overlay.
    pub fn preview(&self) -> Option<(NaiveDate, u32, u32)> {
        match self.phase {
            Phase::Idle => None,
            Phase::Dragging { start, end } => Some((
                start.date,
                start.minute.min(end.minute),
                start.minute.max(end.minute) + SLOT_INTERVAL_MINUTES,
            )),
        }
    }
}

fn clamp_slot(minute: u32) -> u32 {
    (minute / SLOT_INTERVAL_MINUTES * SLOT_INTERVAL_MINUTES).min(LAST_SLOT_START_MINUTES)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d15() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn d16() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()
    }

    #[test]
    fn test_drag_down_the_column() {
        let mut controller = DragSelectionController::new();
        controller.pointer_down(d15(), 54 * SLOT_INTERVAL_MINUTES); // 09:00
        controller.pointer_move(d15(), 60 * SLOT_INTERVAL_MINUTES); // 10:00

        let selection = controller.pointer_up().unwrap();
        assert_eq!(selection.date, d15());
        assert_eq!(selection.start_label(), "09:00");
        assert_eq!(selection.end_label(), "10:10");
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_drag_upwards_swaps_endpoints() {
        let mut controller = DragSelectionController::new();
        controller.pointer_down(d15(), 600); // 10:00
        controller.pointer_move(d15(), 540); // 09:00

        let selection = controller.pointer_up().unwrap();
        assert_eq!(selection.start_label(), "09:00");
        assert_eq!(selection.end_label(), "10:10");
    }

    #[test]
    fn test_zero_movement_yields_one_slot() {
        let mut controller = DragSelectionController::new();
        controller.pointer_down(d15(), 540);

        let selection = controller.pointer_up().unwrap();
        assert_eq!(selection.start_minute, 540);
        assert_eq!(selection.end_minute, 550);
        assert!(selection.end_minute > selection.start_minute);
    }

    #[test]
    fn test_moves_to_other_day_are_ignored() {
        let mut controller = DragSelectionController::new();
        controller.pointer_down(d15(), 540);
        controller.pointer_move(d16(), 900);
        controller.pointer_move(d15(), 600);

        let selection = controller.pointer_up().unwrap();
        assert_eq!(selection.date, d15());
        assert_eq!(selection.end_label(), "10:10");
    }

    #[test]
    fn test_release_without_start_is_noop() {
        let mut controller = DragSelectionController::new();
        assert!(controller.pointer_up().is_none());
    }

    #[test]
    fn test_cancel_clears_state() {
        let mut controller = DragSelectionController::new();
        controller.pointer_down(d15(), 540);
        controller.cancel();

        assert!(!controller.is_dragging());
        assert!(controller.pointer_up().is_none());
    }

    #[test]
    fn test_drag_to_end_of_day_clamps() {
        let mut controller = DragSelectionController::new();
        controller.pointer_down(d15(), 1430);
        controller.pointer_move(d15(), 5000);

        let selection = controller.pointer_up().unwrap();
        assert_eq!(selection.start_minute, 1430);
        assert_eq!(selection.end_minute, 1440);
        assert_eq!(selection.end_label(), "24:00");
    }

    #[test]
    fn test_unaligned_minutes_are_quantized() {
        let mut controller = DragSelectionController::new();
        controller.pointer_down(d15(), 547);
        let selection = controller.pointer_up().unwrap();
        assert_eq!(selection.start_minute, 540);
    }

    #[test]
    fn test_preview_follows_pointer() {
        let mut controller = DragSelectionController::new();
        assert!(controller.preview().is_none());

        controller.pointer_down(d15(), 540);
        controller.pointer_move(d15(), 600);
        assert_eq!(controller.preview(), Some((d15(), 540, 610)));

        controller.pointer_up();
        assert!(controller.preview().is_none());
    }
}
