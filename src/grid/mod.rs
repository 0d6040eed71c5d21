//! The scheduling grid engine: week/slot model, event placement, and the
//! two pointer-drag state machines. Pure logic only; rendering lives in
//! `crate::ui`.

pub mod placement;
pub mod reschedule;
pub mod select;
pub mod week;

pub use placement::{events_by_day, timed_event_geometry, DayEvents, EventGeometry, EventsByDay};
pub use reschedule::{DropTarget, EventMove, RescheduleController};
pub use select::{DragSelection, DragSelectionController};
pub use week::{week_days, week_start, WeekStart};

/// Drag state owned by the embedding application and threaded through the
/// render cycle, one instance per grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekGridState {
    pub selection: DragSelectionController,
    pub reschedule: RescheduleController,
}

impl WeekGridState {
    /// Reset both gesture machines; used when pointer input is lost.
    pub fn cancel_gestures(&mut self) {
        self.selection.cancel();
        self.reschedule.cancel();
    }
}
