// egui rendering layer for the scheduling grid

mod palette;
pub mod week_view;

pub use week_view::{show_week_grid, WeekGridOptions, WeekGridResponse};
