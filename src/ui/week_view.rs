//! Render/composition shell for the weekly scheduling grid.
//!
//! Assembles the header row, the fixed all-day lane, and the scrollable
//! 7-day × 24-hour time grid, and routes pointer input into the two drag
//! state machines in `crate::grid`. All placement math comes from the pure
//! grid modules; this file only draws and dispatches.

use chrono::{Local, NaiveDate, Timelike};
use egui::{Align2, Color32, CursorIcon, FontId, Pos2, Rect, Sense, Stroke, Vec2};

use super::palette::{dim_past, event_fill, TimeGridPalette};
use crate::grid::week::{
    minutes_to_y, time_slots, week_days, y_to_slot_minutes, WeekStart, DAY_HEIGHT, HOUR_HEIGHT,
    SLOT_INTERVAL_MINUTES,
};
use crate::grid::{events_by_day, timed_event_geometry, DragSelection, EventMove, WeekGridState};
use crate::models::event::CalendarEvent;

pub const TIME_LABEL_WIDTH: f32 = 50.0;
pub const COLUMN_SPACING: f32 = 1.0;
pub const ALL_DAY_LANE_HEIGHT: f32 = 58.0;
const HEADER_HEIGHT: f32 = 26.0;

/// Capability flags and conventions supplied by the embedding view.
///
/// A disabled capability removes the corresponding interaction entirely,
/// mirroring the presence/absence of the caller's handlers.
#[derive(Debug, Clone, Copy)]
pub struct WeekGridOptions {
    pub week_starts_on: WeekStart,
    pub enable_drag_selection: bool,
    pub enable_all_day_click: bool,
    pub enable_reschedule: bool,
}

impl Default for WeekGridOptions {
    fn default() -> Self {
        Self {
            week_starts_on: WeekStart::Monday,
            enable_drag_selection: true,
            enable_all_day_click: true,
            enable_reschedule: true,
        }
    }
}

/// Interaction outcome of one rendered frame, for the caller to persist.
/// The grid itself never mutates events.
#[derive(Debug, Clone, Default)]
pub struct WeekGridResponse {
    /// An existing event was clicked (e.g. to open an edit form).
    pub clicked_event: Option<CalendarEvent>,
    /// The user drew a new time range.
    pub drag_selection: Option<DragSelection>,
    /// An empty all-day lane cell was clicked.
    pub all_day_click: Option<NaiveDate>,
    /// An event was dropped onto a new slot or day.
    pub event_move: Option<EventMove>,
}

/// Render the weekly grid and process one frame of pointer input.
pub fn show_week_grid(
    ui: &mut egui::Ui,
    current_date: NaiveDate,
    events: &[CalendarEvent],
    options: &WeekGridOptions,
    state: &mut WeekGridState,
) -> WeekGridResponse {
    let mut response = WeekGridResponse::default();

    let days = week_days(current_date, options.week_starts_on);
    let buckets = events_by_day(&days, events);
    let palette = TimeGridPalette::from_visuals(ui.visuals());
    let today = Local::now().date_naive();

    let col_width =
        ((ui.available_width() - TIME_LABEL_WIDTH - COLUMN_SPACING * 8.0) / 7.0).max(40.0);

    render_header(ui, &days, today, col_width, &palette);
    render_all_day_lane(
        ui,
        &days,
        &buckets,
        col_width,
        &palette,
        options,
        state,
        &mut response,
    );

    egui::ScrollArea::vertical()
        .id_source("week_time_grid")
        .show(ui, |ui| {
            ui.spacing_mut().item_spacing = Vec2::ZERO;
            ui.horizontal(|ui| {
                render_time_labels(ui, &palette);
                ui.add_space(COLUMN_SPACING);
                for (day_idx, day) in days.iter().enumerate() {
                    let timed = buckets
                        .get(day)
                        .map(|bucket| bucket.timed.as_slice())
                        .unwrap_or(&[]);
                    render_day_column(
                        ui,
                        *day,
                        today,
                        timed,
                        col_width,
                        &palette,
                        options,
                        state,
                        &mut response,
                    );
                    if day_idx < days.len() - 1 {
                        ui.add_space(COLUMN_SPACING);
                    }
                }
            });
        });

    resolve_gesture_ends(ui, state, &mut response);
    response
}

/// Day-name header row above the all-day lane.
fn render_header(
    ui: &mut egui::Ui,
    days: &[NaiveDate; 7],
    today: NaiveDate,
    col_width: f32,
    palette: &TimeGridPalette,
) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        ui.add_space(TIME_LABEL_WIDTH + COLUMN_SPACING);
        for day in days {
            let (rect, _) = ui.allocate_exact_size(
                Vec2::new(col_width, HEADER_HEIGHT),
                Sense::hover(),
            );
            let label = day.format("%a %d/%m").to_string();
            let font = FontId::proportional(12.0);
            let color = if *day == today {
                palette.selection_border
            } else {
                palette.header_text
            };
            ui.painter()
                .text(rect.center(), Align2::CENTER_CENTER, label, font, color);
            ui.add_space(COLUMN_SPACING);
        }
    });
}

/// Fixed-height lane for all-day events, one droppable/clickable cell per
/// day, chips listed top to bottom with internal scrolling on overflow.
#[allow(clippy::too_many_arguments)]
fn render_all_day_lane(
    ui: &mut egui::Ui,
    days: &[NaiveDate; 7],
    buckets: &crate::grid::EventsByDay,
    col_width: f32,
    palette: &TimeGridPalette,
    options: &WeekGridOptions,
    state: &mut WeekGridState,
    response: &mut WeekGridResponse,
) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        let (gutter, _) = ui.allocate_exact_size(
            Vec2::new(TIME_LABEL_WIDTH, ALL_DAY_LANE_HEIGHT),
            Sense::hover(),
        );
        ui.painter().text(
            Pos2::new(gutter.right() - 5.0, gutter.top() + 10.0),
            Align2::RIGHT_CENTER,
            "all-day",
            FontId::proportional(10.0),
            palette.label_text,
        );
        ui.add_space(COLUMN_SPACING);

        for (day_idx, day) in days.iter().enumerate() {
            let (cell_rect, cell_response) = ui.allocate_exact_size(
                Vec2::new(col_width, ALL_DAY_LANE_HEIGHT),
                Sense::click(),
            );
            ui.painter().rect_filled(cell_rect, 0.0, palette.lane_bg);
            ui.painter().line_segment(
                [cell_rect.right_top(), cell_rect.right_bottom()],
                Stroke::new(1.0, palette.divider),
            );
            ui.painter().line_segment(
                [cell_rect.left_bottom(), cell_rect.right_bottom()],
                Stroke::new(1.0, palette.hour_line),
            );

            // Drop-target tracking and highlight for event drags.
            if state.reschedule.is_dragging() {
                if let Some(pointer) = ui.input(|i| i.pointer.hover_pos()) {
                    if cell_rect.contains(pointer) {
                        state.reschedule.drag_over_all_day(*day);
                        ui.ctx().request_repaint();
                    }
                }
                if let Some(over) = state.reschedule.drag_over() {
                    if over.date == *day && over.minute.is_none() {
                        let highlight = cell_rect.shrink(2.0);
                        ui.painter().rect_filled(highlight, 2.0, palette.drop_fill);
                        ui.painter()
                            .rect_stroke(highlight, 2.0, Stroke::new(1.5, palette.drop_border));
                    }
                }
            }

            let chips = buckets
                .get(day)
                .map(|bucket| bucket.all_day.as_slice())
                .unwrap_or(&[]);
            let mut chip_hovered = false;
            ui.allocate_ui_at_rect(cell_rect.shrink(2.0), |ui| {
                egui::ScrollArea::vertical()
                    .id_source(("all_day_lane", *day))
                    .show(ui, |ui| {
                        ui.spacing_mut().item_spacing.y = 2.0;
                        for event in chips {
                            chip_hovered |= render_all_day_chip(ui, event, options, state, response);
                        }
                    });
            });

            if options.enable_all_day_click && cell_response.clicked() && !chip_hovered {
                response.all_day_click = Some(*day);
            }
            if cell_response.hovered() && !chip_hovered && options.enable_all_day_click {
                ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
            }

            if day_idx < days.len() - 1 {
                ui.add_space(COLUMN_SPACING);
            }
        }
    });
}

/// One all-day event chip. Returns whether the pointer is over it, so the
/// enclosing cell can tell chip clicks apart from empty-lane clicks.
fn render_all_day_chip(
    ui: &mut egui::Ui,
    event: &CalendarEvent,
    options: &WeekGridOptions,
    state: &mut WeekGridState,
    response: &mut WeekGridResponse,
) -> bool {
    let is_past = event.end < Local::now();
    let fill = if is_past {
        dim_past(event_fill(event.color))
    } else {
        event_fill(event.color)
    };

    let chip = egui::Frame::none()
        .fill(fill)
        .rounding(egui::Rounding::same(3.0))
        .inner_margin(egui::Margin::symmetric(5.0, 1.0))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(
                egui::RichText::new(&event.title)
                    .color(Color32::WHITE)
                    .size(11.0),
            );
        })
        .response
        .interact(Sense::click_and_drag());

    if chip.clicked() {
        response.clicked_event = Some(event.clone());
    }
    if chip.drag_started() && options.enable_reschedule {
        // An event drag suppresses any selection gesture.
        state.selection.cancel();
        state.reschedule.begin(event);
    }
    if chip.hovered() {
        ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
    }

    chip.hovered() || chip.clicked() || chip.dragged()
}

/// Hour labels in the left gutter of the scrollable grid.
fn render_time_labels(ui: &mut egui::Ui, palette: &TimeGridPalette) {
    let (rect, _) = ui.allocate_exact_size(
        Vec2::new(TIME_LABEL_WIDTH, DAY_HEIGHT),
        Sense::hover(),
    );
    for slot in time_slots() {
        if slot.label.is_empty() {
            continue;
        }
        let y = rect.top() + minutes_to_y(slot.start_minutes());
        ui.painter().text(
            Pos2::new(rect.right() - 5.0, y),
            Align2::RIGHT_CENTER,
            &slot.label,
            FontId::proportional(11.0),
            palette.label_text,
        );
    }
}

/// One scrollable day column: background, gridlines, event blocks, drag
/// overlays, and the current-time indicator.
#[allow(clippy::too_many_arguments)]
fn render_day_column(
    ui: &mut egui::Ui,
    day: NaiveDate,
    today: NaiveDate,
    timed: &[CalendarEvent],
    col_width: f32,
    palette: &TimeGridPalette,
    options: &WeekGridOptions,
    state: &mut WeekGridState,
    response: &mut WeekGridResponse,
) {
    let wants_pointer = options.enable_drag_selection || options.enable_reschedule;
    let sense = if wants_pointer {
        Sense::click_and_drag()
    } else {
        Sense::hover()
    };
    let (rect, col_response) =
        ui.allocate_exact_size(Vec2::new(col_width, DAY_HEIGHT), sense);

    let is_today = day == today;
    let bg = if is_today {
        palette.today_bg
    } else {
        palette.regular_bg
    };
    ui.painter().rect_filled(rect, 0.0, bg);

    for slot in time_slots() {
        let y = rect.top() + minutes_to_y(slot.start_minutes());
        let color = if slot.is_hour_start() {
            palette.hour_line
        } else {
            palette.slot_line
        };
        ui.painter().line_segment(
            [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
            Stroke::new(1.0, color),
        );
    }
    ui.painter().line_segment(
        [rect.right_top(), rect.right_bottom()],
        Stroke::new(1.0, palette.divider),
    );

    // Event blocks, in list order; overlapping events simply stack.
    let now = Local::now();
    let mut hitboxes: Vec<(Rect, &CalendarEvent)> = Vec::new();
    for event in timed {
        let Some(geometry) = timed_event_geometry(event) else {
            continue;
        };
        let block_rect = Rect::from_min_size(
            Pos2::new(rect.left() + 2.0, rect.top() + geometry.top + 1.0),
            Vec2::new(col_width - 4.0, (geometry.height - 2.0).max(4.0)),
        );
        let fill = if event.end < now {
            dim_past(event_fill(event.color))
        } else {
            event_fill(event.color)
        };
        ui.painter()
            .rect_filled(block_rect, egui::Rounding::same(2.0), fill);

        let text_job = egui::text::LayoutJob::simple(
            event.title.clone(),
            FontId::proportional(10.0),
            Color32::WHITE,
            block_rect.width() - 8.0,
        );
        let galley = ui.fonts(|f| f.layout_job(text_job));
        ui.painter().with_clip_rect(block_rect).galley(
            Pos2::new(block_rect.left() + 4.0, block_rect.top() + 2.0),
            galley,
            Color32::WHITE,
        );

        hitboxes.push((block_rect, event));
    }

    let pointer_pos = col_response
        .interact_pointer_pos()
        .or_else(|| ui.input(|i| i.pointer.hover_pos()));
    let minute_at = |pos: Pos2| y_to_slot_minutes(pos.y - rect.top());
    let event_under = |pos: Pos2| {
        hitboxes
            .iter()
            .rev()
            .find(|(hit_rect, _)| hit_rect.contains(pos))
            .map(|(_, event)| *event)
    };

    // Gesture starts. A drag beginning on an event block becomes a
    // reschedule; on empty grid it becomes a selection.
    if col_response.drag_started() {
        if let Some(pos) = col_response.interact_pointer_pos() {
            match event_under(pos) {
                Some(event) if options.enable_reschedule => {
                    state.selection.cancel();
                    state.reschedule.begin(event);
                }
                Some(_) => {}
                None => {
                    if options.enable_drag_selection && !state.reschedule.is_dragging() {
                        state.selection.pointer_down(day, minute_at(pos));
                    }
                }
            }
        }
    }

    // Gesture updates.
    if let Some(pos) = pointer_pos {
        if rect.contains(pos) {
            if state.reschedule.is_dragging() {
                state.reschedule.drag_over_slot(day, minute_at(pos));
                ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
                ui.ctx().request_repaint();
            } else if state.selection.is_dragging() {
                state.selection.pointer_move(day, minute_at(pos));
                ui.ctx().request_repaint();
            } else if event_under(pos).is_some() {
                ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
            }
        }
    }

    if col_response.clicked() {
        if let Some(event) = col_response.interact_pointer_pos().and_then(event_under) {
            response.clicked_event = Some(event.clone());
        }
    }

    // Translucent overlay for an in-progress selection on this day.
    if let Some((selection_date, from, to)) = state.selection.preview() {
        if selection_date == day {
            let overlay = Rect::from_min_max(
                Pos2::new(rect.left() + 1.0, rect.top() + minutes_to_y(from)),
                Pos2::new(rect.right() - 1.0, rect.top() + minutes_to_y(to)),
            );
            ui.painter()
                .rect_filled(overlay, 2.0, palette.selection_fill);
            ui.painter()
                .rect_stroke(overlay, 2.0, Stroke::new(1.0, palette.selection_border));
        }
    }

    // Drop-target slot highlight for an in-progress reschedule.
    if let Some(over) = state.reschedule.drag_over() {
        if over.date == day {
            if let Some(minute) = over.minute {
                let top = rect.top() + minutes_to_y(minute);
                let highlight = Rect::from_min_size(
                    Pos2::new(rect.left() + 3.0, top),
                    Vec2::new(col_width - 6.0, minutes_to_y(SLOT_INTERVAL_MINUTES)),
                );
                ui.painter().rect_filled(highlight, 2.0, palette.drop_fill);
                ui.painter()
                    .rect_stroke(highlight, 2.0, Stroke::new(1.5, palette.drop_border));
            }
        }
    }

    if is_today {
        draw_current_time_indicator(ui, rect, palette);
    }
}

/// Horizontal marker at the current time, refreshed once per minute via a
/// repaint request scoped to the widget (nothing to cancel on teardown).
fn draw_current_time_indicator(ui: &mut egui::Ui, rect: Rect, palette: &TimeGridPalette) {
    let now = Local::now().time();
    let minutes = now.hour() * 60 + now.minute();
    let y = rect.top() + minutes as f32 / 60.0 * HOUR_HEIGHT;

    ui.painter()
        .circle_filled(Pos2::new(rect.left() - 4.0, y), 3.0, palette.now_line);
    ui.painter().line_segment(
        [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
        Stroke::new(2.0, palette.now_line),
    );

    ui.ctx()
        .request_repaint_after(std::time::Duration::from_secs(60));
}

/// Resolve pointer release and pointer loss once per frame, after all
/// columns have had the chance to update hover targets.
fn resolve_gesture_ends(
    ui: &mut egui::Ui,
    state: &mut WeekGridState,
    response: &mut WeekGridResponse,
) {
    let primary_released = ui.input(|i| i.pointer.primary_released());
    if primary_released {
        if state.reschedule.is_dragging() {
            response.event_move = state.reschedule.drop_on_hover();
        }
        if state.selection.is_dragging() {
            response.drag_selection = state.selection.pointer_up();
        }
    } else if !ui.input(|i| i.pointer.has_pointer())
        && (state.selection.is_dragging() || state.reschedule.is_dragging())
    {
        // Pointer left the window mid-gesture: no partial emission.
        state.cancel_gestures();
    }
}
