// Week Grid Demo Application
// Owns the event list and applies intents emitted by the grid

mod grid;
mod models;
mod ui;
mod utils;

use chrono::{Datelike, Duration, Local, NaiveDate, TimeZone};

use grid::{DropTarget, WeekGridState};
use models::event::{CalendarEvent, EventColor};
use ui::{show_week_grid, WeekGridOptions};

fn main() -> Result<(), eframe::Error> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting week-grid demo");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Week Grid",
        options,
        Box::new(|_cc| Ok(Box::new(DemoApp::new()))),
    )
}

/// Stand-in for the external event store: owns the events and decides how
/// emitted intents are applied.
struct DemoApp {
    events: Vec<CalendarEvent>,
    current_date: NaiveDate,
    grid_state: WeekGridState,
    options: WeekGridOptions,
    next_id: i64,
}

impl DemoApp {
    fn new() -> Self {
        let today = Local::now().date_naive();
        let at = |day: NaiveDate, h: u32, m: u32| {
            Local
                .from_local_datetime(&day.and_hms_opt(h, m, 0).unwrap())
                .unwrap()
        };

        let mut events = vec![
            CalendarEvent {
                id: Some(1),
                title: "Team standup".into(),
                description: None,
                start: at(today, 9, 0),
                end: at(today, 9, 30),
                all_day: false,
                color: Some(EventColor::Blue),
            },
            CalendarEvent {
                id: Some(2),
                title: "Design review".into(),
                description: Some("Weekly design sync".into()),
                start: at(today, 14, 0),
                end: at(today, 15, 30),
                all_day: false,
                color: Some(EventColor::Purple),
            },
            CalendarEvent {
                id: Some(3),
                title: "Conference".into(),
                description: None,
                start: at(today, 0, 0),
                end: at(today + Duration::days(1), 0, 0),
                all_day: true,
                color: Some(EventColor::Green),
            },
        ];
        events.push(CalendarEvent {
            id: Some(4),
            title: "Focus block".into(),
            description: None,
            start: at(today + Duration::days(1), 10, 0),
            end: at(today + Duration::days(1), 12, 0),
            all_day: false,
            color: Some(EventColor::Teal),
        });

        Self {
            events,
            current_date: today,
            grid_state: WeekGridState::default(),
            options: WeekGridOptions::default(),
            next_id: 5,
        }
    }

    fn create_from_selection(&mut self, selection: grid::DragSelection) {
        let start = selection
            .date
            .and_hms_opt(selection.start_minute / 60, selection.start_minute % 60, 0);
        // The exclusive end can be 24:00; clamp to the last second of the day.
        let end = if selection.end_minute >= 24 * 60 {
            selection.date.and_hms_opt(23, 59, 59)
        } else {
            selection
                .date
                .and_hms_opt(selection.end_minute / 60, selection.end_minute % 60, 0)
        };
        let (Some(start), Some(end)) = (start, end) else {
            return;
        };
        let to_local = |naive| Local.from_local_datetime(&naive).single();
        let (Some(start), Some(end)) = (to_local(start), to_local(end)) else {
            return;
        };

        match CalendarEvent::new("New event", start, end) {
            Ok(mut event) => {
                event.id = Some(self.next_id);
                self.next_id += 1;
                log::info!(
                    "created event {:?} {} - {}",
                    event.id,
                    selection.start_label(),
                    selection.end_label()
                );
                self.events.push(event);
            }
            Err(err) => log::warn!("rejected selection: {}", err),
        }
    }

    /// Apply a reschedule intent, preserving the original duration for slot
    /// drops. This policy belongs to the store, not the grid.
    fn apply_move(&mut self, event_move: grid::EventMove) {
        let Some(event) = self
            .events
            .iter_mut()
            .find(|e| e.id == Some(event_move.event_id))
        else {
            log::warn!("move for unknown event {}", event_move.event_id);
            return;
        };

        match event_move.target {
            DropTarget::Slot(target) => {
                let Some(start) = Local.from_local_datetime(&target).single() else {
                    return;
                };
                let duration = event.duration();
                event.start = start;
                event.end = start + duration;
                event.all_day = false;
            }
            DropTarget::AllDay(day) => {
                let span_days = (event.end.date_naive() - event.start.date_naive())
                    .num_days()
                    .max(0);
                let Some(start) = Local
                    .from_local_datetime(&day.and_hms_opt(0, 0, 0).unwrap())
                    .single()
                else {
                    return;
                };
                event.start = start;
                event.end = start + Duration::days(span_days);
            }
        }
        log::info!("moved event {}", event_move.event_id);
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("< Prev").clicked() {
                    self.current_date -= Duration::days(7);
                }
                if ui.button("Today").clicked() {
                    self.current_date = Local::now().date_naive();
                }
                if ui.button("Next >").clicked() {
                    self.current_date += Duration::days(7);
                }
                ui.separator();
                ui.label(format!(
                    "Week {} of {}",
                    self.current_date.iso_week().week(),
                    self.current_date.year()
                ));
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let response = show_week_grid(
                ui,
                self.current_date,
                &self.events,
                &self.options,
                &mut self.grid_state,
            );

            if let Some(event) = response.clicked_event {
                log::info!("clicked event {:?}: {}", event.id, event.title);
            }
            if let Some(day) = response.all_day_click {
                log::info!("all-day lane clicked on {}", day);
            }
            if let Some(selection) = response.drag_selection {
                self.create_from_selection(selection);
            }
            if let Some(event_move) = response.event_move {
                self.apply_move(event_move);
            }
        });
    }
}
