use egui::Color32;

use crate::models::event::EventColor;

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |c1: u8, c2: u8| -> u8 { ((c1 as f32 * (1.0 - t)) + (c2 as f32 * t)).round() as u8 };
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

#[derive(Clone, Copy)]
pub(crate) struct TimeGridPalette {
    pub regular_bg: Color32,
    pub today_bg: Color32,
    pub hour_line: Color32,
    pub slot_line: Color32,
    pub divider: Color32,
    pub label_text: Color32,
    pub header_text: Color32,
    pub lane_bg: Color32,
    pub hover_overlay: Color32,
    pub selection_fill: Color32,
    pub selection_border: Color32,
    pub drop_fill: Color32,
    pub drop_border: Color32,
    pub now_line: Color32,
}

impl TimeGridPalette {
    pub fn from_visuals(visuals: &egui::Visuals) -> Self {
        let base = visuals.extreme_bg_color;
        let panel = visuals.panel_fill;
        let line = visuals.widgets.noninteractive.bg_stroke.color;
        let accent = visuals.selection.bg_fill;
        Self {
            regular_bg: blend(base, panel, 0.4),
            today_bg: blend(blend(base, panel, 0.4), accent, 0.12),
            hour_line: line,
            slot_line: with_alpha(line, 90),
            divider: with_alpha(line, 220),
            label_text: visuals.weak_text_color(),
            header_text: visuals.text_color(),
            lane_bg: blend(base, panel, 0.7),
            hover_overlay: with_alpha(accent, if visuals.dark_mode { 40 } else { 26 }),
            selection_fill: with_alpha(accent, 60),
            selection_border: accent,
            drop_fill: Color32::from_rgba_unmultiplied(120, 200, 120, 35),
            drop_border: Color32::from_rgb(120, 200, 120),
            now_line: Color32::from_rgb(255, 100, 100),
        }
    }
}

/// Fill color for an event block. Total over the closed color enum; absent
/// colors resolve to the default palette entry.
pub(crate) fn event_fill(color: Option<EventColor>) -> Color32 {
    match color.unwrap_or_default() {
        EventColor::Blue => Color32::from_rgb(59, 130, 246),
        EventColor::Green => Color32::from_rgb(34, 197, 94),
        EventColor::Red => Color32::from_rgb(239, 68, 68),
        EventColor::Yellow => Color32::from_rgb(234, 179, 8),
        EventColor::Purple => Color32::from_rgb(139, 92, 246),
        EventColor::Orange => Color32::from_rgb(249, 115, 22),
        EventColor::Teal => Color32::from_rgb(20, 184, 166),
        EventColor::Gray => Color32::from_rgb(107, 114, 128),
    }
}

/// Dimmed variant of an event fill for events already in the past.
pub(crate) fn dim_past(color: Color32) -> Color32 {
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * 0.4) as u8,
        (color.g() as f32 * 0.4) as u8,
        (color.b() as f32 * 0.4) as u8,
        140,
    )
}
