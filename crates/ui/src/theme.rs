use egui::{Color32, CornerRadius, Stroke, Style, Visuals};

pub const ORANGE: Color32 = Color32::from_rgb(212, 69, 0);
pub const ORANGE_DARK: Color32 = Color32::from_rgb(178, 57, 0);
pub const NAVY: Color32 = Color32::from_rgb(0, 45, 114);
pub const CARD_BG: Color32 = Color32::from_rgb(245, 245, 245);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(30, 30, 30);
pub const TEXT_DIM: Color32 = Color32::from_rgb(102, 102, 102);
pub const SUCCESS: Color32 = Color32::from_rgb(46, 125, 50);
pub const WARNING: Color32 = Color32::from_rgb(237, 108, 2);
pub const ERROR: Color32 = Color32::from_rgb(198, 40, 40);

pub const ROUNDING: CornerRadius = CornerRadius::same(5);
pub const ROUNDING_LG: CornerRadius = CornerRadius::same(8);

pub fn apply_theme(ctx: &egui::Context) {
    let mut style = Style::default();
    let mut visuals = Visuals::light();

    visuals.widgets.inactive.bg_fill = ORANGE;
    visuals.widgets.inactive.weak_bg_fill = ORANGE;
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, Color32::WHITE);
    visuals.widgets.inactive.corner_radius = ROUNDING;

    visuals.widgets.hovered.bg_fill = ORANGE_DARK;
    visuals.widgets.hovered.weak_bg_fill = ORANGE_DARK;
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, Color32::WHITE);
    visuals.widgets.hovered.corner_radius = ROUNDING;

    visuals.widgets.active.bg_fill = NAVY;
    visuals.widgets.active.weak_bg_fill = NAVY;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);

    visuals.selection.bg_fill = ORANGE.gamma_multiply(0.4);
    visuals.selection.stroke = Stroke::new(1.0, ORANGE);

    style.visuals = visuals;
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.window_margin = egui::Margin::same(12);

    ctx.set_style(style);
}

pub fn heading(text: impl Into<String>) -> egui::RichText {
    egui::RichText::new(text).color(NAVY).strong().size(18.0)
}
