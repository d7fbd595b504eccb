use egui::vec2;

pub const TRANSPORT_BTN_SIZE: egui::Vec2 = vec2(56.0, 26.0);
pub const SIDEBAR_WIDTH: f32 = 280.0;
pub const FRAME_BORDER: f32 = 2.0;
