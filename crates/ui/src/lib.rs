pub mod constants;
pub mod header;
pub mod notices;
pub mod sidebar;
pub mod slot_panel;
pub mod stats;
pub mod theme;

use std::path::PathBuf;

use stride_state::{Event, Side};

/// What a panel asks the app to do. Panels never mutate session state.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    Playback(Event),
    OpenDataDir(PathBuf),
    CheckRawVideos,
}

pub trait FrameLookup {
    fn slot_frame(&self, side: Side) -> Option<&egui::TextureHandle>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseBadge {
    pub detected: bool,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsSummary {
    pub detection_rate: f64,
    pub mean_confidence: f64,
    pub total_frames: usize,
}

/// Per-slot data produced by the render cycle, beyond what the session holds.
#[derive(Debug, Clone, Default)]
pub struct SlotPresentation {
    pub display_name: String,
    pub frame_error: Option<String>,
    pub pose: Option<PoseBadge>,
    pub stats: Option<StatsSummary>,
}
