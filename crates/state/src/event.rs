use crate::session::ViewMode;
use crate::slot::Side;

/// One discrete user action. A cycle applies at most one.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    TogglePlay(Side),
    TogglePlayAll,
    Seek(Side, usize),
    Step(Side, i64),
    First(Side),
    Last(Side),
    SetSpeed(f64),
    Reset,
    SelectVideo(Side, String),
    SetViewMode(ViewMode),
}

impl Event {
    /// Whether applying this event can change which file or timing a slot
    /// resolves to.
    pub fn changes_media(&self) -> bool {
        matches!(self, Event::SelectVideo(..) | Event::SetViewMode(_))
    }
}
