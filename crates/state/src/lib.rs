pub mod athlete;
pub mod clock;
pub mod event;
pub mod session;
pub mod slot;

pub use athlete::{AthleteInfo, CatalogEntry};
pub use clock::{compute_frame, Anchor};
pub use event::Event;
pub use session::{PlaybackSession, ViewMode};
pub use slot::{Side, SlotState, SlotTiming, VideoSlot};
