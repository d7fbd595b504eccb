pub mod error;
pub mod frame_accessor;
pub mod frame_cache;
pub mod frame_decoder;
pub mod gst_init;
pub mod layout;
pub mod metadata;
pub mod pose;

pub use error::MediaError;
pub use frame_accessor::{FrameAccessor, FrameSource, GstFrameSource};
pub use layout::MediaLayout;
pub use metadata::VideoInfo;
pub use pose::{PoseData, PoseFrameRecord, PoseStats, PoseStore};
