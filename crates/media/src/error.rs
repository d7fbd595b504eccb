use std::path::PathBuf;

use stride_state::ViewMode;
use thiserror::Error;

/// Failures the media layer reports. None of them is fatal: the UI turns
/// each into an inline placeholder.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("no processed video for '{video_id}' ({} or its fallback)", mode.label())]
    ResourceMissing { video_id: String, mode: ViewMode },

    #[error("could not decode frame {frame_index} of {}: {reason}", path.display())]
    DecodeFailure {
        path: PathBuf,
        frame_index: usize,
        reason: String,
    },

    #[error("{} has no readable frames yet", path.display())]
    NotReady { path: PathBuf },

    #[error("pose data not available for '{video_id}'")]
    AnnotationMissing { video_id: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed pose data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("pipeline error: {0}")]
    Pipeline(String),
}

pub type Result<T> = std::result::Result<T, MediaError>;
