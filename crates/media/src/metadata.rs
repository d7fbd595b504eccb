use std::path::Path;

use gstreamer as gst;
use gstreamer_pbutils as gst_pbutils;
use stride_state::clock::DEFAULT_FPS;
use stride_state::SlotTiming;
use tracing::warn;

use crate::gst_init::init_once;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoInfo {
    pub fps: f64,
    pub frame_count: usize,
    pub width: u32,
    pub height: u32,
}

impl VideoInfo {
    /// Sentinel for a video that is absent or not yet readable.
    pub fn missing() -> Self {
        Self {
            fps: DEFAULT_FPS,
            frame_count: 0,
            width: 0,
            height: 0,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.frame_count > 0
    }

    pub fn last_frame(&self) -> usize {
        self.frame_count.saturating_sub(1)
    }

    pub fn timing(&self) -> SlotTiming {
        SlotTiming {
            fps: self.fps,
            frame_count: self.frame_count,
        }
    }
}

impl Default for VideoInfo {
    fn default() -> Self {
        Self::missing()
    }
}

/// Reads fps, frame count and dimensions. Never fails: anything unreadable
/// yields [`VideoInfo::missing`].
pub fn probe_video(path: &Path) -> VideoInfo {
    if !path.is_file() {
        return VideoInfo::missing();
    }
    if let Err(e) = init_once() {
        warn!("{e}");
        return VideoInfo::missing();
    }

    let Some(uri) = url_from_path(path) else {
        return VideoInfo::missing();
    };

    let discoverer = match gst_pbutils::Discoverer::new(gst::ClockTime::from_seconds(10)) {
        Ok(d) => d,
        Err(e) => {
            warn!(path = %path.display(), "discoverer unavailable: {e}");
            return VideoInfo::missing();
        }
    };

    let info = match discoverer.discover_uri(&uri) {
        Ok(i) => i,
        Err(e) => {
            warn!(path = %path.display(), "could not probe video: {e}");
            return VideoInfo::missing();
        }
    };

    let Some(stream) = info.video_streams().into_iter().next() else {
        return VideoInfo::missing();
    };

    let rate = stream.framerate();
    let fps = if rate.numer() > 0 && rate.denom() > 0 {
        f64::from(rate.numer()) / f64::from(rate.denom())
    } else {
        DEFAULT_FPS
    };

    let duration = info
        .duration()
        .map(|d| d.nseconds() as f64 / 1_000_000_000.0)
        .unwrap_or(0.0);

    VideoInfo {
        fps,
        frame_count: frame_count_for(duration, fps),
        width: stream.width(),
        height: stream.height(),
    }
}

pub(crate) fn frame_count_for(duration_secs: f64, fps: f64) -> usize {
    if !duration_secs.is_finite() || duration_secs <= 0.0 || fps <= 0.0 {
        return 0;
    }
    (duration_secs * fps).round() as usize
}

fn url_from_path(path: &Path) -> Option<String> {
    let abs = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().ok()?.join(path)
    };
    Some(format!("file://{}", abs.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_sentinel() {
        let info = probe_video(Path::new("/definitely/not/here.mp4"));
        assert_eq!(info, VideoInfo::missing());
        assert!(!info.is_ready());
        assert_eq!(info.fps, 30.0);
    }

    #[test]
    fn frame_count_rounds_duration() {
        assert_eq!(frame_count_for(10.0, 30.0), 300);
        assert_eq!(frame_count_for(3.3366, 29.97), 100);
        assert_eq!(frame_count_for(0.0, 30.0), 0);
        assert_eq!(frame_count_for(f64::NAN, 30.0), 0);
    }
}
