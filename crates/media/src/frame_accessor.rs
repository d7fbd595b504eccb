use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::imageops::{self, FilterType};
use stride_state::ViewMode;
use tracing::{debug, warn};

use crate::error::{MediaError, Result};
use crate::frame_cache::{FrameCache, FrameKey};
use crate::frame_decoder::GstFrameDecoder;
use crate::layout::MediaLayout;
use crate::metadata::{self, VideoInfo};

pub const STANDARD_DISPLAY_HEIGHT: u32 = 500;

/// Decoding backend behind the accessor.
pub trait FrameSource {
    fn probe(&mut self, path: &Path) -> VideoInfo;
    /// Decodes one frame at native resolution. `frame_index` is already in
    /// range for the probed frame count.
    fn decode(&mut self, path: &Path, frame_index: usize, fps: f64) -> Result<image::RgbaImage>;
    /// Drops any open handles so replaced files are reopened.
    fn release(&mut self) {}
}

/// GStreamer-backed source that keeps one paused pipeline per file.
#[derive(Default)]
pub struct GstFrameSource {
    decoders: HashMap<PathBuf, GstFrameDecoder>,
}

impl GstFrameSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameSource for GstFrameSource {
    fn probe(&mut self, path: &Path) -> VideoInfo {
        metadata::probe_video(path)
    }

    fn decode(&mut self, path: &Path, frame_index: usize, fps: f64) -> Result<image::RgbaImage> {
        if !self.decoders.contains_key(path) {
            let decoder = GstFrameDecoder::open(path).map_err(|e| MediaError::DecodeFailure {
                path: path.to_path_buf(),
                frame_index,
                reason: e.to_string(),
            })?;
            self.decoders.insert(path.to_path_buf(), decoder);
        }
        let Some(decoder) = self.decoders.get_mut(path) else {
            return Err(MediaError::Pipeline("decoder vanished".to_string()));
        };
        let result = decoder.decode_frame(frame_index, fps);
        if result.is_err() {
            // A broken pipeline is reopened on the next request.
            self.decoders.remove(path);
        }
        result
    }

    fn release(&mut self) {
        if !self.decoders.is_empty() {
            debug!(count = self.decoders.len(), "closing frame decoders");
        }
        self.decoders.clear();
    }
}

/// Resolves, decodes, resizes and caches display frames.
pub struct FrameAccessor<S: FrameSource> {
    source: S,
    layout: MediaLayout,
    display_height: u32,
    frames: FrameCache,
    infos: HashMap<PathBuf, VideoInfo>,
}

impl<S: FrameSource> FrameAccessor<S> {
    pub fn new(source: S, layout: MediaLayout, display_height: u32) -> Self {
        Self {
            source,
            layout,
            display_height: display_height.max(1),
            frames: FrameCache::new(),
            infos: HashMap::new(),
        }
    }

    pub fn layout(&self) -> &MediaLayout {
        &self.layout
    }

    pub fn set_layout(&mut self, layout: MediaLayout) {
        self.layout = layout;
        self.invalidate_metadata();
    }

    pub fn cache(&self) -> &FrameCache {
        &self.frames
    }

    /// Forgets probed metadata and open decoders so files still being
    /// written, or replaced, are re-read.
    pub fn invalidate_metadata(&mut self) {
        self.infos.clear();
        self.source.release();
    }

    pub fn resolve(&self, video_id: &str, mode: ViewMode) -> Result<PathBuf> {
        self.layout.resolve(video_id, mode)
    }

    pub fn video_info(&mut self, video_id: &str, mode: ViewMode) -> VideoInfo {
        self.resolve_media(video_id, mode).1
    }

    /// Path and metadata in one lookup. The path is `None` when neither
    /// rendering exists.
    pub fn resolve_media(
        &mut self,
        video_id: &str,
        mode: ViewMode,
    ) -> (Option<PathBuf>, VideoInfo) {
        match self.resolve(video_id, mode) {
            Ok(path) => {
                let info = self.info_for_path(&path);
                (Some(path), info)
            }
            Err(_) => (None, VideoInfo::missing()),
        }
    }

    fn info_for_path(&mut self, path: &Path) -> VideoInfo {
        if let Some(info) = self.infos.get(path) {
            return *info;
        }
        let info = self.source.probe(path);
        // Unready files are probed again next time.
        if info.is_ready() {
            self.infos.insert(path.to_path_buf(), info);
        }
        info
    }

    pub fn get_frame(
        &mut self,
        video_id: &str,
        mode: ViewMode,
        frame_index: usize,
    ) -> Result<Arc<image::RgbaImage>> {
        let path = self.resolve(video_id, mode)?;
        let info = self.info_for_path(&path);
        self.frame_at(&path, info, frame_index)
    }

    /// Like [`FrameAccessor::get_frame`] for a path and metadata the caller
    /// already resolved. Never decodes a file that reports no frames.
    pub fn frame_at(
        &mut self,
        path: &Path,
        info: VideoInfo,
        frame_index: usize,
    ) -> Result<Arc<image::RgbaImage>> {
        if !info.is_ready() {
            return Err(MediaError::NotReady {
                path: path.to_path_buf(),
            });
        }
        let frame_index = frame_index.min(info.last_frame());

        let key = FrameKey::new(path, frame_index);
        if let Some(img) = self.frames.get(&key) {
            return Ok(img);
        }

        debug!(path = %path.display(), frame_index, "frame cache miss");
        let decoded = self
            .source
            .decode(path, frame_index, info.fps)
            .inspect_err(|e| warn!("{e}"))?;
        let resized = resize_to_height(decoded, self.display_height);
        Ok(self.frames.insert(key, resized))
    }
}

/// Scales to `height` keeping the aspect ratio. Downscaling averages source
/// areas; upscaling interpolates.
pub fn resize_to_height(img: image::RgbaImage, height: u32) -> image::RgbaImage {
    let (w, h) = img.dimensions();
    if h == height || h == 0 || w == 0 || height == 0 {
        return img;
    }
    let width = ((u64::from(w) * u64::from(height)) / u64::from(h)).max(1) as u32;
    if height < h {
        imageops::thumbnail(&img, width, height)
    } else {
        imageops::resize(&img, width, height, FilterType::Triangle)
    }
}
