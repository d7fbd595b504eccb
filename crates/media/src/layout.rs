use std::path::{Path, PathBuf};

use stride_state::ViewMode;

use crate::error::{MediaError, Result};

pub const RAW_VIDEO_EXTENSIONS: &[&str] = &["mov", "mp4", "avi", "mkv"];

const OVERLAY_SUFFIX: &str = "_overlay";
const KEYPOINTS_SUFFIX: &str = "_keypoints";
const POSE_DATA_SUFFIX: &str = "_pose_data.json";

/// On-disk layout written by the offline preprocessing pipeline:
///
/// ```text
/// <root>/raw_videos/
/// <root>/processed_videos/videos_with_overlay/{id}_overlay.mp4
/// <root>/processed_videos/videos_keypoints_only/{id}_keypoints.mp4
/// <root>/processed_videos/pose_data/{id}_pose_data.json
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaLayout {
    root: PathBuf,
}

impl MediaLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn raw_dir(&self) -> PathBuf {
        self.root.join("raw_videos")
    }

    pub fn processed_dir(&self) -> PathBuf {
        self.root.join("processed_videos")
    }

    pub fn overlay_dir(&self) -> PathBuf {
        self.processed_dir().join("videos_with_overlay")
    }

    pub fn keypoints_dir(&self) -> PathBuf {
        self.processed_dir().join("videos_keypoints_only")
    }

    pub fn pose_dir(&self) -> PathBuf {
        self.processed_dir().join("pose_data")
    }

    pub fn pose_data_path(&self, video_id: &str) -> PathBuf {
        self.pose_dir().join(format!("{video_id}{POSE_DATA_SUFFIX}"))
    }

    /// Where the rendering for `mode` would live, whether or not it exists.
    pub fn rendering_path(&self, video_id: &str, mode: ViewMode) -> PathBuf {
        match mode {
            ViewMode::Overlay => self
                .overlay_dir()
                .join(format!("{video_id}{OVERLAY_SUFFIX}.mp4")),
            ViewMode::Keypoints => self
                .keypoints_dir()
                .join(format!("{video_id}{KEYPOINTS_SUFFIX}.mp4")),
        }
    }

    /// The preferred rendering for `mode`, falling back to the other view.
    pub fn processed_video_path(&self, video_id: &str, mode: ViewMode) -> Option<PathBuf> {
        [mode, mode.fallback()]
            .into_iter()
            .map(|m| self.rendering_path(video_id, m))
            .find(|p| p.is_file())
    }

    pub fn resolve(&self, video_id: &str, mode: ViewMode) -> Result<PathBuf> {
        self.processed_video_path(video_id, mode)
            .ok_or_else(|| MediaError::ResourceMissing {
                video_id: video_id.to_string(),
                mode,
            })
    }

    /// Identifiers with an overlay rendering, sorted.
    pub fn processed_video_ids(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(self.overlay_dir()) else {
            return Vec::new();
        };
        let mut ids: Vec<String> = entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("mp4"))
            .filter_map(|p| {
                let stem = p.file_stem()?.to_str()?;
                stem.strip_suffix(OVERLAY_SUFFIX).map(str::to_string)
            })
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// Stems of raw footage awaiting processing. `None` when the raw
    /// directory itself is missing.
    pub fn raw_video_names(&self) -> Option<Vec<String>> {
        let entries = std::fs::read_dir(self.raw_dir()).ok()?;
        let mut names: Vec<String> = entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|ext| RAW_VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
            })
            .filter_map(|p| p.file_stem().and_then(|s| s.to_str()).map(str::to_string))
            .collect();
        names.sort();
        Some(names)
    }
}
