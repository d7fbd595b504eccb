use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{MediaError, Result};
use crate::layout::MediaLayout;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseFrameRecord {
    #[serde(default)]
    pub has_pose: bool,
    #[serde(default)]
    pub confidence: f64,
}

/// Side-car detections for one clip, indexed by frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseData {
    #[serde(default)]
    pub total_frames: usize,
    #[serde(default)]
    pub frames: Vec<PoseFrameRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseStats {
    pub total_frames: usize,
    pub detected_frames: usize,
    pub detection_rate: f64,
    pub mean_confidence: f64,
}

impl PoseData {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn frame(&self, frame_index: usize) -> Option<&PoseFrameRecord> {
        self.frames.get(frame_index)
    }

    pub fn stats(&self) -> PoseStats {
        let detected: Vec<f64> = self
            .frames
            .iter()
            .filter(|f| f.has_pose)
            .map(|f| f.confidence)
            .collect();
        let detection_rate = if self.total_frames > 0 {
            detected.len() as f64 / self.total_frames as f64
        } else {
            0.0
        };
        let mean_confidence = if detected.is_empty() {
            0.0
        } else {
            detected.iter().sum::<f64>() / detected.len() as f64
        };
        PoseStats {
            total_frames: self.total_frames,
            detected_frames: detected.len(),
            detection_rate,
            mean_confidence,
        }
    }
}

/// Lazily loaded pose data keyed by video identifier. Absent or unreadable
/// files are remembered as absent until [`PoseStore::invalidate`].
#[derive(Debug)]
pub struct PoseStore {
    layout: MediaLayout,
    cache: HashMap<String, Option<Arc<PoseData>>>,
}

impl PoseStore {
    pub fn new(layout: MediaLayout) -> Self {
        Self {
            layout,
            cache: HashMap::new(),
        }
    }

    pub fn set_layout(&mut self, layout: MediaLayout) {
        self.layout = layout;
        self.invalidate();
    }

    pub fn invalidate(&mut self) {
        self.cache.clear();
    }

    pub fn load(&mut self, video_id: &str) -> Result<Arc<PoseData>> {
        let entry = match self.cache.get(video_id) {
            Some(entry) => entry.clone(),
            None => {
                let entry = self.read(video_id);
                self.cache.insert(video_id.to_string(), entry.clone());
                entry
            }
        };
        entry.ok_or_else(|| MediaError::AnnotationMissing {
            video_id: video_id.to_string(),
        })
    }

    pub fn frame(&mut self, video_id: &str, frame_index: usize) -> Option<PoseFrameRecord> {
        self.load(video_id).ok()?.frame(frame_index).copied()
    }

    pub fn stats(&mut self, video_id: &str) -> Option<PoseStats> {
        self.load(video_id).ok().map(|data| data.stats())
    }

    fn read(&self, video_id: &str) -> Option<Arc<PoseData>> {
        let path = self.layout.pose_data_path(video_id);
        if !path.is_file() {
            debug!(video_id, "no pose data");
            return None;
        }
        match PoseData::load(&path) {
            Ok(data) => Some(Arc::new(data)),
            Err(e) => {
                warn!(path = %path.display(), "ignoring pose data: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SAMPLE: &str = r#"{
        "total_frames": 4,
        "frames": [
            {"has_pose": true, "confidence": 0.9, "keypoints": [[0.1, 0.2]]},
            {"has_pose": false, "confidence": 0.0},
            {"has_pose": true, "confidence": 0.7},
            {"has_pose": false}
        ]
    }"#;

    #[test]
    fn stats_cover_detected_frames_only() {
        let data = PoseData::from_json(SAMPLE).unwrap();
        let stats = data.stats();
        assert_eq!(stats.total_frames, 4);
        assert_eq!(stats.detected_frames, 2);
        assert!((stats.detection_rate - 0.5).abs() < 1e-9);
        assert!((stats.mean_confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn no_detections_means_zero_confidence() {
        let data = PoseData::from_json(r#"{"total_frames": 0, "frames": []}"#).unwrap();
        let stats = data.stats();
        assert_eq!(stats.detection_rate, 0.0);
        assert_eq!(stats.mean_confidence, 0.0);
    }

    #[test]
    fn absent_pose_data_is_annotation_missing() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = PoseStore::new(MediaLayout::new(dir.path()));
        assert!(matches!(
            store.load("2009_Kiplagat"),
            Err(MediaError::AnnotationMissing { .. })
        ));
        assert_eq!(store.stats("2009_Kiplagat"), None);
        assert_eq!(store.frame("2009_Kiplagat", 0), None);
    }

    #[test]
    fn malformed_file_degrades_to_missing() {
        let dir = tempfile::tempdir().unwrap();
        let layout = MediaLayout::new(dir.path());
        fs::create_dir_all(layout.pose_dir()).unwrap();
        fs::write(layout.pose_data_path("bad"), "{not json").unwrap();

        let mut store = PoseStore::new(layout);
        assert!(store.load("bad").is_err());
    }

    #[test]
    fn invalidate_picks_up_files_written_later() {
        let dir = tempfile::tempdir().unwrap();
        let layout = MediaLayout::new(dir.path());
        let mut store = PoseStore::new(layout.clone());
        assert!(store.load("clip").is_err());

        fs::create_dir_all(layout.pose_dir()).unwrap();
        fs::write(layout.pose_data_path("clip"), SAMPLE).unwrap();
        assert!(store.load("clip").is_err());

        store.invalidate();
        let record = store.frame("clip", 2).unwrap();
        assert!(record.has_pose);
        assert_eq!(store.frame("clip", 10), None);
    }
}
