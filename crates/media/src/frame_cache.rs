use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrameKey {
    pub path: PathBuf,
    pub frame_index: usize,
}

impl FrameKey {
    pub fn new(path: &Path, frame_index: usize) -> Self {
        Self {
            path: path.to_path_buf(),
            frame_index,
        }
    }
}

/// Decoded display frames for the whole session. Entries are never evicted.
#[derive(Debug, Default)]
pub struct FrameCache {
    entries: HashMap<FrameKey, Arc<image::RgbaImage>>,
    hits: u64,
    misses: u64,
}

impl FrameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, key: &FrameKey) -> Option<Arc<image::RgbaImage>> {
        match self.entries.get(key) {
            Some(img) => {
                self.hits += 1;
                Some(Arc::clone(img))
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, key: FrameKey, image: image::RgbaImage) -> Arc<image::RgbaImage> {
        let image = Arc::new(image);
        self.entries.insert(key, Arc::clone(&image));
        image
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
