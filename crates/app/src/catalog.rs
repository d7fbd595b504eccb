use std::sync::mpsc;

use notify::{EventKind, RecursiveMode, Watcher};
use stride_media::MediaLayout;
use stride_state::athlete::{self, AthleteInfo};
use stride_state::CatalogEntry;
use tracing::{debug, info, warn};

/// Processed videos available for comparison, kept current by a folder
/// watcher on the data directory.
pub struct VideoCatalog {
    layout: MediaLayout,
    entries: Vec<CatalogEntry>,
    watch_tx: mpsc::Sender<()>,
    watch_rx: mpsc::Receiver<()>,
    watcher: Option<notify::RecommendedWatcher>,
}

impl VideoCatalog {
    pub fn open(layout: MediaLayout) -> Self {
        let (watch_tx, watch_rx) = mpsc::channel();
        let mut catalog = Self {
            layout,
            entries: Vec::new(),
            watch_tx,
            watch_rx,
            watcher: None,
        };
        catalog.rescan();
        catalog.watch();
        catalog
    }

    pub fn layout(&self) -> &MediaLayout {
        &self.layout
    }

    pub fn set_layout(&mut self, layout: MediaLayout) {
        self.layout = layout;
        self.rescan();
        self.watch();
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn default_pair(&self) -> Option<(String, String)> {
        let ids: Vec<String> = self.entries.iter().map(|e| e.video_id.clone()).collect();
        athlete::default_pair(&ids)
    }

    pub fn display_name(&self, video_id: &str) -> String {
        self.entries
            .iter()
            .find(|e| e.video_id == video_id)
            .map(|e| e.display_name().to_string())
            .unwrap_or_else(|| AthleteInfo::parse(video_id).display_name)
    }

    pub fn rescan(&mut self) {
        self.entries = self
            .layout
            .processed_video_ids()
            .into_iter()
            .map(CatalogEntry::new)
            .collect();
        info!(
            root = %self.layout.root().display(),
            count = self.entries.len(),
            "scanned processed videos"
        );
    }

    /// Drains watcher notifications. Rescans and returns `true` if anything
    /// under the data directory changed since the last call.
    pub fn poll_changes(&mut self) -> bool {
        let mut changed = false;
        while self.watch_rx.try_recv().is_ok() {
            changed = true;
        }
        if changed {
            self.rescan();
            // The processed directory may have just been created.
            if self.watcher.is_none() {
                self.watch();
            }
        }
        changed
    }

    fn watch(&mut self) {
        self.watcher = None;
        let processed = self.layout.processed_dir();
        let target = if processed.is_dir() {
            processed
        } else if self.layout.root().is_dir() {
            self.layout.root().to_path_buf()
        } else {
            debug!(root = %self.layout.root().display(), "data directory missing, not watching");
            return;
        };

        let tx = self.watch_tx.clone();
        let watcher =
            notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
                let Ok(event) = res else { return };
                if matches!(
                    event.kind,
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                ) {
                    let _ = tx.send(());
                }
            });
        match watcher {
            Ok(mut w) => match w.watch(&target, RecursiveMode::Recursive) {
                Ok(()) => self.watcher = Some(w),
                Err(e) => warn!(path = %target.display(), "cannot watch data directory: {e}"),
            },
            Err(e) => warn!("folder watcher unavailable: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use stride_state::ViewMode;

    #[test]
    fn entries_carry_display_names() {
        let dir = tempfile::tempdir().unwrap();
        let layout = MediaLayout::new(dir.path());
        for id in ["2017_Berlin_Kipchoge", "2009_London_Kiplagat", "2015_Rupp"] {
            let path = layout.rendering_path(id, ViewMode::Overlay);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, b"").unwrap();
        }

        let catalog = VideoCatalog::open(layout);
        let names: Vec<&str> = catalog.entries().iter().map(|e| e.display_name()).collect();
        assert_eq!(
            names,
            vec!["Kiplagat (2009) (F)", "Rupp (2015) (?)", "Kipchoge (2017) (M)"]
        );
        assert_eq!(
            catalog.default_pair(),
            Some((
                "2009_London_Kiplagat".to_string(),
                "2017_Berlin_Kipchoge".to_string()
            ))
        );
    }

    #[test]
    fn empty_or_missing_directory_gives_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = VideoCatalog::open(MediaLayout::new(dir.path().join("nowhere")));
        assert!(catalog.is_empty());
        assert_eq!(catalog.default_pair(), None);
        assert_eq!(catalog.display_name("2011_Mosop"), "Kiplagat (2011) (F)");
    }

    fn wait_for_change(catalog: &mut VideoCatalog) -> bool {
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while std::time::Instant::now() < deadline {
            if catalog.poll_changes() {
                return true;
            }
            std::thread::sleep(std::time::Duration::from_millis(20));
        }
        false
    }

    #[test]
    fn videos_written_later_appear_after_poll() {
        let dir = tempfile::tempdir().unwrap();
        let layout = MediaLayout::new(dir.path());
        fs::create_dir_all(layout.overlay_dir()).unwrap();
        let mut catalog = VideoCatalog::open(layout.clone());
        assert!(catalog.is_empty());

        fs::write(
            layout.rendering_path("2017_Berlin_Kipchoge", ViewMode::Overlay),
            b"",
        )
        .unwrap();

        let mut found = false;
        for _ in 0..3 {
            if wait_for_change(&mut catalog) && !catalog.is_empty() {
                found = true;
                break;
            }
        }
        assert!(found, "new rendering never showed up");
        assert_eq!(catalog.entries()[0].video_id, "2017_Berlin_Kipchoge");
        assert_eq!(catalog.display_name("2017_Berlin_Kipchoge"), "Kipchoge (2017) (M)");
    }

    #[test]
    fn processed_folder_created_after_open_is_noticed() {
        let dir = tempfile::tempdir().unwrap();
        let layout = MediaLayout::new(dir.path());
        let mut catalog = VideoCatalog::open(layout.clone());
        assert!(catalog.is_empty());

        let path = layout.rendering_path("2009_London_Kiplagat", ViewMode::Overlay);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"").unwrap();

        let mut found = false;
        for _ in 0..3 {
            if wait_for_change(&mut catalog) && !catalog.is_empty() {
                found = true;
                break;
            }
        }
        assert!(found, "new rendering never showed up");
        assert_eq!(
            catalog.default_pair(),
            Some((
                "2009_London_Kiplagat".to_string(),
                "2009_London_Kiplagat".to_string()
            ))
        );
    }
}
