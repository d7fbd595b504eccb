//! One render cycle: apply a pending event, advance the clocks, fetch the
//! frame pair.

use std::path::PathBuf;
use std::sync::Arc;

use stride_media::{
    FrameAccessor, FrameSource, MediaError, MediaLayout, PoseFrameRecord, PoseStats, PoseStore,
    VideoInfo,
};
use stride_state::{Event, PlaybackSession, Side};

#[derive(Debug)]
pub struct SlotOutput {
    pub path: Option<PathBuf>,
    pub info: VideoInfo,
    pub frame: Result<Arc<image::RgbaImage>, MediaError>,
    pub pose: Option<PoseFrameRecord>,
    pub stats: Option<PoseStats>,
}

#[derive(Debug)]
pub struct CycleOutput {
    pub left: SlotOutput,
    pub right: SlotOutput,
    pub needs_refresh: bool,
}

impl CycleOutput {
    pub fn slot(&self, side: Side) -> &SlotOutput {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

pub struct RenderLoop<S: FrameSource> {
    frames: FrameAccessor<S>,
    poses: PoseStore,
}

impl<S: FrameSource> RenderLoop<S> {
    pub fn new(source: S, layout: MediaLayout, display_height: u32) -> Self {
        Self {
            frames: FrameAccessor::new(source, layout.clone(), display_height),
            poses: PoseStore::new(layout),
        }
    }

    pub fn set_layout(&mut self, layout: MediaLayout) {
        self.frames.set_layout(layout.clone());
        self.poses.set_layout(layout);
    }

    /// Called when files under the data directory changed.
    pub fn invalidate(&mut self) {
        self.frames.invalidate_metadata();
        self.poses.invalidate();
    }

    pub fn frames(&self) -> &FrameAccessor<S> {
        &self.frames
    }

    pub fn cycle(
        &mut self,
        session: &mut PlaybackSession,
        event: Option<Event>,
        now: f64,
    ) -> CycleOutput {
        let mut media = self.sync_timings(session, now);
        if let Some(event) = event {
            let changes_media = event.changes_media();
            session.handle_event(event, now);
            if changes_media {
                media = self.sync_timings(session, now);
            }
        }
        session.tick(now);

        let [left, right] = media;
        CycleOutput {
            left: self.render_slot(session, Side::Left, left),
            right: self.render_slot(session, Side::Right, right),
            needs_refresh: session.needs_refresh(),
        }
    }

    /// Resolves each slot's file once and pushes its timing into the session.
    fn sync_timings(&mut self, session: &mut PlaybackSession, now: f64) -> [SlotMedia; 2] {
        let mode = session.view_mode;
        Side::ALL.map(|side| {
            let (path, info) = self.frames.resolve_media(&session.slot(side).video_id, mode);
            session.set_timing(side, info.timing(), now);
            SlotMedia { path, info }
        })
    }

    fn render_slot(
        &mut self,
        session: &PlaybackSession,
        side: Side,
        media: SlotMedia,
    ) -> SlotOutput {
        let slot = session.slot(side);
        let frame = match &media.path {
            Some(path) => self.frames.frame_at(path, media.info, slot.current_frame),
            None => Err(MediaError::ResourceMissing {
                video_id: slot.video_id.clone(),
                mode: session.view_mode,
            }),
        };
        SlotOutput {
            path: media.path,
            info: media.info,
            frame,
            pose: self.poses.frame(&slot.video_id, slot.current_frame),
            stats: self.poses.stats(&slot.video_id),
        }
    }
}

struct SlotMedia {
    path: Option<PathBuf>,
    info: VideoInfo,
}
