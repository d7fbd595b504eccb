use tracing::debug;

use crate::event::Event;
use crate::slot::{Side, SlotTiming, VideoSlot};

pub const MIN_SPEED: f64 = 0.1;
pub const MAX_SPEED: f64 = 1.0;
pub const DEFAULT_SPEED: f64 = 0.2;
pub const SPEED_STEP: f64 = 0.05;
pub const DEFAULT_STEP_FRAMES: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum ViewMode {
    #[default]
    Overlay,
    Keypoints,
}

impl ViewMode {
    pub const ALL: [ViewMode; 2] = [ViewMode::Overlay, ViewMode::Keypoints];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Overlay => "Video Background",
            ViewMode::Keypoints => "Blank Background",
        }
    }

    pub fn fallback(self) -> ViewMode {
        match self {
            ViewMode::Overlay => ViewMode::Keypoints,
            ViewMode::Keypoints => ViewMode::Overlay,
        }
    }
}

pub fn clamp_speed(speed: f64) -> f64 {
    if speed.is_nan() {
        return DEFAULT_SPEED;
    }
    speed.clamp(MIN_SPEED, MAX_SPEED)
}

/// Everything that survives between cycles for one user session.
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    pub left: VideoSlot,
    pub right: VideoSlot,
    /// Set by "play all". Slots stay individually controllable afterwards.
    pub play_all: bool,
    pub speed: f64,
    pub view_mode: ViewMode,
    pub step_frames: i64,
}

impl PlaybackSession {
    pub fn new(left_id: impl Into<String>, right_id: impl Into<String>) -> Self {
        Self {
            left: VideoSlot::new(left_id),
            right: VideoSlot::new(right_id),
            play_all: false,
            speed: DEFAULT_SPEED,
            view_mode: ViewMode::default(),
            step_frames: DEFAULT_STEP_FRAMES,
        }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = clamp_speed(speed);
        self
    }

    pub fn with_step_frames(mut self, step_frames: i64) -> Self {
        self.step_frames = step_frames.max(1);
        self
    }

    pub fn slot(&self, side: Side) -> &VideoSlot {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn slot_mut(&mut self, side: Side) -> &mut VideoSlot {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn any_playing(&self) -> bool {
        self.left.is_playing() || self.right.is_playing()
    }

    /// Whether the driver should schedule another cycle after rendering.
    pub fn needs_refresh(&self) -> bool {
        self.play_all || self.any_playing()
    }

    pub fn set_timing(&mut self, side: Side, timing: SlotTiming, now: f64) {
        self.slot_mut(side).set_timing(timing, now);
    }

    pub fn handle_event(&mut self, event: Event, now: f64) {
        debug!(?event, now, "applying playback event");
        match event {
            Event::TogglePlay(side) => {
                self.slot_mut(side).toggle_play(now);
            }
            Event::TogglePlayAll => {
                self.play_all = !self.play_all;
                let play = self.play_all;
                for side in Side::ALL {
                    let slot = self.slot_mut(side);
                    if play {
                        slot.play(now);
                    } else {
                        slot.pause();
                    }
                }
            }
            Event::Seek(side, frame) => self.slot_mut(side).seek(frame, now),
            Event::Step(side, delta) => self.slot_mut(side).step(delta, now),
            Event::First(side) => {
                let slot = self.slot_mut(side);
                slot.pause();
                slot.seek(0, now);
            }
            Event::Last(side) => {
                let slot = self.slot_mut(side);
                slot.pause();
                let last = slot.timing.last_frame();
                slot.seek(last, now);
            }
            Event::SetSpeed(speed) => self.set_speed(speed, now),
            Event::Reset => self.reset(),
            Event::SelectVideo(side, video_id) => {
                let slot = self.slot_mut(side);
                if slot.video_id != video_id {
                    slot.video_id = video_id;
                    slot.reanchor(now);
                }
            }
            Event::SetViewMode(mode) => self.view_mode = mode,
        }
    }

    /// Recomputes the frame of every playing slot from its anchor.
    pub fn tick(&mut self, now: f64) {
        let speed = self.speed;
        self.left.advance(now, speed);
        self.right.advance(now, speed);
    }

    fn set_speed(&mut self, speed: f64, now: f64) {
        let speed = clamp_speed(speed);
        if (speed - self.speed).abs() < f64::EPSILON {
            return;
        }
        // Settle each playing slot at the old rate before switching, so the
        // new rate only applies from `now` onward.
        self.tick(now);
        self.left.reanchor(now);
        self.right.reanchor(now);
        self.speed = speed;
    }

    fn reset(&mut self) {
        self.play_all = false;
        for side in Side::ALL {
            let slot = self.slot_mut(side);
            slot.pause();
            slot.current_frame = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> PlaybackSession {
        let mut s = PlaybackSession::new("a", "b");
        let timing = SlotTiming {
            fps: 30.0,
            frame_count: 100,
        };
        s.set_timing(Side::Left, timing, 0.0);
        s.set_timing(Side::Right, timing, 0.0);
        s
    }

    #[test]
    fn play_all_starts_and_stops_both() {
        let mut s = session();
        s.handle_event(Event::TogglePlayAll, 0.0);
        assert!(s.play_all);
        assert!(s.left.is_playing() && s.right.is_playing());

        s.handle_event(Event::TogglePlayAll, 1.0);
        assert!(!s.play_all);
        assert!(!s.any_playing());
    }

    #[test]
    fn slots_can_diverge_after_play_all() {
        let mut s = session();
        s.handle_event(Event::TogglePlayAll, 0.0);
        s.handle_event(Event::TogglePlay(Side::Right), 0.5);
        assert!(s.play_all);
        assert!(s.left.is_playing());
        assert!(!s.right.is_playing());
        assert!(s.needs_refresh());
    }

    #[test]
    fn play_all_flag_alone_keeps_refreshing() {
        let mut s = session();
        s.handle_event(Event::TogglePlayAll, 0.0);
        s.handle_event(Event::TogglePlay(Side::Left), 0.1);
        s.handle_event(Event::TogglePlay(Side::Right), 0.2);
        assert!(!s.any_playing());
        assert!(s.needs_refresh());
    }

    #[test]
    fn first_and_last_pause_the_slot() {
        let mut s = session();
        s.handle_event(Event::TogglePlay(Side::Left), 0.0);
        s.handle_event(Event::Last(Side::Left), 1.0);
        assert!(!s.left.is_playing());
        assert_eq!(s.left.current_frame, 99);

        s.handle_event(Event::TogglePlay(Side::Left), 1.0);
        s.handle_event(Event::First(Side::Left), 2.0);
        assert!(!s.left.is_playing());
        assert_eq!(s.left.current_frame, 0);
    }

    #[test]
    fn reset_clears_everything() {
        let mut s = session();
        s.handle_event(Event::Seek(Side::Left, 40), 0.0);
        s.handle_event(Event::TogglePlayAll, 0.0);
        s.tick(1.0);
        s.handle_event(Event::Reset, 1.0);
        assert!(!s.play_all);
        assert!(!s.any_playing());
        assert_eq!(s.left.current_frame, 0);
        assert_eq!(s.right.current_frame, 0);
        assert!(!s.needs_refresh());
    }

    #[test]
    fn speed_is_clamped() {
        let mut s = session();
        s.handle_event(Event::SetSpeed(5.0), 0.0);
        assert_eq!(s.speed, MAX_SPEED);
        s.handle_event(Event::SetSpeed(0.0), 0.0);
        assert_eq!(s.speed, MIN_SPEED);
    }

    #[test]
    fn speed_change_applies_from_the_moment_it_changes() {
        let mut s = session().with_speed(1.0);
        s.handle_event(Event::TogglePlay(Side::Left), 0.0);
        s.tick(1.0);
        assert_eq!(s.left.current_frame, 30);

        // Half a second later at 1.0x is frame 45; from there 0.5x for 2 s adds 30.
        s.handle_event(Event::SetSpeed(0.5), 1.5);
        assert_eq!(s.left.current_frame, 45);
        s.tick(3.5);
        assert_eq!(s.left.current_frame, 75);
    }

    #[test]
    fn selecting_a_video_keeps_position() {
        let mut s = session();
        s.handle_event(Event::Seek(Side::Right, 12), 0.0);
        s.handle_event(Event::SelectVideo(Side::Right, "c".into()), 0.0);
        assert_eq!(s.right.video_id, "c");
        assert_eq!(s.right.current_frame, 12);
    }
}
