use tracing::debug;

use crate::clock::{self, Anchor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];

    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "Video 1",
            Side::Right => "Video 2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SlotState {
    #[default]
    Paused,
    Playing { anchor: Anchor },
}

/// Metadata the clock needs, refreshed from the resolved video every cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotTiming {
    pub fps: f64,
    pub frame_count: usize,
}

impl Default for SlotTiming {
    fn default() -> Self {
        Self {
            fps: clock::DEFAULT_FPS,
            frame_count: 0,
        }
    }
}

impl SlotTiming {
    pub fn last_frame(&self) -> usize {
        self.frame_count.saturating_sub(1)
    }
}

#[derive(Debug, Clone)]
pub struct VideoSlot {
    pub video_id: String,
    pub current_frame: usize,
    pub state: SlotState,
    pub timing: SlotTiming,
}

impl VideoSlot {
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            current_frame: 0,
            state: SlotState::Paused,
            timing: SlotTiming::default(),
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, SlotState::Playing { .. })
    }

    pub fn anchor(&self) -> Option<Anchor> {
        match self.state {
            SlotState::Playing { anchor } => Some(anchor),
            SlotState::Paused => None,
        }
    }

    /// Starts playback from the current frame. A slot with no frames stays
    /// paused.
    pub fn play(&mut self, now: f64) -> bool {
        if self.timing.frame_count == 0 {
            debug!(video_id = %self.video_id, "play ignored, no frames yet");
            return false;
        }
        debug!(video_id = %self.video_id, frame = self.current_frame, now, "play");
        self.state = SlotState::Playing {
            anchor: Anchor::new(now, self.current_frame),
        };
        true
    }

    pub fn pause(&mut self) {
        if self.is_playing() {
            debug!(video_id = %self.video_id, frame = self.current_frame, "pause");
        }
        self.state = SlotState::Paused;
    }

    pub fn toggle_play(&mut self, now: f64) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play(now);
        }
    }

    /// Sets the frame directly. A playing slot is re-anchored at `now` so the
    /// next tick continues from the new position.
    pub fn seek(&mut self, frame: usize, now: f64) {
        self.current_frame = frame.min(self.timing.last_frame());
        debug!(video_id = %self.video_id, requested = frame, frame = self.current_frame, "seek");
        self.reanchor(now);
    }

    pub fn step(&mut self, delta: i64, now: f64) {
        let target = (self.current_frame as i64).saturating_add(delta).max(0) as usize;
        self.seek(target, now);
    }

    pub fn reanchor(&mut self, now: f64) {
        if let SlotState::Playing { anchor } = &mut self.state {
            debug!(video_id = %self.video_id, frame = self.current_frame, now, "re-anchor");
            *anchor = Anchor::new(now, self.current_frame);
        }
    }

    /// Replaces the timing, keeping the current frame in range.
    pub fn set_timing(&mut self, timing: SlotTiming, now: f64) {
        if self.timing == timing {
            return;
        }
        self.timing = timing;
        if timing.frame_count == 0 {
            self.current_frame = 0;
            self.pause();
            return;
        }
        let clamped = self.current_frame.min(timing.last_frame());
        if clamped != self.current_frame || self.is_playing() {
            self.current_frame = clamped;
            self.reanchor(now);
        }
    }

    pub fn advance(&mut self, now: f64, speed: f64) {
        if let SlotState::Playing { anchor } = self.state {
            self.current_frame =
                anchor.frame_at(now, self.timing.fps, speed, self.timing.frame_count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_slot(frame_count: usize) -> VideoSlot {
        let mut slot = VideoSlot::new("clip");
        slot.set_timing(
            SlotTiming {
                fps: 30.0,
                frame_count,
            },
            0.0,
        );
        slot
    }

    #[test]
    fn anchor_exists_only_while_playing() {
        let mut slot = ready_slot(100);
        assert!(slot.anchor().is_none());
        slot.play(1.0);
        assert_eq!(slot.anchor(), Some(Anchor::new(1.0, 0)));
        slot.pause();
        assert!(slot.anchor().is_none());
    }

    #[test]
    fn empty_clip_never_starts_playing() {
        let mut slot = ready_slot(0);
        assert!(!slot.play(0.0));
        slot.toggle_play(0.0);
        assert!(!slot.is_playing());
    }

    #[test]
    fn step_clamps_at_both_ends() {
        let mut slot = ready_slot(50);
        slot.step(-10, 0.0);
        assert_eq!(slot.current_frame, 0);
        slot.seek(45, 0.0);
        slot.step(10, 0.0);
        assert_eq!(slot.current_frame, 49);
    }

    #[test]
    fn seek_while_playing_reanchors() {
        let mut slot = ready_slot(100);
        slot.play(0.0);
        slot.advance(2.0, 1.0);
        assert_eq!(slot.current_frame, 60);
        slot.seek(10, 2.0);
        assert_eq!(slot.anchor(), Some(Anchor::new(2.0, 10)));
        slot.advance(3.0, 1.0);
        assert_eq!(slot.current_frame, 40);
    }

    #[test]
    fn shrinking_clip_clamps_and_emptying_pauses() {
        let mut slot = ready_slot(100);
        slot.seek(90, 0.0);
        slot.set_timing(
            SlotTiming {
                fps: 25.0,
                frame_count: 40,
            },
            0.0,
        );
        assert_eq!(slot.current_frame, 39);

        slot.play(0.0);
        slot.set_timing(SlotTiming::default(), 1.0);
        assert!(!slot.is_playing());
        assert_eq!(slot.current_frame, 0);
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn transitions_are_logged_at_debug() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut slot = ready_slot(100);
            slot.play(0.0);
            slot.seek(40, 1.0);
            slot.pause();
        });

        let log = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        for message in ["play", "seek", "re-anchor", "pause"] {
            assert!(log.contains(message), "missing {message:?} in {log}");
        }
        assert!(log.contains("video_id=clip"));
    }
}
