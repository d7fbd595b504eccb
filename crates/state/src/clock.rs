//! Time-based frame derivation for a playing slot.
//!
//! A slot that starts playing records an [`Anchor`]. Every later cycle asks
//! the clock which frame corresponds to "now", so the displayed frame depends
//! only on elapsed wall-clock time and never on how many cycles ran.

pub const DEFAULT_FPS: f64 = 30.0;

/// The `(timestamp, frame)` pair recorded when playback started or was last
/// re-anchored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub time: f64,
    pub frame: usize,
}

impl Anchor {
    pub fn new(time: f64, frame: usize) -> Self {
        Self { time, frame }
    }

    pub fn frame_at(&self, now: f64, fps: f64, speed: f64, frame_count: usize) -> usize {
        compute_frame(self.time, self.frame, now, fps, speed, frame_count)
    }
}

pub fn effective_fps(fps: f64) -> f64 {
    if fps.is_finite() && fps > 0.0 {
        fps
    } else {
        DEFAULT_FPS
    }
}

/// Whole frames advanced after `elapsed` seconds at `fps * speed`.
pub fn advanced_frames(elapsed: f64, fps: f64, speed: f64) -> u64 {
    let elapsed = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };
    let speed = if speed.is_finite() { speed.max(0.0) } else { 0.0 };
    (elapsed * effective_fps(fps) * speed).floor() as u64
}

/// Frame index `now` maps to, looping at `frame_count`.
///
/// Returns 0 for an empty clip. Timestamps before the anchor count as zero
/// elapsed time.
pub fn compute_frame(
    anchor_time: f64,
    anchor_frame: usize,
    now: f64,
    fps: f64,
    speed: f64,
    frame_count: usize,
) -> usize {
    if frame_count == 0 {
        return 0;
    }
    let advanced = advanced_frames(now - anchor_time, fps, speed);
    let count = frame_count as u64;
    ((anchor_frame as u64 % count + advanced % count) % count) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_clip_is_frame_zero() {
        assert_eq!(compute_frame(0.0, 0, 10.0, 30.0, 1.0, 0), 0);
        assert_eq!(compute_frame(0.0, 7, 10.0, 30.0, 1.0, 0), 0);
    }

    #[test]
    fn non_positive_fps_falls_back_to_thirty() {
        assert_eq!(compute_frame(0.0, 0, 1.0, 0.0, 1.0, 1000), 30);
        assert_eq!(compute_frame(0.0, 0, 1.0, -5.0, 1.0, 1000), 30);
        assert_eq!(compute_frame(0.0, 0, 1.0, f64::NAN, 1.0, 1000), 30);
    }

    #[test]
    fn slow_motion_scenario() {
        // 5 s at 30 fps and 0.2x advances floor(30.0) frames.
        assert_eq!(advanced_frames(5.0, 30.0, 0.2), 30);
        assert_eq!(compute_frame(0.0, 0, 5.0, 30.0, 0.2, 100), 30);
    }

    #[test]
    fn wraps_past_the_last_frame() {
        assert_eq!(compute_frame(0.0, 95, 1.0, 30.0, 1.0, 100), 25);
        assert_eq!(compute_frame(0.0, 0, 4.0, 30.0, 1.0, 100), 20);
    }

    #[test]
    fn output_stays_in_range_for_any_elapsed_time() {
        let frame_count = 37;
        for step in 0..2000 {
            let now = step as f64 * 0.173;
            for anchor_frame in [0, 1, 18, 36] {
                let idx = compute_frame(0.0, anchor_frame, now, 29.97, 0.65, frame_count);
                assert!(idx < frame_count, "idx {idx} out of range at t={now}");
            }
        }
    }

    #[test]
    fn higher_speed_never_advances_fewer_frames() {
        for elapsed in [0.0, 0.01, 0.5, 1.0, 3.3, 12.0, 60.0] {
            let mut previous = 0;
            let mut speed = 0.1;
            while speed <= 1.0 + 1e-9 {
                let frames = advanced_frames(elapsed, 30.0, speed);
                assert!(frames >= previous, "speed {speed} at {elapsed}s regressed");
                previous = frames;
                speed += 0.05;
            }
        }
    }

    #[test]
    fn time_before_anchor_is_zero_elapsed() {
        assert_eq!(compute_frame(10.0, 42, 9.0, 30.0, 1.0, 100), 42);
    }
}
