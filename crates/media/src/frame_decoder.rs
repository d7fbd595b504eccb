use std::path::{Path, PathBuf};

use gstreamer as gst;
use gstreamer::prelude::*;
use gstreamer_app as gst_app;
use gstreamer_video as gst_video;
use stride_state::clock::DEFAULT_FPS;
use tracing::debug;

use crate::error::{MediaError, Result};
use crate::gst_init::*;

const PREROLL_TIMEOUT_SECS: u64 = 10;
const SEEK_TIMEOUT_SECS: u64 = 5;
const END_MARGIN_NS: u64 = 1_000_000;

/// A paused GStreamer pipeline that grabs single frames by accurate seek.
pub struct GstFrameDecoder {
    path: PathBuf,
    pipeline: gst::Pipeline,
    appsink: gst_app::AppSink,
}

impl GstFrameDecoder {
    pub fn open(path: &Path) -> Result<Self> {
        init_once()?;

        let location = path
            .to_str()
            .ok_or_else(|| MediaError::Pipeline(format!("non UTF-8 path: {}", path.display())))?;

        let pipeline = gst::Pipeline::new();

        let filesrc = gst::ElementFactory::make("filesrc")
            .property("location", location)
            .build()
            .map_err(|e| MediaError::Pipeline(format!("failed to create filesrc: {e}")))?;

        let decodebin = make_element("decodebin")?;
        let videoconvert = make_element("videoconvert")?;

        let appsink = gst_app::AppSink::builder()
            .caps(&build_rgba_caps())
            .sync(false)
            .build();

        pipeline
            .add_many([
                &filesrc,
                &decodebin,
                &videoconvert,
                appsink.upcast_ref::<gst::Element>(),
            ])
            .map_err(|e| MediaError::Pipeline(format!("failed to add elements: {e}")))?;

        gst::Element::link_many([&filesrc, &decodebin])
            .map_err(|e| MediaError::Pipeline(format!("failed to link filesrc->decodebin: {e}")))?;
        gst::Element::link_many([&videoconvert, appsink.upcast_ref::<gst::Element>()])
            .map_err(|e| MediaError::Pipeline(format!("failed to link video chain: {e}")))?;

        connect_decodebin_video_only(&decodebin, &videoconvert);

        let decoder = Self {
            path: path.to_path_buf(),
            pipeline,
            appsink,
        };

        decoder
            .pipeline
            .set_state(gst::State::Paused)
            .map_err(|e| MediaError::Pipeline(format!("failed to set Paused: {e}")))?;
        let bus = decoder
            .pipeline
            .bus()
            .ok_or_else(|| MediaError::Pipeline("no bus".to_string()))?;
        wait_for_async_done(&bus, gst::ClockTime::from_seconds(PREROLL_TIMEOUT_SECS))?;

        debug!(path = %path.display(), "opened frame decoder");
        Ok(decoder)
    }

    /// Decodes frame `frame_index` at native resolution.
    pub fn decode_frame(&mut self, frame_index: usize, fps: f64) -> Result<image::RgbaImage> {
        let duration = self.pipeline.query_duration::<gst::ClockTime>();
        let seek_pos = seek_target(frame_index, fps, duration);

        self.pipeline
            .seek_simple(gst::SeekFlags::FLUSH | gst::SeekFlags::ACCURATE, seek_pos)
            .map_err(|e| self.failure(frame_index, format!("seek failed: {e}")))?;
        if let Some(bus) = self.pipeline.bus() {
            wait_for_async_done(&bus, gst::ClockTime::from_seconds(SEEK_TIMEOUT_SECS))
                .map_err(|e| self.failure(frame_index, e.to_string()))?;
        }

        let sample = self
            .appsink
            .try_pull_preroll(gst::ClockTime::from_seconds(SEEK_TIMEOUT_SECS))
            .ok_or_else(|| self.failure(frame_index, "no frame after seek".to_string()))?;

        self.sample_to_image(&sample)
            .ok_or_else(|| self.failure(frame_index, "unreadable sample".to_string()))
    }

    fn sample_to_image(&self, sample: &gst::Sample) -> Option<image::RgbaImage> {
        let caps = sample.caps()?;
        let info = gst_video::VideoInfo::from_caps(caps).ok()?;
        let width = info.width();
        let height = info.height();
        let stride = usize::try_from(*info.stride().first()?).ok()?;
        let row_bytes = width as usize * 4;

        let buffer = sample.buffer()?;
        let map = buffer.map_readable().ok()?;
        let data = map.as_slice();

        let mut pixels = Vec::with_capacity(row_bytes * height as usize);
        for y in 0..height as usize {
            let start = y * stride;
            pixels.extend_from_slice(data.get(start..start + row_bytes)?);
        }

        image::RgbaImage::from_raw(width, height, pixels)
    }

    fn failure(&self, frame_index: usize, reason: String) -> MediaError {
        MediaError::DecodeFailure {
            path: self.path.clone(),
            frame_index,
            reason,
        }
    }
}

/// Middle of the frame's display interval, kept strictly inside the stream
/// so the last frame never seeks onto EOS.
pub(crate) fn seek_target(
    frame_index: usize,
    fps: f64,
    duration: Option<gst::ClockTime>,
) -> gst::ClockTime {
    let fps = if fps > 0.0 { fps } else { DEFAULT_FPS };
    let seconds = (frame_index as f64 + 0.5) / fps;
    let target = (seconds * 1_000_000_000.0) as u64;
    let target = match duration {
        Some(d) if d.nseconds() > 0 => target.min(d.nseconds().saturating_sub(END_MARGIN_NS)),
        _ => target,
    };
    gst::ClockTime::from_nseconds(target)
}

impl Drop for GstFrameDecoder {
    fn drop(&mut self) {
        let _ = self.pipeline.set_state(gst::State::Null);
        let _ = self.pipeline.state(gst::ClockTime::from_seconds(2));
    }
}
