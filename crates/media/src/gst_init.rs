use std::sync::OnceLock;

use gstreamer as gst;
use gstreamer::prelude::*;

use crate::error::{MediaError, Result};

pub fn init_once() -> Result<()> {
    static INIT: OnceLock<std::result::Result<(), String>> = OnceLock::new();
    INIT.get_or_init(|| gst::init().map_err(|e| e.to_string()))
        .clone()
        .map_err(|e| MediaError::Pipeline(format!("failed to initialize GStreamer: {e}")))
}

pub(crate) fn wait_for_async_done(bus: &gst::Bus, timeout: gst::ClockTime) -> Result<()> {
    loop {
        let Some(msg) = bus.timed_pop(timeout) else {
            return Ok(());
        };
        match msg.view() {
            gst::MessageView::AsyncDone(_) => return Ok(()),
            gst::MessageView::Error(err) => {
                return Err(MediaError::Pipeline(err.error().to_string()));
            }
            _ => {}
        }
    }
}

/// RGBA at whatever size the stream decodes to; resizing happens afterwards.
pub(crate) fn build_rgba_caps() -> gst::Caps {
    use gstreamer_video as gst_video;
    gst_video::VideoCapsBuilder::new()
        .format(gst_video::VideoFormat::Rgba)
        .build()
}

pub(crate) fn make_element(factory_name: &str) -> Result<gst::Element> {
    gst::ElementFactory::make(factory_name)
        .build()
        .map_err(|e| MediaError::Pipeline(format!("failed to create {factory_name}: {e}")))
}

pub(crate) fn connect_decodebin_video_only(decodebin: &gst::Element, videoconvert: &gst::Element) {
    let videoconvert_weak = videoconvert.downgrade();
    decodebin.connect_pad_added(move |_dbin, src_pad| {
        let caps = match src_pad.current_caps() {
            Some(c) => c,
            None => src_pad.query_caps(None),
        };
        let Some(structure) = caps.structure(0) else {
            return;
        };
        if !structure.name().as_str().starts_with("video/") {
            return;
        }
        let Some(vc) = videoconvert_weak.upgrade() else {
            return;
        };
        let Some(sink_pad) = vc.static_pad("sink") else {
            return;
        };
        if !sink_pad.is_linked() {
            let _ = src_pad.link(&sink_pad);
        }
    });
}
