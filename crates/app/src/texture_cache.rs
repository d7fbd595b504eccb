use std::sync::Arc;

use stride_state::Side;

struct SlotTexture {
    source: Arc<image::RgbaImage>,
    handle: egui::TextureHandle,
}

/// GPU textures for the two displayed frames. A slot's texture is only
/// re-uploaded when the cached frame behind it changes.
#[derive(Default)]
pub struct TextureCache {
    left: Option<SlotTexture>,
    right: Option<SlotTexture>,
}

impl TextureCache {
    fn entry(&mut self, side: Side) -> &mut Option<SlotTexture> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn update_slot(&mut self, ctx: &egui::Context, side: Side, frame: &Arc<image::RgbaImage>) {
        let entry = self.entry(side);
        if entry
            .as_ref()
            .is_some_and(|t| Arc::ptr_eq(&t.source, frame))
        {
            return;
        }

        let (width, height) = (frame.width() as usize, frame.height() as usize);
        let image = egui::ColorImage::from_rgba_unmultiplied([width, height], frame.as_raw());
        if let Some(tex) = entry.as_mut() {
            let [tw, th] = tex.handle.size();
            if tw == width && th == height {
                tex.handle.set(image, egui::TextureOptions::LINEAR);
                tex.source = Arc::clone(frame);
                return;
            }
        }
        let name = match side {
            Side::Left => "slot_frame_left",
            Side::Right => "slot_frame_right",
        };
        let handle = ctx.load_texture(name, image, egui::TextureOptions::LINEAR);
        *entry = Some(SlotTexture {
            source: Arc::clone(frame),
            handle,
        });
    }

    pub fn clear_slot(&mut self, side: Side) {
        *self.entry(side) = None;
    }
}

impl stride_ui::FrameLookup for TextureCache {
    fn slot_frame(&self, side: Side) -> Option<&egui::TextureHandle> {
        let entry = match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        };
        entry.as_ref().map(|t| &t.handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_ui::FrameLookup;

    fn frame(w: u32, h: u32) -> Arc<image::RgbaImage> {
        Arc::new(image::RgbaImage::new(w, h))
    }

    #[test]
    fn same_size_frames_reuse_the_texture() {
        let ctx = egui::Context::default();
        let mut cache = TextureCache::default();
        assert!(cache.slot_frame(Side::Left).is_none());

        cache.update_slot(&ctx, Side::Left, &frame(8, 4));
        let first = cache.slot_frame(Side::Left).unwrap().id();
        cache.update_slot(&ctx, Side::Left, &frame(8, 4));
        assert_eq!(cache.slot_frame(Side::Left).unwrap().id(), first);

        cache.update_slot(&ctx, Side::Left, &frame(16, 4));
        let resized = cache.slot_frame(Side::Left).unwrap();
        assert_eq!(resized.size(), [16, 4]);
        assert!(cache.slot_frame(Side::Right).is_none());

        cache.clear_slot(Side::Left);
        assert!(cache.slot_frame(Side::Left).is_none());
    }
}
