use stride_state::{Event, PlaybackSession, Side, VideoSlot};

use crate::constants;
use crate::theme;
use crate::{FrameLookup, SlotPresentation, UiAction};

pub fn info_card(ui: &mut egui::Ui, slot: &VideoSlot, view: &SlotPresentation) {
    egui::Frame::new()
        .fill(theme::CARD_BG)
        .corner_radius(theme::ROUNDING)
        .inner_margin(egui::Margin::same(12))
        .stroke(egui::Stroke::new(1.0, theme::ORANGE))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                egui::RichText::new(&view.display_name)
                    .color(theme::NAVY)
                    .strong(),
            );
            ui.colored_label(
                theme::TEXT_PRIMARY,
                format!(
                    "Frames: {} @ {:.1} fps",
                    slot.timing.frame_count, slot.timing.fps
                ),
            );
        });
}

pub fn slot_panel(
    ui: &mut egui::Ui,
    side: Side,
    session: &PlaybackSession,
    view: &SlotPresentation,
    frames: &dyn FrameLookup,
    actions: &mut Vec<UiAction>,
) {
    let slot = session.slot(side);
    ui.label(theme::heading(&view.display_name));

    if slot.timing.frame_count == 0 {
        ui.colored_label(theme::TEXT_DIM, "Video processing in progress...");
        return;
    }

    let last = slot.timing.last_frame();

    ui.horizontal(|ui| {
        let play_label = if slot.is_playing() {
            "⏸ Pause"
        } else {
            "▶ Play"
        };
        if ui.button(play_label).clicked() {
            actions.push(UiAction::Playback(Event::TogglePlay(side)));
        }
        if slot.is_playing() {
            ui.colored_label(theme::ORANGE, "▶");
        }
    });

    let mut frame = slot.current_frame;
    let response = ui
        .add(egui::Slider::new(&mut frame, 0..=last).text("Frame"))
        .on_hover_text(format!("Navigate through {}", view.display_name));
    if response.changed() {
        actions.push(UiAction::Playback(Event::Seek(side, frame)));
    }

    transport_bar(ui, side, session.step_frames, actions);

    match frames.slot_frame(side) {
        Some(tex) if view.frame_error.is_none() => {
            show_frame_texture(ui, tex);
            if let Some(pose) = view.pose {
                let caption = if pose.detected {
                    format!(
                        "✓ Pose detected (confidence: {:.2}) | Frame: {}/{last}",
                        pose.confidence, slot.current_frame
                    )
                } else {
                    format!("✗ No pose detected | Frame: {}/{last}", slot.current_frame)
                };
                ui.colored_label(theme::TEXT_DIM, caption);
            }
        }
        _ => {
            ui.colored_label(theme::ERROR, "Could not load frame");
            if let Some(err) = &view.frame_error {
                ui.colored_label(theme::TEXT_DIM, err);
            }
        }
    }
}

fn transport_bar(ui: &mut egui::Ui, side: Side, step: i64, actions: &mut Vec<UiAction>) {
    let btn = constants::TRANSPORT_BTN_SIZE;
    ui.horizontal(|ui| {
        if ui
            .add_sized(btn, egui::Button::new("\u{23EE}"))
            .on_hover_text("First frame")
            .clicked()
        {
            actions.push(UiAction::Playback(Event::First(side)));
        }
        if ui
            .add_sized(btn, egui::Button::new(format!("\u{23EA} -{step}")))
            .on_hover_text(format!("Back {step} frames"))
            .clicked()
        {
            actions.push(UiAction::Playback(Event::Step(side, -step)));
        }
        if ui
            .add_sized(btn, egui::Button::new(format!("\u{23E9} +{step}")))
            .on_hover_text(format!("Forward {step} frames"))
            .clicked()
        {
            actions.push(UiAction::Playback(Event::Step(side, step)));
        }
        if ui
            .add_sized(btn, egui::Button::new("\u{23ED}"))
            .on_hover_text("Last frame")
            .clicked()
        {
            actions.push(UiAction::Playback(Event::Last(side)));
        }
    });
}

fn show_frame_texture(ui: &mut egui::Ui, tex: &egui::TextureHandle) {
    let tex_size = tex.size_vec2();
    let scale = (ui.available_width() / tex_size.x).min(1.0);
    let display_size = tex_size * scale;

    let frame_rect = egui::Rect::from_min_size(ui.cursor().min, display_size);
    ui.painter().rect_stroke(
        frame_rect,
        theme::ROUNDING_LG,
        egui::Stroke::new(constants::FRAME_BORDER, theme::ORANGE),
        egui::StrokeKind::Outside,
    );

    ui.image(egui::load::SizedTexture::new(tex.id(), display_size));
}
