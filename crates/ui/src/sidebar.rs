use std::path::PathBuf;

use stride_state::session::{MAX_SPEED, MIN_SPEED, SPEED_STEP};
use stride_state::{CatalogEntry, Event, PlaybackSession, Side, ViewMode};

use crate::theme;
use crate::UiAction;

pub fn sidebar_panel(
    ui: &mut egui::Ui,
    session: &PlaybackSession,
    videos: &[CatalogEntry],
    actions: &mut Vec<UiAction>,
) {
    ui.label(theme::heading("Video Selection"));
    for side in Side::ALL {
        video_select(ui, side, session, videos, actions);
    }

    if ui
        .button("Open data folder…")
        .on_hover_text("Point the viewer at another data directory")
        .clicked()
    {
        if let Some(dir) = pick_data_folder() {
            actions.push(UiAction::OpenDataDir(dir));
        }
    }

    ui.add_space(16.0);
    ui.label(theme::heading("Display Settings"));
    ui.label("Background:");
    for mode in ViewMode::ALL {
        if ui.radio(session.view_mode == mode, mode.label()).clicked() && session.view_mode != mode
        {
            actions.push(UiAction::Playback(Event::SetViewMode(mode)));
        }
    }

    ui.add_space(12.0);
    ui.label(theme::heading("Playback Controls"));
    let play_all_label = if session.play_all {
        "⏸ Pause All"
    } else {
        "▶ Play All"
    };
    if ui.button(play_all_label).clicked() {
        actions.push(UiAction::Playback(Event::TogglePlayAll));
    }

    let mut speed = session.speed;
    let response = ui
        .add(
            egui::Slider::new(&mut speed, MIN_SPEED..=MAX_SPEED)
                .step_by(SPEED_STEP)
                .text("Playback Speed"),
        )
        .on_hover_text("Control how fast videos play back (0.1x = slow, 1.0x = real speed)");
    if response.changed() {
        actions.push(UiAction::Playback(Event::SetSpeed(speed)));
    }

    if ui.button("Reset to Frame 0").clicked() {
        actions.push(UiAction::Playback(Event::Reset));
    }

    ui.add_space(16.0);
    ui.separator();
    ui.label(
        egui::RichText::new(format!("{} video(s) available", videos.len()))
            .color(theme::NAVY)
            .strong(),
    );
    ui.colored_label(theme::TEXT_DIM, "Biomechanics Analysis Tool");
    ui.colored_label(theme::TEXT_DIM, "Syracuse University");
}

pub fn pick_data_folder() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Select data folder")
        .pick_folder()
}

fn video_select(
    ui: &mut egui::Ui,
    side: Side,
    session: &PlaybackSession,
    videos: &[CatalogEntry],
    actions: &mut Vec<UiAction>,
) {
    let current = &session.slot(side).video_id;
    let selected_text = videos
        .iter()
        .find(|v| &v.video_id == current)
        .map(|v| v.display_name().to_string())
        .unwrap_or_else(|| current.clone());

    ui.label(format!("{}:", side.label()));
    egui::ComboBox::from_id_salt(("video_select", side))
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for entry in videos {
                let selected = &entry.video_id == current;
                if ui.selectable_label(selected, entry.display_name()).clicked() && !selected {
                    actions.push(UiAction::Playback(Event::SelectVideo(
                        side,
                        entry.video_id.clone(),
                    )));
                }
            }
        });
}
