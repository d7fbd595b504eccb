use crate::theme;
use crate::UiAction;

/// Raw footage found by "Check for raw videos".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawListing {
    DirectoryMissing,
    Found(Vec<String>),
}

pub fn no_processed_videos(
    ui: &mut egui::Ui,
    raw: Option<&RawListing>,
    actions: &mut Vec<UiAction>,
) {
    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.colored_label(
            theme::WARNING,
            egui::RichText::new("⚠ No processed videos found!").strong(),
        );
        ui.add_space(8.0);
        ui.label("Please run the batch processing step first:");
        ui.code("python process_all_videos.py");
        ui.label(
            "It processes every video in data/raw_videos and writes the overlay videos, \
             keypoint videos and pose data this viewer reads.",
        );
        ui.add_space(8.0);
        if ui.button("Check for Raw Videos").clicked() {
            actions.push(UiAction::CheckRawVideos);
        }
    });

    match raw {
        None => {}
        Some(RawListing::DirectoryMissing) => {
            ui.colored_label(theme::ERROR, "Raw videos directory not found");
        }
        Some(RawListing::Found(names)) if names.is_empty() => {
            ui.colored_label(
                theme::ERROR,
                "No raw videos found in data/raw_videos directory",
            );
        }
        Some(RawListing::Found(names)) => {
            ui.colored_label(
                theme::SUCCESS,
                format!("Found {} raw video(s) ready to process:", names.len()),
            );
            for name in names {
                ui.label(format!("  - {name}"));
            }
        }
    }
}

pub fn missing_videos(ui: &mut egui::Ui, names: &[&str]) {
    ui.colored_label(
        theme::ERROR,
        format!("Processed video(s) not found: {}", names.join(", ")),
    );
    ui.colored_label(
        theme::TEXT_DIM,
        "Please run process_all_videos.py to process these videos.",
    );
}
