use crate::theme;
use crate::SlotPresentation;

pub fn stats_panel(ui: &mut egui::Ui, left: &SlotPresentation, right: &SlotPresentation) {
    egui::CollapsingHeader::new("📊 Pose Detection Statistics")
        .default_open(false)
        .show(ui, |ui| {
            ui.columns(2, |cols| {
                stats_column(&mut cols[0], left);
                stats_column(&mut cols[1], right);
            });
        });
}

fn stats_column(ui: &mut egui::Ui, view: &SlotPresentation) {
    ui.label(egui::RichText::new(&view.display_name).strong());
    let Some(stats) = view.stats else {
        ui.colored_label(theme::TEXT_DIM, "Statistics not available");
        return;
    };
    metric(ui, "Detection Rate", format!("{:.1}%", stats.detection_rate * 100.0));
    metric(ui, "Avg Confidence", format!("{:.2}", stats.mean_confidence));
    metric(ui, "Total Frames", stats.total_frames.to_string());
}

fn metric(ui: &mut egui::Ui, label: &str, value: String) {
    ui.colored_label(theme::TEXT_DIM, label);
    ui.label(egui::RichText::new(value).size(22.0).color(theme::NAVY));
    ui.add_space(4.0);
}
