use crate::theme;

pub fn header_panel(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.label(
            egui::RichText::new("Running Biomechanics Comparison")
                .color(theme::ORANGE)
                .strong()
                .size(26.0),
        );
        ui.colored_label(
            theme::NAVY,
            "Syracuse University David B. Falk College of Sport",
        );
    });
    let rect = ui.available_rect_before_wrap();
    let y = rect.top() + 4.0;
    ui.painter().hline(
        rect.x_range(),
        y,
        egui::Stroke::new(2.0, theme::ORANGE),
    );
    ui.add_space(10.0);
}
