use eframe::egui;

/// The round "add sticker" button in the middle of the editing toolbar
pub struct CircleButton {
    pub enabled: bool,
}

impl CircleButton {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let diameter = 84.0;
        let sense = if self.enabled { egui::Sense::click() } else { egui::Sense::hover() };
        let (rect, response) = ui.allocate_exact_size(egui::vec2(diameter, diameter), sense);

        if ui.is_rect_visible(rect) {
            let ring = egui::Color32::from_rgb(255, 211, 61);
            let fill = if response.hovered() && self.enabled {
                egui::Color32::from_gray(235)
            } else {
                egui::Color32::WHITE
            };

            let center = rect.center();
            ui.painter().circle_stroke(center, diameter / 2.0 - 2.0, egui::Stroke::new(4.0, ring));
            ui.painter().circle_filled(center, diameter / 2.0 - 8.0, fill);
            ui.painter().text(
                center,
                egui::Align2::CENTER_CENTER,
                "+",
                egui::FontId::proportional(38.0),
                egui::Color32::from_rgb(37, 41, 46),
            );
        }

        response.on_hover_text("Add a sticker")
    }
}
