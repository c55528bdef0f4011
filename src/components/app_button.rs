use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonTheme {
    /// White button inside a yellow frame
    Primary,
    Plain,
}

/// Wide labelled button of the picker footer
pub struct AppButton {
    pub label: &'static str,
    pub theme: ButtonTheme,
    pub enabled: bool,
}

impl AppButton {
    pub fn new(label: &'static str, theme: ButtonTheme) -> Self {
        Self { label, theme, enabled: true }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let size = egui::vec2(320.0, 68.0);
        let sense = if self.enabled { egui::Sense::click() } else { egui::Sense::hover() };
        let (rect, response) = ui.allocate_exact_size(size, sense);

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let (fill, text_color) = match self.theme {
                ButtonTheme::Primary => {
                    painter.rect_stroke(rect.shrink(2.0), 18.0, egui::Stroke::new(4.0, egui::Color32::from_rgb(255, 211, 61)));
                    (egui::Color32::WHITE, egui::Color32::from_rgb(37, 41, 46))
                }
                ButtonTheme::Plain => (egui::Color32::TRANSPARENT, egui::Color32::WHITE),
            };
            let fill = if response.hovered() && self.enabled { fill.gamma_multiply(0.9) } else { fill };
            painter.rect_filled(rect.shrink(8.0), 10.0, fill);

            let text_color = if self.enabled { text_color } else { text_color.gamma_multiply(0.5) };
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.label,
                egui::FontId::proportional(16.0),
                text_color,
            );
        }

        response
    }
}
