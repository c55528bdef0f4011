use eframe::egui;

use super::UiAction;
use crate::catalog::StickerCatalog;

/// Bottom sheet listing the stickers; shown only while the controller is picking a sticker
pub fn sticker_modal(ctx: &egui::Context, catalog: &StickerCatalog, actions: &mut Vec<UiAction>) {
    egui::TopBottomPanel::bottom("sticker_modal")
        .exact_height(190.0)
        .frame(egui::Frame::default().fill(egui::Color32::from_rgb(37, 41, 46)).inner_margin(12.0))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Choose a sticker").color(egui::Color32::WHITE).size(16.0));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("✖").on_hover_text("Close").clicked() {
                        actions.push(UiAction::CloseStickerPicker);
                    }
                });
            });
            ui.separator();

            egui::ScrollArea::horizontal().show(ui, |ui| {
                ui.horizontal(|ui| {
                    for sticker in catalog.stickers() {
                        let button = egui::Button::new(egui::RichText::new(sticker.glyph).size(72.0)).frame(false);
                        if ui.add(button).on_hover_text(sticker.label).clicked() {
                            actions.push(UiAction::PickSticker(sticker.id));
                        }
                    }
                });
            });
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        actions.push(UiAction::CloseStickerPicker);
    }
}
