use eframe::egui;

use super::UiAction;
use crate::components::{AppButton, ButtonTheme, CircleButton, IconButton};
use crate::session::ViewController;

/// Picker buttons while idle, the editing toolbar otherwise
pub fn footer(ui: &mut egui::Ui, controller: &ViewController, actions: &mut Vec<UiAction>) {
    let state = controller.state();

    ui.vertical_centered(|ui| {
        if !state.edit_mode() {
            let picking = controller.is_requesting_image();
            let label = if picking { "Choosing…" } else { "Choose a photo" };
            if AppButton::new(label, ButtonTheme::Primary).enabled(!picking).show(ui).clicked() {
                actions.push(UiAction::ChooseImage);
            }
            if AppButton::new("Use this photo", ButtonTheme::Plain).enabled(!picking).show(ui).clicked() {
                actions.push(UiAction::UsePlaceholder);
            }
            return;
        }

        let exporting = controller.is_exporting();
        let editing = state.is_editing();
        ui.horizontal(|ui| {
            // Centre the three buttons in the available width
            let row_width = 64.0 + 84.0 + 64.0 + 2.0 * 40.0;
            ui.add_space(((ui.available_width() - row_width) / 2.0).max(0.0));
            ui.spacing_mut().item_spacing.x = 40.0;

            if IconButton::new("⟲", "Reset").enabled(editing && !exporting).show(ui).clicked() {
                actions.push(UiAction::Reset);
            }
            if CircleButton::new(editing).show(ui).clicked() {
                actions.push(UiAction::OpenStickerPicker);
            }
            let save_label = if exporting { "Saving…" } else { "Save" };
            if IconButton::new("💾", save_label).enabled(editing && !exporting).show(ui).clicked() {
                actions.push(UiAction::Export);
            }
        });
    });
}
