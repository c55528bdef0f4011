use eframe::egui;

use crate::notice::{NoticeKind, ToastBoard};

/// Stacks the active toasts at the bottom of the screen
pub fn notices(ctx: &egui::Context, board: &ToastBoard) {
    if board.toasts().is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("notices"))
        .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -24.0))
        .order(egui::Order::Foreground)
        .interactable(false)
        .show(ctx, |ui| {
            for toast in board.toasts() {
                let color = match toast.notice.kind {
                    NoticeKind::Info => egui::Color32::from_rgb(66, 133, 244),
                    NoticeKind::Success => egui::Color32::from_rgb(52, 168, 83),
                    NoticeKind::Error => egui::Color32::from_rgb(217, 48, 37),
                };
                egui::Frame::popup(ui.style()).stroke(egui::Stroke::new(1.5, color)).show(ui, |ui| {
                    ui.label(egui::RichText::new(&toast.notice.message).color(color));
                });
            }
        });
}
