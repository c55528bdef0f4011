use eframe::egui::{self, Color32, Rect, Vec2};

use super::UiAction;
use crate::catalog::StickerCatalog;
use crate::session::{ImageRef, ViewState, FRAME_SIZE, STICKER_ANCHOR};

/// Draws the image with its optional sticker and returns the frame's rectangle,
/// which is the region captured on export.
pub fn composite_view(
    ui: &mut egui::Ui,
    state: &ViewState,
    texture: Option<&egui::TextureHandle>,
    catalog: &StickerCatalog,
    sticker_size: f32,
    actions: &mut Vec<UiAction>,
) -> Rect {
    let (rect, _) = ui.allocate_exact_size(FRAME_SIZE, egui::Sense::hover());
    let painter = ui.painter_at(rect);

    match (state.image_ref(), texture) {
        (Some(ImageRef::Picked { .. }), Some(texture)) => {
            let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(texture.id(), rect, uv, Color32::WHITE);
        }
        _ => placeholder(&painter, rect),
    }

    let Some(placed) = state.placed_sticker() else {
        return rect;
    };
    let Some(sticker) = catalog.get(placed.id) else {
        return rect;
    };

    let size = sticker_size * placed.scale;
    let center = rect.center_top() + STICKER_ANCHOR + placed.offset;
    let sticker_rect = Rect::from_center_size(center, Vec2::splat(size));
    painter.text(
        center,
        egui::Align2::CENTER_CENTER,
        sticker.glyph,
        egui::FontId::proportional(size),
        Color32::WHITE,
    );

    // The sticker only reacts while the modal is closed
    if state.is_editing() {
        let response = ui.interact(sticker_rect, ui.id().with("sticker"), egui::Sense::click_and_drag());
        if response.double_clicked() {
            actions.push(UiAction::ToggleStickerScale);
        } else if response.dragged() && response.drag_delta() != Vec2::ZERO {
            actions.push(UiAction::MoveSticker(response.drag_delta()));
        }
        if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
        }
    }

    rect
}

fn placeholder(painter: &egui::Painter, rect: Rect) {
    painter.rect_filled(rect, 18.0, Color32::from_rgb(60, 66, 74));
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "🖼",
        egui::FontId::proportional(64.0),
        Color32::from_gray(140),
    );
}
