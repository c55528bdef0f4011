mod composite;
mod footer;
mod notices;
mod sticker_modal;

pub use composite::composite_view;
pub use footer::footer;
pub use notices::notices;
pub use sticker_modal::sticker_modal;

use eframe::egui::Vec2;

use crate::catalog::StickerId;

/// What the user asked for this frame, applied by the app after drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiAction {
    ChooseImage,
    UsePlaceholder,
    Reset,
    OpenStickerPicker,
    CloseStickerPicker,
    PickSticker(StickerId),
    MoveSticker(Vec2),
    ToggleStickerScale,
    Export,
}
