mod controller;
mod view_state;

pub use controller::{ExportJob, ViewController};
pub use view_state::{Canvas, ImageRef, PlacedSticker, ViewKind, ViewState, FRAME_SIZE, STICKER_ANCHOR};
