use crate::catalog::StickerId;
use crate::notice::Notice;
use crate::permission::PermissionState;
use crate::session::{ImageRef, ViewKind};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    StateChanged {
        old: ViewKind,
        new: ViewKind,
    },
    ImageRequested,
    ImageLoaded(ImageRef),
    ImageRequestCancelled,
    StickerPicked(StickerId),
    StickerMoved(StickerId),
    StickerResized {
        id: StickerId,
        scale: f32,
    },
    PermissionChanged(PermissionState),
    ExportStarted {
        sink: &'static str,
    },
    ExportFinished {
        sink: &'static str,
        succeeded: bool,
    },
    NoticeRaised(Notice),
}
