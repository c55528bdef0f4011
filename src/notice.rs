use std::collections::VecDeque;

pub const NO_IMAGE_SELECTED: &str = "You did not select any image.";
pub const SAVED: &str = "Saved!";
pub const PERMISSION_DENIED: &str = "Permission to save to the photo library was denied.";
pub const EXPORT_FAILED: &str = "Could not save the image.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// A transient message shown to the user as a toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, message: message.into() }
    }
}

/// FIFO of notices waiting to be shown
#[derive(Debug, Default)]
pub struct NoticeQueue {
    queue: VecDeque<Notice>,
}

impl NoticeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notice: Notice) {
        self.queue.push_back(notice);
    }

    /// Removes and returns all pending notices, oldest first
    pub fn drain(&mut self) -> Vec<Notice> {
        self.queue.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// A notice currently on screen, with the egui time it disappears at
#[derive(Debug, Clone)]
pub struct Toast {
    pub notice: Notice,
    pub expires_at: f64,
}

/// Notices currently displayed, expired by wall time
#[derive(Debug, Default)]
pub struct ToastBoard {
    toasts: Vec<Toast>,
}

impl ToastBoard {
    pub fn show(&mut self, notice: Notice, now: f64, seconds: f64) {
        self.toasts.push(Toast { notice, expires_at: now + seconds });
    }

    /// Drops expired toasts, returns true if any remain
    pub fn expire(&mut self, now: f64) -> bool {
        self.toasts.retain(|toast| toast.expires_at > now);
        !self.toasts.is_empty()
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}
