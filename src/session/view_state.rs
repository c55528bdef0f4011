//! The view-state machine for the sticker editor screen.
//!
//! The screen is always in exactly one of three states. Holding the picked image
//! and the sticker inside the state variants keeps the session invariants
//! structural: the sticker modal can only be open while an image is loaded, and
//! a sticker can only be placed on a loaded image.
//!
//! # State Transitions
//!
//! ```text
//!                 image picked / placeholder
//!   ┌──────────┐ ─────────────────────────► ┌───────────┐  open picker   ┌────────────────┐
//!   │          │                            │           ├───────────────►│                │
//!   │   Idle   │                            │  Editing  │                │ PickingSticker │
//!   │          │ ◄───────────────────────── │           │◄───────────────┤                │
//!   └──────────┘           reset            └───────────┘  pick / close  └────────────────┘
//! ```
//!
//! Cancelling the picker keeps the screen `Idle`. Exporting keeps it `Editing`.

use eframe::egui::Vec2;

use crate::catalog::StickerId;

/// Opaque handle to the image shown underneath the sticker
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageRef {
    /// The bundled placeholder background
    Placeholder,
    /// An image returned by the image picker
    Picked { uri: String },
}

impl ImageRef {
    pub fn picked(uri: impl Into<String>) -> Self {
        Self::Picked { uri: uri.into() }
    }

    /// The uri of a picked image, `None` for the placeholder
    pub fn uri(&self) -> Option<&str> {
        match self {
            Self::Placeholder => None,
            Self::Picked { uri } => Some(uri),
        }
    }

    /// Key used by the texture cache
    pub fn cache_key(&self) -> &str {
        match self {
            Self::Placeholder => "placeholder",
            Self::Picked { uri } => uri,
        }
    }
}

/// Logical size of the image frame, also the aspect ratio of exports
pub const FRAME_SIZE: Vec2 = Vec2::new(320.0, 440.0);

/// Where a sticker sits before it is dragged, relative to the frame's top centre
pub const STICKER_ANCHOR: Vec2 = Vec2::new(0.0, 60.0);

/// A sticker dropped on the image, with its placement relative to the default anchor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedSticker {
    pub id: StickerId,
    pub offset: Vec2,
    pub scale: f32,
}

impl PlacedSticker {
    pub fn new(id: StickerId) -> Self {
        Self {
            id,
            offset: Vec2::ZERO,
            scale: 1.0,
        }
    }

    /// Moves the sticker by `delta`, keeping its centre inside the frame
    pub fn drag_by(&mut self, delta: Vec2) {
        let min = Vec2::new(-FRAME_SIZE.x / 2.0, 0.0) - STICKER_ANCHOR;
        let max = Vec2::new(FRAME_SIZE.x / 2.0, FRAME_SIZE.y) - STICKER_ANCHOR;
        self.offset = (self.offset + delta).clamp(min, max);
    }
}

/// What is on screen while an image is loaded
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pub image: ImageRef,
    pub sticker: Option<PlacedSticker>,
}

impl Canvas {
    pub fn new(image: ImageRef) -> Self {
        Self {
            image,
            sticker: None,
        }
    }
}

/// Fieldless mirror of [`ViewState`], cheap to copy into events and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Idle,
    Editing,
    PickingSticker,
}

impl ViewKind {
    pub fn name(self) -> &'static str {
        match self {
            ViewKind::Idle => "idle",
            ViewKind::Editing => "editing",
            ViewKind::PickingSticker => "picking a sticker",
        }
    }
}

/// The possible states of the editor screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    /// No image loaded, the picker buttons are shown
    #[default]
    Idle,
    /// Image loaded, the editing toolbar is shown
    Editing(Canvas),
    /// Image loaded and the sticker modal is open
    PickingSticker(Canvas),
}

impl ViewState {
    pub fn kind(&self) -> ViewKind {
        match self {
            ViewState::Idle => ViewKind::Idle,
            ViewState::Editing(_) => ViewKind::Editing,
            ViewState::PickingSticker(_) => ViewKind::PickingSticker,
        }
    }

    /// Validates whether a transition to a state of the given kind is allowed
    pub fn can_transition_to(&self, next: ViewKind) -> bool {
        match (self.kind(), next) {
            (ViewKind::Idle, ViewKind::Idle | ViewKind::Editing) => true,
            (ViewKind::Editing, _) => true,
            (ViewKind::PickingSticker, ViewKind::Editing) => true,
            _ => false,
        }
    }

    pub fn canvas(&self) -> Option<&Canvas> {
        match self {
            ViewState::Idle => None,
            ViewState::Editing(canvas) | ViewState::PickingSticker(canvas) => Some(canvas),
        }
    }

    pub fn canvas_mut(&mut self) -> Option<&mut Canvas> {
        match self {
            ViewState::Idle => None,
            ViewState::Editing(canvas) | ViewState::PickingSticker(canvas) => Some(canvas),
        }
    }

    pub fn image_ref(&self) -> Option<&ImageRef> {
        self.canvas().map(|canvas| &canvas.image)
    }

    /// True while the editing toolbar replaces the picker buttons
    pub fn edit_mode(&self) -> bool {
        self.canvas().is_some()
    }

    pub fn modal_open(&self) -> bool {
        matches!(self, ViewState::PickingSticker(_))
    }

    pub fn sticker_ref(&self) -> Option<StickerId> {
        self.placed_sticker().map(|sticker| sticker.id)
    }

    pub fn placed_sticker(&self) -> Option<&PlacedSticker> {
        self.canvas().and_then(|canvas| canvas.sticker.as_ref())
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ViewState::Idle)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, ViewState::Editing(_))
    }
}
