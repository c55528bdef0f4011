//! Mediates user intents into session-state transitions.
//!
//! The `ViewController` is the single owner of the screen's [`ViewState`]. Every
//! user action goes through one of its methods, which validates the action against
//! the current state, performs the transition in one assignment, and emits a
//! [`SessionEvent`]. Rejected actions leave the state untouched.
//!
//! The two suspending operations are split in a `begin_*` and a `finish_*` half so
//! the UI loop stays responsive while the picker or the export runs elsewhere:
//!
//! ```rust,ignore
//! let pending = controller.request_image(&FileDialogSource, options, Some(ctx.clone()))?;
//! // ... frames later
//! if let Some(result) = pending.take() {
//!     controller.finish_image_request(result)?;
//! }
//! ```
//!
//! Only one of each operation can be in flight; a second attempt is rejected as busy.

use std::sync::Arc;

use eframe::egui::Vec2;

use super::{Canvas, ImageRef, PlacedSticker, ViewKind, ViewState};
use crate::catalog::{StickerCatalog, StickerId};
use crate::error::{ExportError, PickError, TransitionError};
use crate::event::{EventBus, EventHandler, SessionEvent};
use crate::export::{Composite, ExportReceipt, ExportSink};
use crate::notice::{self, Notice, NoticeQueue};
use crate::permission::{PermissionGate, PermissionState};
use crate::picker::{ImageSource, PickOptions, PickOutcome};
use crate::task::Pending;

/// Handle for running an export that the controller has accepted
#[derive(Clone)]
pub struct ExportJob {
    sink: Arc<dyn ExportSink>,
}

impl ExportJob {
    pub fn sink_name(&self) -> &'static str {
        self.sink.name()
    }

    pub fn run(&self, composite: &Composite) -> Result<ExportReceipt, ExportError> {
        self.sink.export(composite)
    }
}

impl std::fmt::Debug for ExportJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportJob").field("sink", &self.sink.name()).finish()
    }
}

pub struct ViewController {
    state: ViewState,
    catalog: StickerCatalog,
    sink: Arc<dyn ExportSink>,
    permission: Box<dyn PermissionGate>,
    /// Permission is asked for at most once per session
    permission_requested: bool,
    image_request_pending: bool,
    export_pending: bool,
    notices: NoticeQueue,
    event_bus: EventBus,
}

impl std::fmt::Debug for ViewController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewController")
            .field("state", &self.state)
            .field("sink", &self.sink.name())
            .field("permission_requested", &self.permission_requested)
            .field("image_request_pending", &self.image_request_pending)
            .field("export_pending", &self.export_pending)
            .field("notices", &self.notices)
            .field("event_bus", &self.event_bus)
            .finish()
    }
}

impl ViewController {
    /// Creates a controller in the `Idle` state exporting through `sink`
    pub fn new(sink: Arc<dyn ExportSink>, permission: Box<dyn PermissionGate>) -> Self {
        Self {
            state: ViewState::Idle,
            catalog: StickerCatalog::new(),
            sink,
            permission,
            permission_requested: false,
            image_request_pending: false,
            export_pending: false,
            notices: NoticeQueue::new(),
            event_bus: EventBus::new(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn catalog(&self) -> &StickerCatalog {
        &self.catalog
    }

    pub fn sink_name(&self) -> &'static str {
        self.sink.name()
    }

    pub fn is_requesting_image(&self) -> bool {
        self.image_request_pending
    }

    pub fn is_exporting(&self) -> bool {
        self.export_pending
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.event_bus.subscribe(handler);
    }

    /// Removes and returns the notices raised since the last call
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    fn notify(&mut self, notice: Notice) {
        self.event_bus.emit(SessionEvent::NoticeRaised(notice.clone()));
        self.notices.push(notice);
    }

    fn reject(&self, event: &'static str) -> TransitionError {
        let err = TransitionError::InvalidTransition {
            event,
            state: self.state.kind().name(),
        };
        log::warn!("{}", err);
        err
    }

    /// Replaces the state, validating the transition and emitting `StateChanged`
    fn transition_to(&mut self, event: &'static str, new_state: ViewState) -> Result<(), TransitionError> {
        if !self.state.can_transition_to(new_state.kind()) {
            return Err(self.reject(event));
        }

        let old = self.state.kind();
        self.state = new_state;
        let new = self.state.kind();

        if old != new {
            log::info!("{}: {} -> {}", event, old.name(), new.name());
            self.event_bus.emit(SessionEvent::StateChanged { old, new });
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Permission
    // ------------------------------------------------------------------

    /// Current permission state, requesting it first if it is still undetermined
    /// and has not been requested yet. Sinks that need no permission are always granted.
    pub fn ensure_permission(&mut self) -> PermissionState {
        if !self.sink.requires_permission() {
            return PermissionState::Granted;
        }

        let state = self.permission.state();
        if state != PermissionState::Undetermined || self.permission_requested {
            return state;
        }

        self.permission_requested = true;
        let granted = self.permission.request();
        log::info!("Requested library permission: {:?}", granted);
        self.event_bus.emit(SessionEvent::PermissionChanged(granted));
        granted
    }

    // ------------------------------------------------------------------
    // Image request
    // ------------------------------------------------------------------

    /// Marks an image request as in flight. Only valid while idle.
    pub fn begin_image_request(&mut self) -> Result<(), TransitionError> {
        if self.image_request_pending {
            return Err(TransitionError::Busy("image request"));
        }
        if !self.state.is_idle() {
            return Err(self.reject("request an image"));
        }
        self.image_request_pending = true;
        self.event_bus.emit(SessionEvent::ImageRequested);
        Ok(())
    }

    /// Starts an image request on `source`; poll the returned slot and pass the
    /// result to [`Self::finish_image_request`]
    pub fn request_image(
        &mut self,
        source: &dyn ImageSource,
        options: PickOptions,
        ctx: Option<egui::Context>,
    ) -> Result<Pending<Result<PickOutcome, PickError>>, TransitionError> {
        self.begin_image_request()?;
        Ok(source.request_image(options, ctx))
    }

    /// Applies the picker's answer. A picked image enters `Editing`, a cancellation
    /// or failure stays `Idle` and raises a notice.
    pub fn finish_image_request(
        &mut self,
        result: Result<PickOutcome, PickError>,
    ) -> Result<(), TransitionError> {
        self.image_request_pending = false;

        match result {
            Ok(PickOutcome::Picked(picked)) => {
                let image = ImageRef::picked(picked.uri);
                self.transition_to("load an image", ViewState::Editing(Canvas::new(image.clone())))?;
                self.event_bus.emit(SessionEvent::ImageLoaded(image));
            }
            Ok(PickOutcome::Cancelled) => {
                log::info!("Image picker dismissed");
                self.event_bus.emit(SessionEvent::ImageRequestCancelled);
                self.notify(Notice::info(notice::NO_IMAGE_SELECTED));
            }
            Err(err) => {
                log::error!("Image request failed: {}", err);
                self.notify(Notice::error(format!("Could not open the image: {}", err)));
            }
        }
        Ok(())
    }

    /// Continues with the placeholder background instead of a picked photo
    pub fn use_placeholder(&mut self) -> Result<(), TransitionError> {
        if self.image_request_pending {
            return Err(TransitionError::Busy("image request"));
        }
        if !self.state.is_idle() {
            return Err(self.reject("use the placeholder"));
        }
        self.transition_to("use the placeholder", ViewState::Editing(Canvas::new(ImageRef::Placeholder)))?;
        self.event_bus.emit(SessionEvent::ImageLoaded(ImageRef::Placeholder));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Drops the image and the sticker and returns to `Idle`
    pub fn reset(&mut self) -> Result<(), TransitionError> {
        if self.export_pending {
            return Err(TransitionError::Busy("export"));
        }
        if !self.state.is_editing() {
            return Err(self.reject("reset"));
        }
        self.transition_to("reset", ViewState::Idle)
    }

    pub fn open_sticker_picker(&mut self) -> Result<(), TransitionError> {
        let ViewState::Editing(canvas) = &self.state else {
            return Err(self.reject("open the sticker picker"));
        };
        let canvas = canvas.clone();
        self.transition_to("open the sticker picker", ViewState::PickingSticker(canvas))
    }

    /// Closes the sticker modal, keeping whatever sticker was placed before
    pub fn close_sticker_picker(&mut self) -> Result<(), TransitionError> {
        let ViewState::PickingSticker(canvas) = &self.state else {
            return Err(self.reject("close the sticker picker"));
        };
        let canvas = canvas.clone();
        self.transition_to("close the sticker picker", ViewState::Editing(canvas))
    }

    /// Places `id` on the image and closes the modal
    pub fn pick_sticker(&mut self, id: StickerId) -> Result<(), TransitionError> {
        let ViewState::PickingSticker(canvas) = &self.state else {
            return Err(self.reject("pick a sticker"));
        };
        if !self.catalog.contains(id) {
            return Err(TransitionError::UnknownSticker(id.0));
        }

        let mut canvas = canvas.clone();
        canvas.sticker = Some(PlacedSticker::new(id));
        self.transition_to("pick a sticker", ViewState::Editing(canvas))?;
        self.event_bus.emit(SessionEvent::StickerPicked(id));
        Ok(())
    }

    fn placed_sticker_mut(&mut self, event: &'static str) -> Result<&mut PlacedSticker, TransitionError> {
        if !self.state.is_editing() || self.state.placed_sticker().is_none() {
            return Err(self.reject(event));
        }
        self.state
            .canvas_mut()
            .and_then(|canvas| canvas.sticker.as_mut())
            .ok_or(TransitionError::InvalidTransition {
                event,
                state: ViewKind::Editing.name(),
            })
    }

    /// Drags the sticker by `delta` points, its centre never leaves the frame
    pub fn move_sticker(&mut self, delta: Vec2) -> Result<(), TransitionError> {
        let sticker = self.placed_sticker_mut("move the sticker")?;
        sticker.drag_by(delta);
        let id = sticker.id;
        self.event_bus.emit(SessionEvent::StickerMoved(id));
        Ok(())
    }

    /// Switches the sticker between its normal and double size
    pub fn toggle_sticker_scale(&mut self) -> Result<(), TransitionError> {
        let sticker = self.placed_sticker_mut("resize the sticker")?;
        sticker.scale = if sticker.scale > 1.0 { 1.0 } else { 2.0 };
        let (id, scale) = (sticker.id, sticker.scale);
        self.event_bus.emit(SessionEvent::StickerResized { id, scale });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    /// Accepts an export of the current composite.
    ///
    /// Fails without invoking the sink when no image is loaded, when an export is
    /// already running, or when the library permission is not granted.
    pub fn begin_export(&mut self) -> Result<ExportJob, ExportError> {
        if !self.state.is_editing() || self.state.image_ref().is_none() {
            log::warn!("Export ignored while {}", self.state.kind().name());
            return Err(ExportError::NothingToExport);
        }
        if self.export_pending {
            return Err(ExportError::Busy);
        }
        if !self.ensure_permission().is_granted() {
            log::warn!("Export blocked, library permission not granted");
            self.notify(Notice::error(notice::PERMISSION_DENIED));
            return Err(ExportError::PermissionDenied);
        }

        self.export_pending = true;
        self.event_bus.emit(SessionEvent::ExportStarted { sink: self.sink.name() });
        Ok(ExportJob { sink: self.sink.clone() })
    }

    /// Records how an accepted export ended. The view state is never changed.
    pub fn finish_export(&mut self, result: &Result<ExportReceipt, ExportError>) {
        self.export_pending = false;
        let sink = self.sink.name();

        match result {
            Ok(ExportReceipt::SavedToLibrary { path }) => {
                log::info!("Export saved to {}", path.display());
                self.notify(Notice::success(notice::SAVED));
            }
            Ok(ExportReceipt::Downloaded { file_name, bytes }) => {
                log::info!("Export downloaded as {} ({} bytes)", file_name, bytes);
            }
            Err(err) => {
                log::error!("Export through {} failed: {}", sink, err);
                self.notify(Notice::error(notice::EXPORT_FAILED));
            }
        }

        self.event_bus.emit(SessionEvent::ExportFinished {
            sink,
            succeeded: result.is_ok(),
        });
    }

    /// Runs a whole export synchronously on an already captured composite
    pub fn export_composite(&mut self, composite: &Composite) -> Result<ExportReceipt, ExportError> {
        let job = self.begin_export()?;
        let result = job.run(composite);
        self.finish_export(&result);
        result
    }
}
