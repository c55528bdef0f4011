#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use egui::{Color32, ColorImage};
use image::{Rgba, RgbaImage};
use parking_lot::Mutex;

use sticker_smash::error::{ExportError, PickError};
use sticker_smash::event::{EventHandler, SessionEvent};
use sticker_smash::export::{Composite, Downloader, ExportReceipt, ExportSink, MediaLibrary};
use sticker_smash::permission::{PermissionGate, PermissionState};
use sticker_smash::picker::{ImageSource, PickOptions, PickOutcome, PickedImage};
use sticker_smash::session::ViewController;
use sticker_smash::task::Pending;

/// Sink that counts invocations and returns a canned receipt
#[derive(Default)]
pub struct CountingSink {
    pub calls: Arc<Mutex<usize>>,
}

impl ExportSink for CountingSink {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn requires_permission(&self) -> bool {
        false
    }

    fn export(&self, _composite: &Composite) -> Result<ExportReceipt, ExportError> {
        *self.calls.lock() += 1;
        Ok(ExportReceipt::Downloaded { file_name: "test.jpeg".to_owned(), bytes: 0 })
    }
}

/// Permission gate with a scripted answer that records how often it was asked
pub struct FakePermission {
    pub state: PermissionState,
    pub answer: PermissionState,
    pub requests: Arc<Mutex<usize>>,
}

impl FakePermission {
    pub fn new(state: PermissionState, answer: PermissionState) -> Self {
        Self { state, answer, requests: Arc::new(Mutex::new(0)) }
    }
}

impl PermissionGate for FakePermission {
    fn state(&self) -> PermissionState {
        self.state
    }

    fn request(&mut self) -> PermissionState {
        *self.requests.lock() += 1;
        self.state = self.answer;
        self.state
    }
}

/// Library that always fails to persist
pub struct BrokenLibrary;

impl MediaLibrary for BrokenLibrary {
    fn persist(&self, file: &Path) -> Result<PathBuf, ExportError> {
        Err(ExportError::Persist(format!("disk full while writing {}", file.display())))
    }
}

/// Records every download instead of touching a browser
#[derive(Default, Clone)]
pub struct RecordingDownloader {
    pub downloads: Arc<Mutex<Vec<(String, String, Vec<u8>)>>>,
}

impl Downloader for RecordingDownloader {
    fn download(&self, file_name: &str, mime: &str, bytes: &[u8]) -> Result<(), ExportError> {
        self.downloads.lock().push((file_name.to_owned(), mime.to_owned(), bytes.to_vec()));
        Ok(())
    }
}

/// Collects session events for later inspection
#[derive(Default, Clone)]
pub struct EventLog {
    pub events: Arc<Mutex<Vec<SessionEvent>>>,
}

impl EventHandler for EventLog {
    fn handle_event(&mut self, event: &SessionEvent) {
        self.events.lock().push(event.clone());
    }
}

pub fn controller() -> ViewController {
    controller_with_sink(Arc::new(CountingSink::default()))
}

pub fn controller_with_sink(sink: Arc<dyn ExportSink>) -> ViewController {
    ViewController::new(
        sink,
        Box::new(FakePermission::new(PermissionState::Granted, PermissionState::Granted)),
    )
}

pub fn picked(uri: &str) -> PickOutcome {
    PickOutcome::Picked(PickedImage::new(uri, ColorImage::new([4, 4], Color32::WHITE)))
}

/// Controller already in `Editing` with `uri` loaded
pub fn editing(uri: &str) -> ViewController {
    let mut controller = controller();
    load(&mut controller, uri);
    controller
}

pub fn load(controller: &mut ViewController, uri: &str) {
    controller.begin_image_request().unwrap();
    controller.finish_image_request(Ok(picked(uri))).unwrap();
}

pub fn composite() -> Composite {
    Composite::from_rgba(RgbaImage::from_pixel(64, 88, Rgba([120, 80, 40, 255]))).unwrap()
}

/// Image source that answers immediately with a scripted outcome
pub struct ScriptedSource {
    pub outcome: Mutex<Option<PickOutcome>>,
    pub requests: Mutex<Vec<PickOptions>>,
}

impl ScriptedSource {
    pub fn new(outcome: PickOutcome) -> Self {
        Self { outcome: Mutex::new(Some(outcome)), requests: Mutex::new(Vec::new()) }
    }
}

impl ImageSource for ScriptedSource {
    fn request_image(
        &self,
        options: PickOptions,
        _ctx: Option<egui::Context>,
    ) -> Pending<Result<PickOutcome, PickError>> {
        self.requests.lock().push(options);
        let outcome = self.outcome.lock().take().unwrap_or(PickOutcome::Cancelled);
        Pending::ready(Ok(outcome))
    }
}
