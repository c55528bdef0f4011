use std::sync::Arc;

use eframe::egui;

use crate::config::{AppConfig, CONFIG_KEY};
use crate::error::{ExportError, PickError};
use crate::event::LoggingHandler;
use crate::export::{self, Composite, ExportReceipt};
use crate::notice::ToastBoard;
use crate::panels::{self, UiAction};
use crate::picker::{FileDialogSource, ImageSource, PickOutcome};
use crate::platform::Platform;
use crate::session::{ExportJob, ImageRef, ViewController};
use crate::task::Pending;
use crate::texture_manager::TextureManager;
use crate::widgets::{faq, profile_card};

const MAX_CACHED_IMAGES: usize = 4;

/// Where an accepted export currently is
enum ExportStage {
    Idle,
    /// Screenshot requested, waiting for it to arrive in the input events
    AwaitingCapture(ExportJob),
    /// The sink is running
    Running(Pending<Result<ExportReceipt, ExportError>>),
}

pub struct StickerSmashApp {
    config: AppConfig,
    controller: ViewController,
    image_source: Box<dyn ImageSource>,
    pending_image: Option<Pending<Result<PickOutcome, PickError>>>,
    export_stage: ExportStage,
    textures: TextureManager,
    toasts: ToastBoard,
    /// Screen rectangle of the composite in the last frame, in points
    composite_rect: Option<egui::Rect>,
}

impl StickerSmashApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = AppConfig::load(cc.storage);
        Self::with_config(config, Platform::current())
    }

    pub fn with_config(config: AppConfig, platform: Platform) -> Self {
        let sink = export::select_sink(platform, &config.export);
        let permission = platform.permission_gate(&config.export);
        log::info!("Starting on {:?}, exporting through {}", platform, sink.name());

        let mut controller = ViewController::new(sink, permission);
        controller.subscribe(Box::new(LoggingHandler));
        // Asked once up front, like a library permission prompt on first launch
        controller.ensure_permission();

        Self {
            config,
            controller,
            image_source: Box::new(FileDialogSource),
            pending_image: None,
            export_stage: ExportStage::Idle,
            textures: TextureManager::new(MAX_CACHED_IMAGES),
            toasts: ToastBoard::default(),
            composite_rect: None,
        }
    }

    pub fn controller(&self) -> &ViewController {
        &self.controller
    }

    fn apply(&mut self, ctx: &egui::Context, action: UiAction) {
        let result = match action {
            UiAction::ChooseImage => self
                .controller
                .request_image(self.image_source.as_ref(), self.config.picker.clone(), Some(ctx.clone()))
                .map(|pending| self.pending_image = Some(pending)),
            UiAction::UsePlaceholder => self.controller.use_placeholder(),
            UiAction::Reset => self.controller.reset(),
            UiAction::OpenStickerPicker => self.controller.open_sticker_picker(),
            UiAction::CloseStickerPicker => self.controller.close_sticker_picker(),
            UiAction::PickSticker(id) => self.controller.pick_sticker(id),
            UiAction::MoveSticker(delta) => self.controller.move_sticker(delta),
            UiAction::ToggleStickerScale => self.controller.toggle_sticker_scale(),
            UiAction::Export => {
                self.start_export(ctx);
                Ok(())
            }
        };

        if let Err(err) = result {
            log::debug!("Ignored {:?}: {}", action, err);
        }
    }

    fn start_export(&mut self, ctx: &egui::Context) {
        if !matches!(self.export_stage, ExportStage::Idle) {
            return;
        }
        match self.controller.begin_export() {
            Ok(job) => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
                self.export_stage = ExportStage::AwaitingCapture(job);
            }
            Err(err) => log::debug!("Export not started: {}", err),
        }
    }

    /// Feeds finished picker and export results into the controller
    fn poll_pending(&mut self, ctx: &egui::Context) {
        if let Some(result) = self.pending_image.as_ref().and_then(Pending::take) {
            self.pending_image = None;
            if let Ok(PickOutcome::Picked(picked)) = &result {
                let image = ImageRef::picked(picked.uri.clone());
                self.textures.insert(ctx, &image, Arc::unwrap_or_clone(picked.pixels.clone()));
            }
            if let Err(err) = self.controller.finish_image_request(result) {
                log::warn!("Dropped picker result: {}", err);
            }
        }

        match std::mem::replace(&mut self.export_stage, ExportStage::Idle) {
            ExportStage::Idle => {}
            ExportStage::AwaitingCapture(job) => {
                let screenshot = ctx.input(|i| {
                    i.raw.events.iter().find_map(|event| match event {
                        egui::Event::Screenshot { image, .. } => Some(image.clone()),
                        _ => None,
                    })
                });
                match screenshot {
                    Some(screenshot) => self.run_export(ctx, job, &screenshot),
                    None => self.export_stage = ExportStage::AwaitingCapture(job),
                }
            }
            ExportStage::Running(pending) => match pending.take() {
                Some(result) => self.controller.finish_export(&result),
                None => self.export_stage = ExportStage::Running(pending),
            },
        }
    }

    fn run_export(&mut self, ctx: &egui::Context, job: ExportJob, screenshot: &egui::ColorImage) {
        let Some(region) = self.composite_rect else {
            self.controller
                .finish_export(&Err(ExportError::Capture("composite is not fully on screen".to_owned())));
            return;
        };

        let composite = match Composite::from_screenshot(screenshot, region, ctx.pixels_per_point()) {
            Ok(composite) => composite,
            Err(err) => {
                self.controller.finish_export(&Err(err));
                return;
            }
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            let pending = crate::task::spawn(Some(ctx.clone()), async move { job.run(&composite) });
            self.export_stage = ExportStage::Running(pending);
        }

        // Encoding and the download click must stay on the browser's thread
        #[cfg(target_arch = "wasm32")]
        {
            let result = job.run(&composite);
            self.controller.finish_export(&result);
        }
    }

    fn show_new_notices(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        for notice in self.controller.take_notices() {
            self.toasts.show(notice, now, self.config.notice_seconds);
        }
        if self.toasts.expire(now) {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }
}

impl eframe::App for StickerSmashApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, CONFIG_KEY, &self.config);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.textures.begin_frame();
        self.poll_pending(ctx);

        let mut actions = Vec::new();

        if self.controller.state().modal_open() {
            panels::sticker_modal(ctx, self.controller.catalog(), &mut actions);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).fill(egui::Color32::from_rgb(37, 41, 46)))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().auto_shrink(false).show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        profile_card::profile_link(ui, &profile_card::NEXTJS);
                        faq::faq(ui);
                        ui.add_space(24.0);

                        let state = self.controller.state();
                        let texture = match state.image_ref() {
                            Some(image) => self.textures.get(image),
                            None => None,
                        };
                        let rect = panels::composite_view(
                            ui,
                            state,
                            texture,
                            self.controller.catalog(),
                            self.config.sticker_size,
                            &mut actions,
                        );
                        // Only a fully visible composite can be cut out of a screenshot
                        self.composite_rect = ui.clip_rect().contains_rect(rect).then_some(rect);

                        ui.add_space(24.0);
                        panels::footer(ui, &self.controller, &mut actions);
                    });
                });
            });

        for action in actions {
            self.apply(ctx, action);
        }

        self.show_new_notices(ctx);
        panels::notices(ctx, &self.toasts);

        if self.controller.is_requesting_image() || self.controller.is_exporting() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
