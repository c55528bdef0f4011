#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod catalog;
pub mod components;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod notice;
pub mod panels;
pub mod permission;
pub mod picker;
pub mod platform;
pub mod session;
pub mod task;
pub mod texture_manager;
pub mod widgets;

pub use app::StickerSmashApp;
pub use catalog::{Sticker, StickerCatalog, StickerId};
pub use config::AppConfig;
pub use error::{ConfigError, ExportError, PickError, TransitionError};
pub use export::{ExportReceipt, ExportSink};
pub use notice::{Notice, NoticeKind};
pub use permission::{PermissionGate, PermissionState};
pub use picker::{ImageSource, PickOptions, PickOutcome, PickedImage};
pub use platform::Platform;
pub use session::{ImageRef, ViewController, ViewKind, ViewState};
