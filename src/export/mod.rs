//! Turning the on-screen composite into a persisted image.
//!
//! The composite is captured by the UI toolkit (a viewport screenshot cropped to the
//! composite's rectangle); this module only scales, encodes and hands the result to
//! the platform's sink. Exactly one [`ExportSink`] implementation is selected at
//! startup by [`select_sink`]:
//!
//! - [`LibrarySink`] on native: temporary file, then the photo library
//! - [`DownloadSink`] in the browser: in-memory JPEG, then a file download

mod capture;
mod download;
mod library;

use std::path::PathBuf;
use std::sync::Arc;

pub use capture::{capture_region, encode_region, CaptureOptions, Composite, EncodeOptions};
pub use download::{BrowserDownloader, DownloadSink, Downloader};
pub use library::{LibrarySink, MediaLibrary, PicturesLibrary};

use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::platform::Platform;

/// What an export produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportReceipt {
    SavedToLibrary { path: PathBuf },
    Downloaded { file_name: String, bytes: usize },
}

/// Persists a captured composite
pub trait ExportSink: Send + Sync {
    /// Short name used in logs and events
    fn name(&self) -> &'static str;

    /// Whether storage-write permission must be granted before exporting
    fn requires_permission(&self) -> bool;

    fn export(&self, composite: &Composite) -> Result<ExportReceipt, ExportError>;
}

/// Picks the sink for `platform`, once, at startup
pub fn select_sink(platform: Platform, config: &ExportConfig) -> Arc<dyn ExportSink> {
    if platform.has_native_capture() {
        let library = PicturesLibrary::new(config.resolve_library_dir());
        let options = CaptureOptions {
            height: config.native_height,
            quality: config.native_quality,
        };
        Arc::new(LibrarySink::new(library, options, std::env::temp_dir()))
    } else {
        let options = EncodeOptions {
            quality: config.web_quality,
            width: config.web_width,
            height: config.web_height,
        };
        Arc::new(DownloadSink::new(
            BrowserDownloader,
            options,
            config.download_file_name.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_selects_sink() {
        let config = ExportConfig::default();

        let native = select_sink(Platform::Native, &config);
        assert_eq!(native.name(), "library");
        assert!(native.requires_permission());

        let browser = select_sink(Platform::Browser, &config);
        assert_eq!(browser.name(), "download");
        assert!(!browser.requires_permission());
    }
}
