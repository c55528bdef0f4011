use super::capture::{encode_region, Composite, EncodeOptions};
use super::{ExportReceipt, ExportSink};
use crate::error::ExportError;

pub const JPEG_MIME: &str = "image/jpeg";

/// Offers bytes to the user as a file download
pub trait Downloader: Send + Sync {
    fn download(&self, file_name: &str, mime: &str, bytes: &[u8]) -> Result<(), ExportError>;
}

/// Clicks a temporary `<a download>` pointing at a Blob URL
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserDownloader;

#[cfg(target_arch = "wasm32")]
impl Downloader for BrowserDownloader {
    fn download(&self, file_name: &str, mime: &str, bytes: &[u8]) -> Result<(), ExportError> {
        use wasm_bindgen::JsCast as _;

        let js_err = |err: wasm_bindgen::JsValue| ExportError::Download(format!("{:?}", err));

        let parts = js_sys::Array::new();
        parts.push(&js_sys::Uint8Array::from(bytes));
        let properties = web_sys::BlobPropertyBag::new();
        properties.set_type(mime);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &properties)
            .map_err(js_err)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| ExportError::Download("no document".to_owned()))?;
        let anchor = document
            .create_element("a")
            .map_err(js_err)?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| ExportError::Download("<a> is not an anchor element".to_owned()))?;
        anchor.set_href(&url);
        anchor.set_download(file_name);
        anchor.click();

        web_sys::Url::revoke_object_url(&url).map_err(js_err)?;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Downloader for BrowserDownloader {
    fn download(&self, file_name: &str, _mime: &str, _bytes: &[u8]) -> Result<(), ExportError> {
        Err(ExportError::Download(format!(
            "cannot download {} outside a browser",
            file_name
        )))
    }
}

/// Browser export: encode to JPEG in memory, then trigger a download
pub struct DownloadSink<D> {
    downloader: D,
    options: EncodeOptions,
    file_name: String,
}

impl<D: Downloader> DownloadSink<D> {
    pub fn new(downloader: D, options: EncodeOptions, file_name: impl Into<String>) -> Self {
        Self {
            downloader,
            options,
            file_name: file_name.into(),
        }
    }
}

impl<D: Downloader> ExportSink for DownloadSink<D> {
    fn name(&self) -> &'static str {
        "download"
    }

    fn requires_permission(&self) -> bool {
        false
    }

    fn export(&self, composite: &Composite) -> Result<ExportReceipt, ExportError> {
        let bytes = encode_region(composite, self.options)?;
        self.downloader.download(&self.file_name, JPEG_MIME, &bytes)?;
        log::info!("Offered {} ({} bytes) for download", self.file_name, bytes.len());
        Ok(ExportReceipt::Downloaded {
            file_name: self.file_name.clone(),
            bytes: bytes.len(),
        })
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_browser_downloader_unavailable_natively() {
        let sink = DownloadSink::new(
            BrowserDownloader,
            EncodeOptions { quality: 0.95, width: 32, height: 44 },
            "sticker-smash.jpeg",
        );
        let composite = Composite::from_rgba(RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]))).unwrap();
        assert!(matches!(sink.export(&composite), Err(ExportError::Download(_))));
    }
}
