use std::sync::Arc;

use egui::ColorImage;
use image::imageops::FilterType;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::PickError;
use crate::task::{self, Pending};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// How the picked image is prepared before it is returned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickOptions {
    /// Centre-crop the picked image to `crop_aspect`
    pub allows_editing: bool,
    /// 1.0 keeps full resolution, lower values downscale proportionally
    pub quality: f32,
    /// Width / height of the crop, matches the composite frame
    pub crop_aspect: f32,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            allows_editing: true,
            quality: 1.0,
            crop_aspect: 320.0 / 440.0,
        }
    }
}

/// A decoded image handed over by the picker
#[derive(Clone)]
pub struct PickedImage {
    pub uri: String,
    pub pixels: Arc<ColorImage>,
}

impl std::fmt::Debug for PickedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickedImage")
            .field("uri", &self.uri)
            .field("size", &self.pixels.size)
            .finish()
    }
}

impl PickedImage {
    pub fn new(uri: impl Into<String>, pixels: ColorImage) -> Self {
        Self {
            uri: uri.into(),
            pixels: Arc::new(pixels),
        }
    }
}

/// How a picker interaction ended
#[derive(Debug, Clone)]
pub enum PickOutcome {
    Picked(PickedImage),
    /// The user closed the picker without choosing
    Cancelled,
}

/// Supplies an image when the user completes a picker interaction
pub trait ImageSource {
    fn request_image(
        &self,
        options: PickOptions,
        ctx: Option<egui::Context>,
    ) -> Pending<Result<PickOutcome, PickError>>;
}

/// Opens the platform file dialog (a file input on the web)
#[derive(Debug, Clone, Copy, Default)]
pub struct FileDialogSource;

impl ImageSource for FileDialogSource {
    fn request_image(
        &self,
        options: PickOptions,
        ctx: Option<egui::Context>,
    ) -> Pending<Result<PickOutcome, PickError>> {
        task::spawn(ctx, async move {
            let Some(handle) = rfd::AsyncFileDialog::new()
                .set_title("Choose a photo")
                .add_filter("Images", IMAGE_EXTENSIONS)
                .pick_file()
                .await
            else {
                return Ok(PickOutcome::Cancelled);
            };

            #[cfg(not(target_arch = "wasm32"))]
            let uri = handle.path().display().to_string();
            #[cfg(target_arch = "wasm32")]
            let uri = handle.file_name();

            let bytes = handle.read().await;
            log::info!("Picked {} ({} bytes)", uri, bytes.len());
            prepare_picked_image(uri, &bytes, &options).map(PickOutcome::Picked)
        })
    }
}

/// Decodes the picked bytes and applies the edit step
pub fn prepare_picked_image(
    uri: impl Into<String>,
    bytes: &[u8],
    options: &PickOptions,
) -> Result<PickedImage, PickError> {
    if bytes.is_empty() {
        return Err(PickError::Empty);
    }

    let mut image = image::load_from_memory(bytes)?;
    log::debug!("Decoded image: {}x{}", image.width(), image.height());

    if options.allows_editing {
        image = crop_to_aspect(image, options.crop_aspect);
    }
    if options.quality < 1.0 {
        image = downscale(image, options.quality);
    }

    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
    Ok(PickedImage::new(uri, pixels))
}

/// Centre crop to `aspect` (width / height)
fn crop_to_aspect(image: DynamicImage, aspect: f32) -> DynamicImage {
    if aspect <= 0.0 || image.width() == 0 || image.height() == 0 {
        return image;
    }
    let (width, height) = (image.width(), image.height());
    if width as f32 / height as f32 > aspect {
        let new_width = ((height as f32 * aspect).round() as u32).clamp(1, width);
        image.crop_imm((width - new_width) / 2, 0, new_width, height)
    } else {
        let new_height = ((width as f32 / aspect).round() as u32).clamp(1, height);
        image.crop_imm(0, (height - new_height) / 2, width, new_height)
    }
}

fn downscale(image: DynamicImage, factor: f32) -> DynamicImage {
    let width = ((image.width() as f32 * factor).round() as u32).max(1);
    let height = ((image.height() as f32 * factor).round() as u32).max(1);
    image.resize_exact(width, height, FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 255]));
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();
        bytes
    }

    #[test]
    fn test_crop_wide_image_to_frame_aspect() {
        let options = PickOptions::default();
        let picked = prepare_picked_image("wide.png", &png_bytes(880, 440), &options).unwrap();
        assert_eq!(picked.pixels.size, [320, 440]);
        assert_eq!(picked.uri, "wide.png");
    }

    #[test]
    fn test_crop_tall_image_to_frame_aspect() {
        let options = PickOptions { crop_aspect: 1.0, ..PickOptions::default() };
        let picked = prepare_picked_image("tall.png", &png_bytes(100, 300), &options).unwrap();
        assert_eq!(picked.pixels.size, [100, 100]);
    }

    #[test]
    fn test_without_editing_keeps_size() {
        let options = PickOptions { allows_editing: false, ..PickOptions::default() };
        let picked = prepare_picked_image("a.png", &png_bytes(64, 32), &options).unwrap();
        assert_eq!(picked.pixels.size, [64, 32]);
    }

    #[test]
    fn test_quality_downscales() {
        let options = PickOptions { allows_editing: false, quality: 0.5, ..PickOptions::default() };
        let picked = prepare_picked_image("a.png", &png_bytes(64, 32), &options).unwrap();
        assert_eq!(picked.pixels.size, [32, 16]);
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let result = prepare_picked_image("bad.png", b"not an image", &PickOptions::default());
        assert!(matches!(result, Err(PickError::Decode(_))));
        assert!(matches!(
            prepare_picked_image("empty.png", &[], &PickOptions::default()),
            Err(PickError::Empty)
        ));
    }
}
