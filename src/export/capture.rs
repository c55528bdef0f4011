use std::path::{Path, PathBuf};

use egui::{ColorImage, Rect};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, RgbaImage};
use uuid::Uuid;

use crate::error::ExportError;

/// The rendered composite (image plus optional sticker) in physical pixels
#[derive(Clone)]
pub struct Composite {
    pixels: RgbaImage,
}

impl std::fmt::Debug for Composite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Composite")
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .finish()
    }
}

impl Composite {
    pub fn from_rgba(pixels: RgbaImage) -> Result<Self, ExportError> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(ExportError::Capture("composite region is empty".to_owned()));
        }
        Ok(Self { pixels })
    }

    /// Cuts the composite out of a full viewport screenshot.
    ///
    /// `region` is in points and must lie fully inside the screenshot, a partly
    /// visible composite is rejected rather than cropped.
    pub fn from_screenshot(
        screenshot: &ColorImage,
        region: Rect,
        pixels_per_point: f32,
    ) -> Result<Self, ExportError> {
        let [width, height] = screenshot.size;
        let to_px = |v: f32| (v * pixels_per_point).round() as i64;
        let (min_x, max_x) = (to_px(region.min.x), to_px(region.max.x));
        let (min_y, max_y) = (to_px(region.min.y), to_px(region.max.y));
        if min_x < 0 || min_y < 0 || max_x > width as i64 || max_y > height as i64 {
            return Err(ExportError::Capture(format!(
                "region {:?} is not fully inside the {}x{} screenshot",
                region, width, height
            )));
        }
        if min_x >= max_x || min_y >= max_y {
            return Err(ExportError::Capture(format!("region {:?} is empty", region)));
        }
        let (min_x, max_x, min_y, max_y) = (min_x as usize, max_x as usize, min_y as usize, max_y as usize);

        let mut raw = Vec::with_capacity((max_x - min_x) * (max_y - min_y) * 4);
        for y in min_y..max_y {
            let row = &screenshot.pixels[y * width + min_x..y * width + max_x];
            raw.extend(row.iter().flat_map(|color| color.to_srgba_unmultiplied()));
        }
        let pixels = RgbaImage::from_raw((max_x - min_x) as u32, (max_y - min_y) as u32, raw)
            .ok_or_else(|| ExportError::Capture("screenshot buffer size mismatch".to_owned()))?;
        Self::from_rgba(pixels)
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Native capture settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureOptions {
    /// Output height, the width keeps the composite's aspect ratio
    pub height: u32,
    /// 1.0 is lossless PNG, below that JPEG at this quality
    pub quality: f32,
}

/// Browser encode settings, the output is always JPEG at exactly `width` x `height`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodeOptions {
    pub quality: f32,
    pub width: u32,
    pub height: u32,
}

/// Writes the composite into a new temporary file inside `dir` and returns its path
pub fn capture_region(
    composite: &Composite,
    options: CaptureOptions,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let height = options.height.max(1);
    let width = ((composite.width() as f32 * height as f32 / composite.height() as f32).round() as u32).max(1);
    let scaled = image::imageops::resize(composite.pixels(), width, height, FilterType::Lanczos3);

    let lossless = options.quality >= 1.0;
    let extension = if lossless { "png" } else { "jpg" };
    let path = dir.join(format!("sticker-smash-{}.{}", Uuid::new_v4(), extension));

    if lossless {
        scaled.save_with_format(&path, ImageFormat::Png)?;
    } else {
        let bytes = encode_jpeg(DynamicImage::ImageRgba8(scaled), options.quality)?;
        std::fs::write(&path, bytes)?;
    }

    log::debug!("Captured composite {}x{} into {}", width, height, path.display());
    Ok(path)
}

/// Encodes the composite as an in-memory JPEG of fixed dimensions
pub fn encode_region(composite: &Composite, options: EncodeOptions) -> Result<Vec<u8>, ExportError> {
    let scaled = image::imageops::resize(
        composite.pixels(),
        options.width.max(1),
        options.height.max(1),
        FilterType::Lanczos3,
    );
    encode_jpeg(DynamicImage::ImageRgba8(scaled), options.quality)
}

fn encode_jpeg(image: DynamicImage, quality: f32) -> Result<Vec<u8>, ExportError> {
    // JPEG has no alpha channel
    let rgb = image.to_rgb8();
    let quality = (quality.clamp(0.01, 1.0) * 100.0).round() as u8;
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality).encode_image(&rgb)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2, Color32};
    use image::{GenericImageView, Rgba};

    fn solid(width: u32, height: u32) -> Composite {
        Composite::from_rgba(RgbaImage::from_pixel(width, height, Rgba([10, 120, 200, 255]))).unwrap()
    }

    #[test]
    fn test_screenshot_region_scaled_by_pixels_per_point() {
        let mut screenshot = ColorImage::new([200, 100], Color32::BLACK);
        screenshot.pixels[10 * 200 + 20] = Color32::RED;

        let region = Rect::from_min_max(pos2(10.0, 5.0), pos2(30.0, 25.0));
        let composite = Composite::from_screenshot(&screenshot, region, 2.0).unwrap();
        assert_eq!((composite.width(), composite.height()), (40, 40));
        assert_eq!(composite.pixels().get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_partly_visible_region_is_rejected() {
        let screenshot = ColorImage::new([200, 300], Color32::WHITE);
        let region = Rect::from_min_size(pos2(40.0, 100.0), vec2(320.0, 440.0));
        assert!(matches!(
            Composite::from_screenshot(&screenshot, region, 1.0),
            Err(ExportError::Capture(_))
        ));

        let above = Rect::from_min_max(pos2(10.0, -5.0), pos2(50.0, 40.0));
        assert!(Composite::from_screenshot(&screenshot, above, 1.0).is_err());

        let outside = Rect::from_min_max(pos2(260.0, 60.0), pos2(280.0, 80.0));
        assert!(Composite::from_screenshot(&screenshot, outside, 1.0).is_err());
    }

    #[test]
    fn test_region_touching_the_edges_is_accepted() {
        let screenshot = ColorImage::new([50, 50], Color32::WHITE);
        let region = Rect::from_min_max(pos2(0.0, 0.0), pos2(25.0, 25.0));
        let composite = Composite::from_screenshot(&screenshot, region, 2.0).unwrap();
        assert_eq!((composite.width(), composite.height()), (50, 50));
    }

    #[test]
    fn test_capture_keeps_aspect_at_requested_height() {
        let tmp = tempfile::tempdir().unwrap();
        let options = CaptureOptions { height: 440, quality: 1.0 };
        let path = capture_region(&solid(160, 220), options, tmp.path()).unwrap();

        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
        let written = image::open(&path).unwrap();
        assert_eq!(written.dimensions(), (320, 440));
    }

    #[test]
    fn test_lossy_capture_writes_jpeg() {
        let tmp = tempfile::tempdir().unwrap();
        let options = CaptureOptions { height: 100, quality: 0.8 };
        let path = capture_region(&solid(100, 100), options, tmp.path()).unwrap();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("jpg"));
        assert_eq!(image::guess_format(&std::fs::read(&path).unwrap()).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_encode_region_has_fixed_dimensions() {
        let options = EncodeOptions { quality: 0.95, width: 320, height: 440 };
        let bytes = encode_region(&solid(1000, 500), options).unwrap();
        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Jpeg).unwrap();
        assert_eq!(decoded.dimensions(), (320, 440));
    }

    #[test]
    fn test_empty_composite_is_rejected() {
        assert!(Composite::from_rgba(RgbaImage::new(0, 10)).is_err());
    }
}
