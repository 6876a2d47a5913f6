//! Raster export: flatten the stage into a single RGBA image.
//!
//! Only image content is painted; selection borders, anchors and the
//! control cluster are UI chrome and never reach the export. Areas not
//! covered by any frame stay transparent.

use crate::error::{RenderError, RenderResult};
use crate::order::draw_list;
use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use pp_core::StageSize;
use pp_core::model::{ImageSrc, Scene};
use std::collections::HashMap;

/// Pixel density of the user-facing download.
pub const DOWNLOAD_PIXEL_RATIO: f32 = 2.0;

/// Pixel density of the reference snapshot sent to the generation service.
pub const REFERENCE_PIXEL_RATIO: f32 = 1.0;

/// Source of decoded pixels for frame images.
///
/// Decoding is the embedder's business (browser image elements, files on
/// disk, network); the compositor only needs finished RGBA buffers.
pub trait ImageProvider {
    fn image(&self, src: &ImageSrc) -> Option<&RgbaImage>;
}

impl ImageProvider for HashMap<ImageSrc, RgbaImage> {
    fn image(&self, src: &ImageSrc) -> Option<&RgbaImage> {
        self.get(src)
    }
}

/// Composite the scene at `pixel_ratio` × the stage size.
///
/// Frames whose image is not available yet are skipped, just as the live
/// stage shows nothing for an image that has not finished loading.
pub fn compose(
    scene: &Scene,
    stage: StageSize,
    pixel_ratio: f32,
    images: &impl ImageProvider,
) -> RenderResult<RgbaImage> {
    let out_w = (stage.width * pixel_ratio).round().max(0.0) as u32;
    let out_h = (stage.height * pixel_ratio).round().max(0.0) as u32;
    if out_w == 0 || out_h == 0 {
        return Err(RenderError::EmptyStage {
            width: out_w,
            height: out_h,
        });
    }

    let mut canvas = RgbaImage::new(out_w, out_h);
    for item in draw_list(scene, stage) {
        let Some(source) = images.image(&item.src) else {
            log::warn!("compose: no pixels for {} ({}), skipping", item.id, item.src);
            continue;
        };
        let w = (item.bounds.width * pixel_ratio).round();
        let h = (item.bounds.height * pixel_ratio).round();
        if w < 1.0 || h < 1.0 {
            continue;
        }
        let (w, h) = (w as u32, h as u32);
        let x = (item.bounds.x * pixel_ratio).round() as i64;
        let y = (item.bounds.y * pixel_ratio).round() as i64;

        if source.dimensions() == (w, h) {
            imageops::overlay(&mut canvas, source, x, y);
        } else {
            let scaled = imageops::resize(source, w, h, FilterType::Triangle);
            imageops::overlay(&mut canvas, &scaled, x, y);
        }
    }
    log::debug!("compose: {out_w}x{out_h} @{pixel_ratio}x, {} frames", scene.len());
    Ok(canvas)
}

/// Encode a composited image as PNG bytes.
pub fn export_png(image: &RgbaImage) -> RenderResult<Vec<u8>> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(bytes)
}

/// Download filename for the active preset.
pub fn export_file_name(preset_id: &str) -> String {
    format!("product-photo-{preset_id}.png")
}
