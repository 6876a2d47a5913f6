//! Product cutout: background removal plus the auto-crop that follows it.
//!
//! The matting itself is delegated to a [`BackgroundRemover`]. What the
//! editor owns is the post-process: trim the transparent margin the
//! remover leaves around the product so the frame hugs the object.

use crate::error::{ServiceError, ServiceResult};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use pp_core::model::Dimensions;
use serde::{Deserialize, Serialize};

/// Pixels with alpha strictly above this count as part of the product.
pub const OPAQUE_ALPHA: u8 = 200;

/// Tuning knobs exposed in the upload dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CutoutParams {
    pub alpha_matting: bool,
    pub foreground_threshold: u8,
    pub background_threshold: u8,
}

impl Default for CutoutParams {
    fn default() -> Self {
        Self {
            alpha_matting: true,
            foreground_threshold: 240,
            background_threshold: 10,
        }
    }
}

/// Something that turns a photo into a PNG with a transparent background.
#[allow(async_fn_in_trait)]
pub trait BackgroundRemover {
    async fn remove(&self, photo: &[u8], params: &CutoutParams) -> ServiceResult<Vec<u8>>;
}

/// A cropped product ready to be added as a frame.
#[derive(Debug, Clone)]
pub struct Cutout {
    pub png: Vec<u8>,
    pub dimensions: Dimensions,
}

/// Bounding box `(x, y, width, height)` of the opaque pixels, or `None`
/// when nothing is opaque enough.
pub fn opaque_bounds(image: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let (mut min_x, mut min_y) = (u32::MAX, u32::MAX);
    let (mut max_x, mut max_y) = (0u32, 0u32);
    let mut found = false;
    for (x, y, px) in image.enumerate_pixels() {
        if px.0[3] > OPAQUE_ALPHA {
            found = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }
    found.then(|| (min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}

/// Crop to the opaque bounding box; an image with no opaque pixels is
/// returned whole.
pub fn crop_to_opaque(image: &RgbaImage) -> RgbaImage {
    match opaque_bounds(image) {
        Some((x, y, w, h)) => image::imageops::crop_imm(image, x, y, w, h).to_image(),
        None => {
            log::debug!("crop_to_opaque: no pixel above alpha {OPAQUE_ALPHA}, keeping full image");
            image.clone()
        }
    }
}

fn encode_png(image: &RgbaImage) -> ServiceResult<Vec<u8>> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(png)
}

/// Remove the background from `photo` and crop the result.
pub async fn cut_out_product(
    remover: &impl BackgroundRemover,
    photo: &[u8],
    params: &CutoutParams,
) -> ServiceResult<Cutout> {
    log::debug!("cut_out_product: {} bytes, {params:?}", photo.len());
    let removed = remover.remove(photo, params).await?;
    if removed.is_empty() {
        return Err(ServiceError::BackgroundRemoval("remover returned no data".into()));
    }
    let decoded = image::load_from_memory(&removed)?.to_rgba8();
    let cropped = crop_to_opaque(&decoded);
    let dimensions = Dimensions::new(cropped.width(), cropped.height());
    log::debug!(
        "cut_out_product: {}x{} → {}x{}",
        decoded.width(),
        decoded.height(),
        dimensions.width,
        dimensions.height
    );
    Ok(Cutout {
        png: encode_png(&cropped)?,
        dimensions,
    })
}
