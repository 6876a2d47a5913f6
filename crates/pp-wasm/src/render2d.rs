//! Canvas2D renderer.
//!
//! Paints a draw list onto an HTML `<canvas>` via
//! `CanvasRenderingContext2d`. Images are drawn from decoded
//! `HtmlImageElement`s the page registers; a frame whose image is missing
//! or still loading is skipped and picked up on the next frame.

use pp_core::StageSize;
use pp_core::model::{Bounds, ImageSrc};
use pp_render::DrawItem;
use pp_render::transform::anchor_rects;
use std::collections::HashMap;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

/// Colors for stage chrome.
pub struct CanvasTheme {
    pub stage_bg: &'static str,
    pub selection: &'static str,
    pub anchor_fill: &'static str,
    pub anchor_stroke: &'static str,
}

impl Default for CanvasTheme {
    fn default() -> Self {
        Self {
            stage_bg: "#FFFFFF",
            selection: "#4FC3F7",
            anchor_fill: "#FFFFFF",
            anchor_stroke: "#4FC3F7",
        }
    }
}

/// Paint the stage.
///
/// With `chrome` off only image content is drawn on a transparent canvas,
/// which is what the export path wants. `scale` maps stage units to canvas
/// pixels (2.0 for a download).
pub fn render_stage(
    ctx: &CanvasRenderingContext2d,
    items: &[DrawItem],
    stage: StageSize,
    images: &HashMap<ImageSrc, HtmlImageElement>,
    theme: &CanvasTheme,
    chrome: bool,
    scale: f64,
) {
    let (w, h) = (stage.width as f64 * scale, stage.height as f64 * scale);
    ctx.clear_rect(0.0, 0.0, w, h);
    if chrome {
        ctx.set_fill_style_str(theme.stage_bg);
        ctx.fill_rect(0.0, 0.0, w, h);
    }

    ctx.save();
    let _ = ctx.scale(scale, scale);
    for item in items {
        draw_item(ctx, item, images);
    }
    if chrome && let Some(selected) = items.iter().find(|i| i.is_interactive()) {
        draw_selection(ctx, &selected.bounds, theme);
    }
    ctx.restore();
}

fn draw_item(
    ctx: &CanvasRenderingContext2d,
    item: &DrawItem,
    images: &HashMap<ImageSrc, HtmlImageElement>,
) {
    let Some(img) = images.get(&item.src) else {
        return;
    };
    if !img.complete() || img.natural_width() == 0 {
        return;
    }
    let b = &item.bounds;
    if let Err(e) = ctx.draw_image_with_html_image_element_and_dw_and_dh(
        img,
        b.x as f64,
        b.y as f64,
        b.width as f64,
        b.height as f64,
    ) {
        log::warn!("drawImage failed for {}: {e:?}", item.id);
    }
}

fn draw_selection(ctx: &CanvasRenderingContext2d, b: &Bounds, theme: &CanvasTheme) {
    ctx.set_stroke_style_str(theme.selection);
    ctx.set_line_width(2.0);
    ctx.stroke_rect(
        b.x as f64 - 1.0,
        b.y as f64 - 1.0,
        b.width as f64 + 2.0,
        b.height as f64 + 2.0,
    );

    ctx.set_fill_style_str(theme.anchor_fill);
    ctx.set_stroke_style_str(theme.anchor_stroke);
    ctx.set_line_width(1.5);
    for (_, r) in anchor_rects(b) {
        let (x, y, w, h) = (r.x as f64, r.y as f64, r.width as f64, r.height as f64);
        ctx.fill_rect(x, y, w, h);
        ctx.stroke_rect(x, y, w, h);
    }
}
