//! Stage sizing.
//!
//! The visible stage keeps the active preset's aspect ratio and is as large
//! as the container allows. Frame coordinates live in stage units, so the
//! stage size is also the coordinate space every frame is positioned in.

use crate::model::Bounds;
use crate::preset::CanvasPreset;
use serde::Serialize;

/// The stage (or its container) dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StageSize {
    pub width: f32,
    pub height: f32,
}

impl StageSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.width, self.height)
    }
}

/// Fit the preset's aspect ratio into `container`.
///
/// Returns `None` while the container has no area (not laid out yet); the
/// caller keeps its previous stage size in that case.
pub fn fit_stage(container: StageSize, preset: &CanvasPreset) -> Option<StageSize> {
    if container.is_empty() || preset.width == 0 || preset.height == 0 {
        return None;
    }
    let ratio = preset.ratio();
    let width = container.width.min(container.height * ratio);
    let height = width / ratio;
    log::trace!(
        "fit_stage: {}x{} container → {width}x{height} for {}",
        container.width,
        container.height,
        preset.id
    );
    Some(StageSize { width, height })
}
