//! Frame data model.
//!
//! A `Scene` is a flat, ordered list of `Frame` values. Array order carries
//! no meaning except as the tie-breaker for equal `z_index` values; draw
//! order is always derived by sorting on `z_index`. Scenes are plain values:
//! every operation in [`crate::scene`] returns a new `Scene` and leaves its
//! input untouched, which is what lets history store whole snapshots.

use crate::id::FrameId;
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Image source ────────────────────────────────────────────────────────

/// Reference to image content: a blob/object URL, a data URL, or a
/// remote http(s) URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageSrc(String);

impl ImageSrc {
    pub fn new(src: impl Into<String>) -> Self {
        Self(src.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageSrc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageSrc {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ImageSrc {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ─── Geometry ────────────────────────────────────────────────────────────

/// Width × height pair in pixels or stage units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Axis-aligned box in stage units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

// ─── Frame ───────────────────────────────────────────────────────────────

/// One positioned, sized, z-ordered image layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub id: FrameId,
    pub x: f32,
    pub y: f32,
    /// Stored size. A background stores 0×0 and is stretched to the stage.
    pub width: f32,
    pub height: f32,
    pub z_index: i64,
    pub src: ImageSrc,
    pub selected: bool,
    pub is_background: bool,
}

impl Frame {
    /// A foreground frame at the given geometry, unselected.
    pub fn new(id: FrameId, src: ImageSrc, bounds: Bounds, z_index: i64) -> Self {
        Self {
            id,
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
            z_index,
            src,
            selected: false,
            is_background: false,
        }
    }

    /// A background frame. Position and size are placeholders: the
    /// render layer always stretches a background over the whole stage.
    pub fn background(id: FrameId, src: ImageSrc, z_index: i64) -> Self {
        Self {
            id,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            z_index,
            src,
            selected: false,
            is_background: true,
        }
    }

    /// Stored geometry. Meaningless for backgrounds; use
    /// [`Frame::stage_bounds`] when drawing.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    /// Geometry as it appears on a stage of the given size.
    pub fn stage_bounds(&self, stage_width: f32, stage_height: f32) -> Bounds {
        if self.is_background {
            Bounds::new(0.0, 0.0, stage_width, stage_height)
        } else {
            self.bounds()
        }
    }
}

// ─── Scene ───────────────────────────────────────────────────────────────

/// The complete set of frames at a point in time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scene {
    pub frames: Vec<Frame>,
}

impl Scene {
    /// An empty scene, as at application start.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_frames(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, id: FrameId) -> Option<&Frame> {
        self.frames.iter().find(|f| f.id == id)
    }

    pub fn contains(&self, id: FrameId) -> bool {
        self.get(id).is_some()
    }

    pub fn selected(&self) -> Option<&Frame> {
        self.frames.iter().find(|f| f.selected)
    }

    pub fn background(&self) -> Option<&Frame> {
        self.frames.iter().find(|f| f.is_background)
    }

    /// Frames that are not the background, in array order.
    pub fn foreground(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter().filter(|f| !f.is_background)
    }

    /// Highest non-background `z_index`, or 0 for a scene with no
    /// foreground frames.
    pub fn max_foreground_z(&self) -> i64 {
        self.foreground().map(|f| f.z_index).max().unwrap_or(0)
    }

    /// Lowest non-background `z_index`, or 0 for a scene with no
    /// foreground frames.
    pub fn min_foreground_z(&self) -> i64 {
        self.foreground().map(|f| f.z_index).min().unwrap_or(0)
    }

    /// Frames in draw order: the background first regardless of its
    /// numeric `z_index`, then ascending `z_index`. The sort is stable,
    /// so equal values keep array order.
    pub fn draw_order(&self) -> Vec<&Frame> {
        let mut ordered: Vec<&Frame> = self.frames.iter().collect();
        ordered.sort_by_key(|f| (!f.is_background, f.z_index));
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(name: &str, z: i64) -> Frame {
        Frame::new(
            FrameId::intern(name),
            ImageSrc::new(format!("blob:{name}")),
            Bounds::new(0.0, 0.0, 50.0, 50.0),
            z,
        )
    }

    #[test]
    fn empty_scene_bounds_default_to_zero() {
        let scene = Scene::new();
        assert_eq!(scene.max_foreground_z(), 0);
        assert_eq!(scene.min_foreground_z(), 0);
    }

    #[test]
    fn foreground_extremes_ignore_background() {
        let scene = Scene::from_frames(vec![
            frame("a", 4),
            Frame::background(FrameId::intern("bg"), "blob:bg".into(), -10),
            frame("b", 2),
        ]);
        assert_eq!(scene.max_foreground_z(), 4);
        assert_eq!(scene.min_foreground_z(), 2);
    }

    #[test]
    fn draw_order_puts_background_first_even_with_high_z() {
        let scene = Scene::from_frames(vec![
            frame("top", 3),
            frame("low", 1),
            Frame::background(FrameId::intern("bg_hi"), "blob:bg".into(), 99),
            frame("mid", 2),
        ]);
        let names: Vec<&str> = scene.draw_order().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(names, vec!["bg_hi", "low", "mid", "top"]);
    }

    #[test]
    fn draw_order_ties_keep_array_order() {
        let scene = Scene::from_frames(vec![frame("first", 1), frame("second", 1)]);
        let names: Vec<&str> = scene.draw_order().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn background_stage_bounds_fill_stage() {
        let bg = Frame::background(FrameId::intern("bg_fill"), "blob:bg".into(), 0);
        assert_eq!(bg.stage_bounds(640.0, 480.0), Bounds::new(0.0, 0.0, 640.0, 480.0));
    }
}
