//! Hit testing: point → frame lookup.
//!
//! Walks the draw order front-to-back. Backgrounds are never hit: a click
//! that lands only on the background is treated as a click on the empty
//! stage.

use crate::transform::{Handle, anchor_rects};
use pp_core::FrameId;
use pp_core::model::{Bounds, Scene};

/// Find the topmost foreground frame at (`px`, `py`).
pub fn hit_test(scene: &Scene, px: f32, py: f32) -> Option<FrameId> {
    scene
        .draw_order()
        .into_iter()
        .rev()
        .filter(|f| !f.is_background)
        .find(|f| f.bounds().contains(px, py))
        .map(|f| f.id)
}

/// Find the transform anchor of `bounds` under (`px`, `py`), if any.
///
/// Anchors are checked before frames so a handle that overhangs a
/// neighbouring frame still wins.
pub fn handle_at(bounds: &Bounds, px: f32, py: f32) -> Option<Handle> {
    anchor_rects(bounds)
        .into_iter()
        .find(|(_, r)| r.contains(px, py))
        .map(|(h, _)| h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pp_core::model::Frame;

    fn scene() -> Scene {
        Scene::from_frames(vec![
            Frame::new(
                FrameId::intern("hit_low"),
                "blob:low".into(),
                Bounds::new(0.0, 0.0, 100.0, 100.0),
                1,
            ),
            Frame::new(
                FrameId::intern("hit_high"),
                "blob:high".into(),
                Bounds::new(50.0, 50.0, 100.0, 100.0),
                2,
            ),
            Frame::background(FrameId::intern("hit_bg"), "blob:bg".into(), 0),
        ])
    }

    #[test]
    fn overlap_picks_highest_z() {
        assert_eq!(hit_test(&scene(), 75.0, 75.0), Some(FrameId::intern("hit_high")));
        assert_eq!(hit_test(&scene(), 10.0, 10.0), Some(FrameId::intern("hit_low")));
    }

    #[test]
    fn background_only_area_misses() {
        assert_eq!(hit_test(&scene(), 400.0, 400.0), None);
    }

    #[test]
    fn handle_lookup() {
        let b = Bounds::new(50.0, 50.0, 100.0, 100.0);
        assert_eq!(handle_at(&b, 151.0, 149.0), Some(Handle::BottomRight));
        assert_eq!(handle_at(&b, 100.0, 100.0), None);
    }
}
