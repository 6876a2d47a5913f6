//! Scene → draw list.
//!
//! The draw list is what every renderer (Canvas2D in the browser, the
//! raster exporter here) walks back-to-front. Backgrounds are resolved to
//! the full stage at this point, so renderers never special-case them.

use pp_core::model::{Bounds, ImageSrc, Scene};
use pp_core::{FrameId, StageSize};

/// One frame, ready to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub id: FrameId,
    pub src: ImageSrc,
    /// On-stage geometry; for a background this is the whole stage.
    pub bounds: Bounds,
    pub selected: bool,
    pub is_background: bool,
}

impl DrawItem {
    /// Whether this item gets transform handles and the control cluster.
    pub fn is_interactive(&self) -> bool {
        self.selected && !self.is_background
    }
}

/// Frames in paint order (back to front) with stage-resolved bounds.
pub fn draw_list(scene: &Scene, stage: StageSize) -> Vec<DrawItem> {
    scene
        .draw_order()
        .into_iter()
        .map(|f| DrawItem {
            id: f.id,
            src: f.src.clone(),
            bounds: f.stage_bounds(stage.width, stage.height),
            selected: f.selected,
            is_background: f.is_background,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pp_core::model::Frame;

    #[test]
    fn background_is_first_and_stretched() {
        let scene = Scene::from_frames(vec![
            Frame::new(
                FrameId::intern("order_a"),
                "blob:a".into(),
                Bounds::new(10.0, 20.0, 30.0, 40.0),
                1,
            ),
            Frame::background(FrameId::intern("order_bg"), "blob:bg".into(), 5),
        ]);
        let list = draw_list(&scene, StageSize::new(500.0, 400.0));
        assert_eq!(list.len(), 2);
        assert!(list[0].is_background);
        assert_eq!(list[0].bounds, Bounds::new(0.0, 0.0, 500.0, 400.0));
        assert_eq!(list[1].bounds, Bounds::new(10.0, 20.0, 30.0, 40.0));
    }

    #[test]
    fn selected_background_is_never_interactive() {
        let mut bg = Frame::background(FrameId::intern("order_bg2"), "blob:bg".into(), 0);
        bg.selected = true;
        let list = draw_list(&Scene::from_frames(vec![bg]), StageSize::new(10.0, 10.0));
        assert!(!list[0].is_interactive());
    }
}
