//! Move/resize gesture state machine.
//!
//! ```text
//! Idle ──down on frame──▶ Dragging ──up──▶ Idle
//! Idle ──down on anchor─▶ Resizing ──up──▶ Idle
//! ```
//!
//! Pointer moves only update a preview box. The scene is touched once, on
//! release, so a whole drag is a single undo step.

use crate::input::InputEvent;
use pp_core::model::{Bounds, Scene};
use pp_core::{FrameId, FramePatch, SceneOp};
use pp_render::{Handle, handle_at, hit_test, resize_with_handle};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging {
        id: FrameId,
        start: Bounds,
        origin: (f32, f32),
        preview: Bounds,
    },
    Resizing {
        id: FrameId,
        handle: Handle,
        start: Bounds,
        origin: (f32, f32),
        preview: Bounds,
    },
}

/// What the session should do in response to an input event.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    /// Nothing visible changed.
    None,
    /// Change the selection (outside history).
    Select(Option<FrameId>),
    /// Redraw `id` at `bounds`; the scene itself is unchanged.
    Preview { id: FrameId, bounds: Bounds },
    /// Record this operation.
    Commit(SceneOp),
    /// A gesture was abandoned; redraw from the scene.
    Cancelled,
}

#[derive(Debug, Default)]
pub struct FrameGesture {
    state: GestureState,
}

impl FrameGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != GestureState::Idle
    }

    /// Live bounds of the frame being manipulated, if any.
    pub fn preview(&self) -> Option<(FrameId, Bounds)> {
        match self.state {
            GestureState::Idle => None,
            GestureState::Dragging { id, preview, .. }
            | GestureState::Resizing { id, preview, .. } => Some((id, preview)),
        }
    }

    /// Drop any in-flight gesture without committing.
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
    }

    pub fn handle(&mut self, event: &InputEvent, scene: &Scene) -> GestureOutcome {
        match *event {
            InputEvent::PointerDown { x, y } => self.pointer_down(scene, x, y),
            InputEvent::PointerMove { x, y } => self.pointer_move(x, y),
            InputEvent::PointerUp { .. } => self.pointer_up(),
            InputEvent::PointerCancel => {
                if self.is_active() {
                    self.reset();
                    GestureOutcome::Cancelled
                } else {
                    GestureOutcome::None
                }
            }
        }
    }

    fn pointer_down(&mut self, scene: &Scene, x: f32, y: f32) -> GestureOutcome {
        // Anchors of the selected frame win over whatever lies beneath.
        if let Some(selected) = scene.selected().filter(|f| !f.is_background) {
            let start = selected.bounds();
            if let Some(handle) = handle_at(&start, x, y) {
                self.state = GestureState::Resizing {
                    id: selected.id,
                    handle,
                    start,
                    origin: (x, y),
                    preview: start,
                };
                return GestureOutcome::Select(Some(selected.id));
            }
        }

        match hit_test(scene, x, y).and_then(|id| scene.get(id)) {
            Some(frame) => {
                let start = frame.bounds();
                self.state = GestureState::Dragging {
                    id: frame.id,
                    start,
                    origin: (x, y),
                    preview: start,
                };
                GestureOutcome::Select(Some(frame.id))
            }
            None => {
                self.state = GestureState::Idle;
                GestureOutcome::Select(None)
            }
        }
    }

    fn pointer_move(&mut self, x: f32, y: f32) -> GestureOutcome {
        match &mut self.state {
            GestureState::Idle => GestureOutcome::None,
            GestureState::Dragging {
                id,
                start,
                origin,
                preview,
            } => {
                *preview = Bounds::new(
                    start.x + (x - origin.0),
                    start.y + (y - origin.1),
                    start.width,
                    start.height,
                );
                GestureOutcome::Preview {
                    id: *id,
                    bounds: *preview,
                }
            }
            GestureState::Resizing {
                id,
                handle,
                start,
                origin,
                preview,
            } => {
                *preview = resize_with_handle(start, *handle, x - origin.0, y - origin.1);
                GestureOutcome::Preview {
                    id: *id,
                    bounds: *preview,
                }
            }
        }
    }

    fn pointer_up(&mut self) -> GestureOutcome {
        let state = std::mem::take(&mut self.state);
        match state {
            GestureState::Idle => GestureOutcome::None,
            GestureState::Dragging {
                id, start, preview, ..
            } => {
                if preview == start {
                    return GestureOutcome::None;
                }
                GestureOutcome::Commit(SceneOp::UpdateFrame {
                    id,
                    patch: FramePatch::position(preview.x, preview.y),
                })
            }
            GestureState::Resizing {
                id, start, preview, ..
            } => {
                if preview == start {
                    return GestureOutcome::None;
                }
                GestureOutcome::Commit(SceneOp::UpdateFrame {
                    id,
                    patch: FramePatch::bounds(preview),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pp_core::model::Frame;
    use pp_render::MIN_FRAME_SIZE;

    fn scene(selected: bool) -> Scene {
        let mut f = Frame::new(
            FrameId::intern("g_a"),
            "blob:a".into(),
            Bounds::new(100.0, 100.0, 200.0, 100.0),
            1,
        );
        f.selected = selected;
        Scene::from_frames(vec![
            Frame::background(FrameId::intern("g_bg"), "blob:bg".into(), 0),
            f,
        ])
    }

    #[test]
    fn drag_previews_then_commits_position() {
        let s = scene(false);
        let mut g = FrameGesture::new();
        assert_eq!(
            g.handle(&InputEvent::from_pointer_down(150.0, 150.0), &s),
            GestureOutcome::Select(Some(FrameId::intern("g_a")))
        );
        let out = g.handle(&InputEvent::from_pointer_move(170.0, 140.0), &s);
        assert_eq!(
            out,
            GestureOutcome::Preview {
                id: FrameId::intern("g_a"),
                bounds: Bounds::new(120.0, 90.0, 200.0, 100.0),
            }
        );
        let out = g.handle(&InputEvent::from_pointer_up(170.0, 140.0), &s);
        assert_eq!(
            out,
            GestureOutcome::Commit(SceneOp::UpdateFrame {
                id: FrameId::intern("g_a"),
                patch: FramePatch::position(120.0, 90.0),
            })
        );
        assert!(!g.is_active());
    }

    #[test]
    fn click_without_movement_commits_nothing() {
        let s = scene(false);
        let mut g = FrameGesture::new();
        g.handle(&InputEvent::from_pointer_down(150.0, 150.0), &s);
        assert_eq!(
            g.handle(&InputEvent::from_pointer_up(150.0, 150.0), &s),
            GestureOutcome::None
        );
    }

    #[test]
    fn background_click_deselects() {
        let s = scene(true);
        let mut g = FrameGesture::new();
        assert_eq!(
            g.handle(&InputEvent::from_pointer_down(500.0, 500.0), &s),
            GestureOutcome::Select(None)
        );
        assert!(!g.is_active());
    }

    #[test]
    fn anchor_resize_respects_floor() {
        let s = scene(true);
        let mut g = FrameGesture::new();
        g.handle(&InputEvent::from_pointer_down(300.0, 200.0), &s);
        assert!(matches!(
            g.state(),
            GestureState::Resizing {
                handle: Handle::BottomRight,
                ..
            }
        ));
        g.handle(&InputEvent::from_pointer_move(0.0, 0.0), &s);
        let Some((_, preview)) = g.preview() else {
            panic!("expected preview");
        };
        assert_eq!((preview.width, preview.height), (MIN_FRAME_SIZE, MIN_FRAME_SIZE));
        match g.handle(&InputEvent::from_pointer_up(0.0, 0.0), &s) {
            GestureOutcome::Commit(SceneOp::UpdateFrame { patch, .. }) => {
                assert_eq!(patch, FramePatch::bounds(Bounds::new(100.0, 100.0, 40.0, 40.0)));
            }
            other => panic!("expected commit, got {other:?}"),
        }
    }

    #[test]
    fn cancel_discards_preview() {
        let s = scene(false);
        let mut g = FrameGesture::new();
        g.handle(&InputEvent::from_pointer_down(150.0, 150.0), &s);
        g.handle(&InputEvent::from_pointer_move(400.0, 400.0), &s);
        assert_eq!(g.handle(&InputEvent::PointerCancel, &s), GestureOutcome::Cancelled);
        assert_eq!(g.preview(), None);
    }
}
