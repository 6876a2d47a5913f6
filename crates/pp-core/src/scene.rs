//! Scene store operations.
//!
//! Every operation takes `&self` and returns a brand-new `Scene`; the input
//! is never mutated. Structural and geometric edits are also expressible as
//! a [`SceneOp`] value so the history layer can apply them uniformly.
//! Selection is deliberately not a `SceneOp`: it bypasses history.

use crate::error::SceneError;
use crate::id::FrameId;
use crate::model::*;
use crate::placement::Placement;
use serde::{Deserialize, Serialize};

/// Offset applied to a duplicated frame on both axes.
pub const DUPLICATE_OFFSET: f32 = 30.0;

/// Partial geometry update merged into a frame by [`Scene::update_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FramePatch {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl FramePatch {
    /// Move to an absolute position.
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Replace the whole box (resize end).
    pub fn bounds(b: Bounds) -> Self {
        Self {
            x: Some(b.x),
            y: Some(b.y),
            width: Some(b.width),
            height: Some(b.height),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.width.is_none() && self.height.is_none()
    }
}

/// A single undoable scene mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneOp {
    /// Append a frame for an image whose natural size is already known.
    AddFrame {
        id: FrameId,
        src: ImageSrc,
        natural: Dimensions,
        placement: Placement,
    },
    UpdateFrame {
        id: FrameId,
        patch: FramePatch,
    },
    DeleteFrame {
        id: FrameId,
    },
    DuplicateFrame {
        id: FrameId,
    },
    BringToFront {
        id: FrameId,
    },
    SendToBack {
        id: FrameId,
    },
    AddOrReplaceBackground {
        src: ImageSrc,
    },
    ReplaceSceneWithBackground {
        src: ImageSrc,
    },
}

impl SceneOp {
    /// Short human-readable label, used for undo/redo menu entries.
    pub fn description(&self) -> &'static str {
        match self {
            SceneOp::AddFrame {
                placement: Placement::Product,
                ..
            } => "Add product photo",
            SceneOp::AddFrame {
                placement: Placement::Prop,
                ..
            } => "Add prop",
            SceneOp::UpdateFrame { .. } => "Transform frame",
            SceneOp::DeleteFrame { .. } => "Delete frame",
            SceneOp::DuplicateFrame { .. } => "Duplicate frame",
            SceneOp::BringToFront { .. } => "Bring to front",
            SceneOp::SendToBack { .. } => "Send to back",
            SceneOp::AddOrReplaceBackground { .. } => "Set background",
            SceneOp::ReplaceSceneWithBackground { .. } => "Use generated background",
        }
    }
}

impl Scene {
    /// Apply a `SceneOp`, returning the resulting scene.
    pub fn apply(&self, op: &SceneOp) -> Result<Scene, SceneError> {
        match op {
            SceneOp::AddFrame {
                id,
                src,
                natural,
                placement,
            } => self.add_frame(*id, src.clone(), *natural, *placement),
            SceneOp::UpdateFrame { id, patch } => self.update_frame(*id, patch),
            SceneOp::DeleteFrame { id } => Ok(self.delete_frame(*id)),
            SceneOp::DuplicateFrame { id } => self.duplicate_frame(*id),
            SceneOp::BringToFront { id } => self.bring_to_front(*id),
            SceneOp::SendToBack { id } => self.send_to_back(*id),
            SceneOp::AddOrReplaceBackground { src } => {
                Ok(self.add_or_replace_background(src.clone()))
            }
            SceneOp::ReplaceSceneWithBackground { src } => {
                Ok(Scene::replace_with_background(src.clone()))
            }
        }
    }

    /// Append a frame sized to the placement's cap, stacked above every
    /// other foreground frame.
    pub fn add_frame(
        &self,
        id: FrameId,
        src: ImageSrc,
        natural: Dimensions,
        placement: Placement,
    ) -> Result<Scene, SceneError> {
        if natural.is_empty() {
            return Err(SceneError::EmptyImage {
                src: src.to_string(),
                width: natural.width,
                height: natural.height,
            });
        }
        let bounds = placement.initial_bounds(natural);
        let z = self.max_foreground_z() + 1;
        log::debug!(
            "add_frame {id}: {}x{} at z={z} ({placement:?})",
            bounds.width,
            bounds.height
        );
        let mut next = self.clone();
        next.frames.push(Frame::new(id, src, bounds, z));
        Ok(next)
    }

    /// Select exactly the frame with `id`. Anything else (no id, an unknown
    /// id, the background) clears the selection.
    pub fn select_frame(&self, id: Option<FrameId>) -> Scene {
        let target = id.filter(|id| self.get(*id).is_some_and(|f| !f.is_background));
        let mut next = self.clone();
        for f in &mut next.frames {
            f.selected = Some(f.id) == target;
        }
        next
    }

    /// Merge a geometry patch into a foreground frame.
    pub fn update_frame(&self, id: FrameId, patch: &FramePatch) -> Result<Scene, SceneError> {
        let frame = self.get(id).ok_or(SceneError::UnknownFrame(id))?;
        if frame.is_background {
            return Err(SceneError::BackgroundLocked(id));
        }
        let mut next = self.clone();
        if let Some(f) = next.frames.iter_mut().find(|f| f.id == id) {
            if let Some(x) = patch.x {
                f.x = x;
            }
            if let Some(y) = patch.y {
                f.y = y;
            }
            if let Some(w) = patch.width {
                f.width = w;
            }
            if let Some(h) = patch.height {
                f.height = h;
            }
        }
        Ok(next)
    }

    /// Remove a frame. Removing the background leaves the scene without one.
    pub fn delete_frame(&self, id: FrameId) -> Scene {
        let mut next = self.clone();
        next.frames.retain(|f| f.id != id);
        next
    }

    /// Copy a foreground frame, offset by [`DUPLICATE_OFFSET`], with a new
    /// id, unselected, stacked on top.
    pub fn duplicate_frame(&self, id: FrameId) -> Result<Scene, SceneError> {
        let Some(original) = self.get(id) else {
            return Ok(self.clone());
        };
        if original.is_background {
            return Err(SceneError::BackgroundLocked(id));
        }
        let mut copy = original.clone();
        copy.id = FrameId::fresh();
        copy.x += DUPLICATE_OFFSET;
        copy.y += DUPLICATE_OFFSET;
        copy.selected = false;
        copy.z_index = self.max_foreground_z() + 1;

        let mut next = self.clone();
        next.frames.push(copy);
        Ok(next)
    }

    /// Raise a foreground frame above every other foreground frame.
    pub fn bring_to_front(&self, id: FrameId) -> Result<Scene, SceneError> {
        let z = self.max_foreground_z() + 1;
        self.restack(id, z)
    }

    /// Lower a foreground frame below every other frame, background included.
    pub fn send_to_back(&self, id: FrameId) -> Result<Scene, SceneError> {
        let floor = match self.background() {
            Some(bg) => bg.z_index.min(self.min_foreground_z()),
            None => self.min_foreground_z(),
        };
        self.restack(id, floor - 1)
    }

    fn restack(&self, id: FrameId, z: i64) -> Result<Scene, SceneError> {
        let Some(frame) = self.get(id) else {
            return Ok(self.clone());
        };
        if frame.is_background {
            return Err(SceneError::BackgroundLocked(id));
        }
        let mut next = self.clone();
        if let Some(f) = next.frames.iter_mut().find(|f| f.id == id) {
            f.z_index = z;
        }
        Ok(next)
    }

    /// Swap in a new background, keeping all foreground frames.
    pub fn add_or_replace_background(&self, src: ImageSrc) -> Scene {
        let z = self.min_foreground_z() - 1;
        let mut next = self.clone();
        next.frames.retain(|f| !f.is_background);
        next.frames
            .push(Frame::background(FrameId::fresh_background(), src, z));
        next
    }

    /// A fresh scene holding only `src` as its background.
    pub fn replace_with_background(src: ImageSrc) -> Scene {
        Scene::from_frames(vec![Frame::background(
            FrameId::fresh_background(),
            src,
            0,
        )])
    }

    /// Instance form of [`Scene::replace_with_background`]; the current
    /// content is discarded.
    pub fn replace_scene_with_background(&self, src: ImageSrc) -> Scene {
        Scene::replace_with_background(src)
    }
}
