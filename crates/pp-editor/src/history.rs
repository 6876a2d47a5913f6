//! Linear undo/redo over whole-scene snapshots.
//!
//! Every recorded operation saves the full scene it replaced, so undo is a
//! plain swap with no inverse computation. Selection changes bypass the
//! stacks entirely; a restored snapshot keeps whatever selection it had
//! when it was taken.

use pp_core::model::{ImageSrc, Scene};
use pp_core::{FrameId, SceneError, SceneOp};

/// A saved scene plus the label of the operation that moved away from it.
#[derive(Debug, Clone)]
struct Snapshot {
    scene: Scene,
    description: String,
}

/// Owns the current scene and both history stacks.
#[derive(Debug, Clone, Default)]
pub struct History {
    current: Scene,
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    /// Oldest snapshots are evicted beyond this many. `None` keeps all.
    max_depth: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing scene with empty stacks.
    pub fn from_scene(scene: Scene) -> Self {
        Self {
            current: scene,
            ..Self::default()
        }
    }

    /// Keep at most `depth` undo steps.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self.trim();
        self
    }

    pub fn scene(&self) -> &Scene {
        &self.current
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Label of the step `undo` would revert.
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(|s| s.description.as_str())
    }

    /// Label of the step `redo` would re-apply.
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|s| s.description.as_str())
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Every image source used by the current scene or any saved step.
    pub fn sources(&self) -> impl Iterator<Item = &ImageSrc> {
        std::iter::once(&self.current)
            .chain(self.undo_stack.iter().map(|s| &s.scene))
            .chain(self.redo_stack.iter().map(|s| &s.scene))
            .flat_map(|scene| scene.frames.iter().map(|f| &f.src))
    }

    /// Apply `op` and record it under its default label.
    ///
    /// Returns `Ok(true)` when a step was recorded, `Ok(false)` when the
    /// operation left the scene unchanged.
    pub fn apply(&mut self, op: &SceneOp) -> Result<bool, SceneError> {
        self.apply_described(op, op.description())
    }

    /// Apply `op` and record it under `description`.
    ///
    /// The new scene is computed first: on error, or when nothing changed,
    /// neither the scene nor the stacks are touched.
    pub fn apply_described(&mut self, op: &SceneOp, description: &str) -> Result<bool, SceneError> {
        let next = self.current.apply(op)?;
        if next == self.current {
            log::trace!("history: '{description}' changed nothing, not recorded");
            return Ok(false);
        }
        let previous = std::mem::replace(&mut self.current, next);
        self.undo_stack.push(Snapshot {
            scene: previous,
            description: description.to_string(),
        });
        self.trim();
        self.redo_stack.clear();
        log::debug!("history: '{description}' (undo depth {})", self.undo_stack.len());
        Ok(true)
    }

    /// Change selection without recording a step.
    pub fn select(&mut self, id: Option<FrameId>) {
        self.current = self.current.select_frame(id);
    }

    /// Revert the most recent step. Returns its label, or `None` when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> Option<String> {
        let snapshot = self.undo_stack.pop()?;
        let current = std::mem::replace(&mut self.current, snapshot.scene);
        self.redo_stack.push(Snapshot {
            scene: current,
            description: snapshot.description.clone(),
        });
        Some(snapshot.description)
    }

    /// Re-apply the most recently undone step.
    pub fn redo(&mut self) -> Option<String> {
        let snapshot = self.redo_stack.pop()?;
        let current = std::mem::replace(&mut self.current, snapshot.scene);
        self.undo_stack.push(Snapshot {
            scene: current,
            description: snapshot.description.clone(),
        });
        self.trim();
        Some(snapshot.description)
    }

    fn trim(&mut self) {
        if let Some(max) = self.max_depth {
            let excess = self.undo_stack.len().saturating_sub(max);
            if excess > 0 {
                self.undo_stack.drain(..excess);
            }
        }
    }
}
