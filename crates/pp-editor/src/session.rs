//! Editor session: the single writer of scene state.
//!
//! Panels, the canvas and the chat flow all talk to the scene through an
//! `EditorSession`. It owns the history, the active canvas preset and the
//! stage size, the in-flight gesture, and the image loads that have been
//! requested but not yet measured.
//!
//! Adding an image is two-phase: `request_add` registers the request and
//! the embedder decodes the image; `resolve_load` then commits the frame
//! once the natural size is known. Loads that fail or outlive
//! [`LOAD_TIMEOUT_MS`] are reported as [`EditorError::AssetLoad`].

use crate::error::EditorError;
use crate::gesture::{FrameGesture, GestureOutcome};
use crate::history::History;
use crate::input::InputEvent;
use pp_core::model::{Bounds, Dimensions, ImageSrc, Scene};
use pp_core::{CanvasPreset, FrameId, Placement, SceneOp, StageSize, fit_stage};
use pp_render::{
    ControlAction, ControlCluster, DrawItem, ImageProvider, compose, draw_list,
    export_file_name, export_png, handle_at, hit_test, place_controls,
};
use pp_render::compose::{DOWNLOAD_PIXEL_RATIO, REFERENCE_PIXEL_RATIO};
use smallvec::SmallVec;
use std::collections::HashSet;
use std::fmt;

/// How long an image may take to report its natural size.
pub const LOAD_TIMEOUT_MS: u64 = 30_000;

/// Handle for an image load the session is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadToken(u64);

impl LoadToken {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LoadToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "load#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct PendingLoad {
    token: LoadToken,
    src: ImageSrc,
    placement: Placement,
    requested_at_ms: u64,
}

pub struct EditorSession {
    history: History,
    preset: CanvasPreset,
    container: StageSize,
    stage: StageSize,
    gesture: FrameGesture,
    pending: SmallVec<[PendingLoad; 4]>,
    next_token: u64,
    load_timeout_ms: u64,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    pub fn new() -> Self {
        Self::with_history(History::new())
    }

    /// Build a session around an existing history (e.g. one with a depth cap).
    pub fn with_history(history: History) -> Self {
        Self {
            history,
            preset: CanvasPreset::default(),
            container: StageSize::default(),
            stage: StageSize::default(),
            gesture: FrameGesture::new(),
            pending: SmallVec::new(),
            next_token: 1,
            load_timeout_ms: LOAD_TIMEOUT_MS,
        }
    }

    pub fn with_load_timeout(mut self, timeout_ms: u64) -> Self {
        self.load_timeout_ms = timeout_ms;
        self
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn scene(&self) -> &Scene {
        self.history.scene()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn preset(&self) -> &CanvasPreset {
        &self.preset
    }

    pub fn stage(&self) -> StageSize {
        self.stage
    }

    pub fn pending_loads(&self) -> usize {
        self.pending.len()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Sources the embedder must keep decoded: everything reachable by undo
    /// or redo plus the loads still in flight.
    pub fn referenced_sources(&self) -> HashSet<ImageSrc> {
        self.history
            .sources()
            .chain(self.pending.iter().map(|l| &l.src))
            .cloned()
            .collect()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ─── Image adds ──────────────────────────────────────────────────────

    /// Register an image to be added once its natural size is known.
    pub fn request_add(&mut self, src: ImageSrc, placement: Placement, now_ms: u64) -> LoadToken {
        let token = LoadToken(self.next_token);
        self.next_token += 1;
        log::debug!("request_add {token}: {src} as {placement:?}");
        self.pending.push(PendingLoad {
            token,
            src,
            placement,
            requested_at_ms: now_ms,
        });
        token
    }

    pub fn add_product(&mut self, src: ImageSrc, now_ms: u64) -> LoadToken {
        self.request_add(src, Placement::Product, now_ms)
    }

    pub fn add_prop(&mut self, src: ImageSrc, now_ms: u64) -> LoadToken {
        self.request_add(src, Placement::Prop, now_ms)
    }

    /// Complete a load and add its frame. Returns the new frame's id.
    pub fn resolve_load(
        &mut self,
        token: LoadToken,
        natural: Dimensions,
    ) -> Result<FrameId, EditorError> {
        let load = self.take_pending(token)?;
        let id = FrameId::fresh();
        let op = SceneOp::AddFrame {
            id,
            src: load.src,
            natural,
            placement: load.placement,
        };
        self.history.apply(&op)?;
        Ok(id)
    }

    /// Abandon a load the embedder could not decode. Returns the error to
    /// surface to the user.
    pub fn fail_load(&mut self, token: LoadToken, reason: &str) -> EditorError {
        match self.take_pending(token) {
            Ok(load) => {
                log::warn!("load {token} failed: {reason}");
                EditorError::AssetLoad {
                    src: load.src.to_string(),
                    reason: reason.to_string(),
                }
            }
            Err(e) => e,
        }
    }

    /// Drop every load older than the timeout, reporting each one.
    pub fn expire_loads(&mut self, now_ms: u64) -> Vec<EditorError> {
        let timeout = self.load_timeout_ms;
        let mut expired = Vec::new();
        self.pending.retain(|load| {
            if now_ms.saturating_sub(load.requested_at_ms) >= timeout {
                log::warn!("load {} timed out", load.token);
                expired.push(EditorError::AssetLoad {
                    src: load.src.to_string(),
                    reason: format!("timed out after {}s", timeout / 1000),
                });
                false
            } else {
                true
            }
        });
        expired
    }

    fn take_pending(&mut self, token: LoadToken) -> Result<PendingLoad, EditorError> {
        let idx = self
            .pending
            .iter()
            .position(|l| l.token == token)
            .ok_or(EditorError::UnknownLoad(token))?;
        Ok(self.pending.remove(idx))
    }

    // ─── Backgrounds ─────────────────────────────────────────────────────

    /// Swap the stage background, keeping everything else.
    pub fn set_background(&mut self, src: ImageSrc) -> Result<(), EditorError> {
        self.commit(SceneOp::AddOrReplaceBackground { src })
    }

    /// Replace the whole scene with a generated background.
    pub fn apply_generated_background(&mut self, src: ImageSrc) -> Result<(), EditorError> {
        self.commit(SceneOp::ReplaceSceneWithBackground { src })
    }

    // ─── Selection and controls ──────────────────────────────────────────

    pub fn select(&mut self, id: Option<FrameId>) {
        self.history.select(id);
    }

    pub fn selected(&self) -> Option<FrameId> {
        self.scene().selected().map(|f| f.id)
    }

    /// Run a control-cluster action on the selected frame.
    ///
    /// Returns `false` when nothing is selected.
    pub fn control(&mut self, action: ControlAction) -> Result<bool, EditorError> {
        let Some(id) = self.selected() else {
            return Ok(false);
        };
        let op = match action {
            ControlAction::BringToFront => SceneOp::BringToFront { id },
            ControlAction::SendToBack => SceneOp::SendToBack { id },
            ControlAction::Duplicate => SceneOp::DuplicateFrame { id },
            ControlAction::Delete => SceneOp::DeleteFrame { id },
        };
        self.commit(op)?;
        Ok(true)
    }

    /// Where to draw the control cluster, if a frame is selected.
    pub fn controls(&self) -> Option<ControlCluster> {
        let frame = self.scene().selected().filter(|f| !f.is_background)?;
        let bounds = self.live_bounds(frame.id).unwrap_or_else(|| frame.bounds());
        place_controls(&bounds, self.stage)
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> Option<String> {
        self.gesture.reset();
        self.history.undo()
    }

    pub fn redo(&mut self) -> Option<String> {
        self.gesture.reset();
        self.history.redo()
    }

    fn commit(&mut self, op: SceneOp) -> Result<(), EditorError> {
        self.history.apply(&op)?;
        Ok(())
    }

    // ─── Stage ───────────────────────────────────────────────────────────

    pub fn set_preset(&mut self, preset_id: &str) -> Result<(), EditorError> {
        let preset = CanvasPreset::by_id(preset_id)
            .ok_or_else(|| EditorError::UnknownPreset(preset_id.to_string()))?;
        self.preset = preset;
        self.refit();
        Ok(())
    }

    /// Record the space available to the stage and refit it.
    pub fn set_container_size(&mut self, width: f32, height: f32) {
        self.container = StageSize::new(width, height);
        self.refit();
    }

    fn refit(&mut self) {
        if let Some(stage) = fit_stage(self.container, &self.preset) {
            self.stage = stage;
        }
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    /// Route a pointer event. Returns whether the stage needs a redraw.
    pub fn pointer(&mut self, event: InputEvent) -> Result<bool, EditorError> {
        let outcome = self.gesture.handle(&event, self.history.scene());
        match outcome {
            GestureOutcome::None => Ok(false),
            GestureOutcome::Select(id) => {
                self.history.select(id);
                Ok(true)
            }
            GestureOutcome::Preview { .. } | GestureOutcome::Cancelled => Ok(true),
            GestureOutcome::Commit(op) => {
                self.commit(op)?;
                Ok(true)
            }
        }
    }

    /// CSS cursor for a hover position.
    pub fn cursor_at(&self, x: f32, y: f32) -> &'static str {
        if let Some(frame) = self.scene().selected().filter(|f| !f.is_background)
            && let Some(handle) = handle_at(&frame.bounds(), x, y)
        {
            return handle.cursor();
        }
        if hit_test(self.scene(), x, y).is_some() {
            "move"
        } else {
            "default"
        }
    }

    fn live_bounds(&self, id: FrameId) -> Option<Bounds> {
        self.gesture
            .preview()
            .filter(|(preview_id, _)| *preview_id == id)
            .map(|(_, bounds)| bounds)
    }

    /// Paint list for the stage, with any in-flight gesture applied.
    pub fn draw_list(&self) -> Vec<DrawItem> {
        let mut items = draw_list(self.scene(), self.stage);
        if let Some((id, bounds)) = self.gesture.preview()
            && let Some(item) = items.iter_mut().find(|i| i.id == id)
        {
            item.bounds = bounds;
        }
        items
    }

    // ─── Export ──────────────────────────────────────────────────────────

    /// PNG of the stage at download density, without any UI chrome.
    pub fn export_png(&self, images: &impl ImageProvider) -> Result<Vec<u8>, EditorError> {
        let image = compose(self.scene(), self.stage, DOWNLOAD_PIXEL_RATIO, images)?;
        Ok(export_png(&image)?)
    }

    /// PNG of the stage at 1×, used as the generation reference.
    pub fn reference_png(&self, images: &impl ImageProvider) -> Result<Vec<u8>, EditorError> {
        let image = compose(self.scene(), self.stage, REFERENCE_PIXEL_RATIO, images)?;
        Ok(export_png(&image)?)
    }

    pub fn export_file_name(&self) -> String {
        export_file_name(self.preset.id)
    }
}
