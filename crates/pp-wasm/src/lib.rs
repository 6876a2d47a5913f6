//! WASM bridge for PP — exposes the editor session to the browser.
//!
//! Compiled via `wasm-pack build --target web`. The page owns image
//! decoding and the HTML control cluster; everything that decides what
//! the scene looks like runs here.

mod render2d;

use pp_core::model::{Dimensions, ImageSrc};
use pp_core::{CanvasPreset, FrameId, Placement, PresetCategory};
use pp_editor::{EditorError, EditorSession, InputEvent, LoadToken};
use pp_render::ControlAction;
use serde_json::json;
use std::collections::HashMap;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

/// The main WASM-facing editor controller.
///
/// Holds the session and the decoded images the renderer draws from. All
/// interaction from the page goes through this struct.
#[wasm_bindgen]
pub struct PhotoEditor {
    session: EditorSession,
    images: HashMap<ImageSrc, HtmlImageElement>,
}

#[wasm_bindgen]
impl PhotoEditor {
    /// Create an editor for a stage container of the given size.
    #[wasm_bindgen(constructor)]
    pub fn new(container_width: f32, container_height: f32) -> Self {
        console_error_panic_hook_setup();
        let mut session = EditorSession::new();
        session.set_container_size(container_width, container_height);
        Self {
            session,
            images: HashMap::new(),
        }
    }

    // ─── Stage ───────────────────────────────────────────────────────────

    pub fn set_container_size(&mut self, width: f32, height: f32) {
        self.session.set_container_size(width, height);
    }

    /// Switch canvas preset. Returns `false` for an unknown id.
    pub fn set_preset(&mut self, preset_id: &str) -> bool {
        match self.session.set_preset(preset_id) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("{e}");
                false
            }
        }
    }

    /// `{"id", "label", "width", "height", "aspectRatio", "stage": {...}}`
    pub fn get_preset_json(&self) -> String {
        let p = self.session.preset();
        json!({
            "id": p.id,
            "label": p.label,
            "width": p.width,
            "height": p.height,
            "aspectRatio": p.aspect_ratio(),
            "stage": self.session.stage(),
        })
        .to_string()
    }

    pub fn export_file_name(&self) -> String {
        self.session.export_file_name()
    }

    // ─── Image adds ──────────────────────────────────────────────────────

    /// Start adding an image. `kind` is `"product"` or `"prop"`; anything
    /// else is added as a prop. Returns a token to pass back to
    /// `resolve_load` / `fail_load`.
    pub fn request_add(&mut self, src: &str, kind: &str, now_ms: f64) -> f64 {
        let placement = placement_for(kind);
        self.session
            .request_add(ImageSrc::new(src), placement, now_ms as u64)
            .raw() as f64
    }

    /// Finish an add once the page knows the natural size. Returns
    /// `{"ok":true,"id":...}` or `{"ok":false,"error":...}`.
    pub fn resolve_load(&mut self, token: f64, natural_width: u32, natural_height: u32) -> String {
        let result = self.session.resolve_load(
            LoadToken::from_raw(token as u64),
            Dimensions::new(natural_width, natural_height),
        );
        match result {
            Ok(id) => json!({ "ok": true, "id": id.as_str() }).to_string(),
            Err(e) => error_json(&e),
        }
    }

    /// Report a decode/network failure. Returns the message to show.
    pub fn fail_load(&mut self, token: f64, reason: &str) -> String {
        self.session
            .fail_load(LoadToken::from_raw(token as u64), reason)
            .to_string()
    }

    /// Time out stale loads. Returns one message per expired load.
    pub fn expire_loads(&mut self, now_ms: f64) -> js_sys::Array {
        self.session
            .expire_loads(now_ms as u64)
            .iter()
            .map(|e| JsValue::from_str(&e.to_string()))
            .collect()
    }

    /// Make a decoded image available to the renderer.
    pub fn register_image(&mut self, src: &str, image: HtmlImageElement) {
        self.images.insert(ImageSrc::new(src), image);
    }

    pub fn unregister_image(&mut self, src: &str) -> bool {
        self.images.remove(&ImageSrc::new(src)).is_some()
    }

    /// Drop decoded images that no scene, history step or pending load
    /// refers to anymore. Returns how many were released.
    pub fn prune_images(&mut self) -> usize {
        let live = self.session.referenced_sources();
        let before = self.images.len();
        self.images.retain(|src, _| live.contains(src));
        let released = before - self.images.len();
        if released > 0 {
            log::debug!("released {released} unreferenced images");
        }
        released
    }

    // ─── Scene edits ─────────────────────────────────────────────────────

    pub fn set_background(&mut self, src: &str) -> String {
        ok_json(self.session.set_background(ImageSrc::new(src)))
    }

    pub fn apply_generated_background(&mut self, src: &str) -> String {
        ok_json(self.session.apply_generated_background(ImageSrc::new(src)))
    }

    /// Run a control-cluster button: `front`, `back`, `duplicate`, `delete`.
    pub fn control(&mut self, action: &str) -> bool {
        let Some(action) = ControlAction::parse(action) else {
            return false;
        };
        match self.session.control(action) {
            Ok(changed) => changed,
            Err(e) => {
                log::warn!("control {}: {e}", action.name());
                false
            }
        }
    }

    pub fn select_by_id(&mut self, frame_id: &str) {
        let id = (!frame_id.is_empty()).then(|| FrameId::intern(frame_id));
        self.session.select(id);
    }

    pub fn get_selected_id(&self) -> String {
        self.session
            .selected()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    /// Undo. Returns the undone step's label, or `""`.
    pub fn undo(&mut self) -> String {
        self.session.undo().unwrap_or_default()
    }

    /// Redo. Returns the redone step's label, or `""`.
    pub fn redo(&mut self) -> String {
        self.session.redo().unwrap_or_default()
    }

    pub fn can_undo(&self) -> bool {
        self.session.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.session.can_redo()
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    /// Handle pointer down. Returns true if the stage needs a redraw.
    pub fn handle_pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.pointer(InputEvent::from_pointer_down(x, y))
    }

    pub fn handle_pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.pointer(InputEvent::from_pointer_move(x, y))
    }

    pub fn handle_pointer_up(&mut self, x: f32, y: f32) -> bool {
        self.pointer(InputEvent::from_pointer_up(x, y))
    }

    pub fn handle_pointer_cancel(&mut self) -> bool {
        self.pointer(InputEvent::PointerCancel)
    }

    pub fn cursor_at(&self, x: f32, y: f32) -> String {
        self.session.cursor_at(x, y).to_string()
    }

    // ─── Read-out ────────────────────────────────────────────────────────

    pub fn get_scene_json(&self) -> String {
        serde_json::to_string(self.session.scene()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Control cluster placement, or `null` when nothing is selected.
    pub fn get_controls_json(&self) -> String {
        match self.session.controls() {
            Some(c) => json!({
                "centerX": c.center_x,
                "width": c.width,
                "top": c.top,
                "above": c.above,
            })
            .to_string(),
            None => "null".to_string(),
        }
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    /// Draw the live stage, selection chrome included.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        render2d::render_stage(
            ctx,
            &self.session.draw_list(),
            self.session.stage(),
            &self.images,
            &render2d::CanvasTheme::default(),
            true,
            1.0,
        );
    }

    /// Draw the stage for export: content only, scaled by `pixel_ratio`
    /// (2 for downloads, 1 for the generation reference).
    pub fn render_export(&self, ctx: &CanvasRenderingContext2d, pixel_ratio: f64) {
        render2d::render_stage(
            ctx,
            &pp_render::draw_list(self.session.scene(), self.session.stage()),
            self.session.stage(),
            &self.images,
            &render2d::CanvasTheme::default(),
            false,
            pixel_ratio,
        );
    }
}

impl PhotoEditor {
    fn pointer(&mut self, event: InputEvent) -> bool {
        match self.session.pointer(event) {
            Ok(redraw) => redraw,
            Err(e) => {
                log::warn!("pointer: {e}");
                true
            }
        }
    }
}

fn placement_for(kind: &str) -> Placement {
    match kind {
        "product" => Placement::Product,
        "prop" => Placement::Prop,
        other => {
            log::warn!("unknown image kind '{other}', adding as prop");
            Placement::Prop
        }
    }
}

fn ok_json(result: Result<(), EditorError>) -> String {
    match result {
        Ok(()) => json!({ "ok": true }).to_string(),
        Err(e) => error_json(&e),
    }
}

fn error_json(e: &EditorError) -> String {
    json!({ "ok": false, "error": e.to_string() }).to_string()
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("PP WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone catalogue functions (no editor needed) ───────────────────

/// All canvas presets grouped by category, as JSON.
#[wasm_bindgen]
pub fn presets_json() -> String {
    let groups: Vec<serde_json::Value> = PresetCategory::ALL
        .iter()
        .map(|&category| {
            json!({
                "category": category.label(),
                "presets": CanvasPreset::in_category(category).collect::<Vec<_>>(),
            })
        })
        .collect();
    serde_json::Value::Array(groups).to_string()
}
