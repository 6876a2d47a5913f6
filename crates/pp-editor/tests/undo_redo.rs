//! Integration tests: scene history through the editor session (pp-editor).
//!
//! Drives `EditorSession` the way the browser bridge does and checks that
//! undo/redo restore exact prior scenes across crate boundaries.

use pp_core::model::{Dimensions, Scene};
use pp_core::FrameId;
use pp_editor::{EditorSession, History, InputEvent};
use pp_render::ControlAction;
use pretty_assertions::assert_eq;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn session() -> EditorSession {
    init_logging();
    let mut s = EditorSession::new();
    s.set_container_size(600.0, 600.0);
    s
}

fn add(s: &mut EditorSession, name: &str, w: u32, h: u32) -> FrameId {
    let token = s.add_prop(format!("blob:{name}").into(), 0);
    s.resolve_load(token, Dimensions::new(w, h)).unwrap()
}

// ─── Inverse law ────────────────────────────────────────────────────────

#[test]
fn undo_then_redo_is_identity() {
    let mut s = session();
    let a = add(&mut s, "a", 100, 100);
    add(&mut s, "b", 100, 100);
    s.select(Some(a));
    s.control(ControlAction::Duplicate).unwrap();
    s.control(ControlAction::SendToBack).unwrap();

    let after: Scene = s.scene().clone();
    for _ in 0..4 {
        assert!(s.undo().is_some());
    }
    assert!(s.scene().is_empty());
    for _ in 0..4 {
        assert!(s.redo().is_some());
    }
    assert_eq!(s.scene(), &after);
}

#[test]
fn undo_descriptions_in_reverse_order() {
    let mut s = session();
    let a = add(&mut s, "c", 100, 100);
    s.select(Some(a));
    s.control(ControlAction::BringToFront).unwrap();
    s.set_background("https://cdn/bg.jpg".into()).unwrap();

    assert_eq!(s.undo().as_deref(), Some("Set background"));
    assert_eq!(s.undo().as_deref(), Some("Bring to front"));
    assert_eq!(s.undo().as_deref(), Some("Add prop"));
    assert_eq!(s.undo(), None);
}

// ─── Redo invalidation ──────────────────────────────────────────────────

#[test]
fn new_action_clears_redo() {
    let mut s = session();
    add(&mut s, "d", 100, 100);
    add(&mut s, "e", 100, 100);
    s.undo();
    assert!(s.can_redo());
    add(&mut s, "f", 100, 100);
    assert!(!s.can_redo());
    assert_eq!(s.redo(), None);
}

// ─── Gestures ───────────────────────────────────────────────────────────

#[test]
fn drag_is_one_undo_step() {
    let mut s = session();
    let a = add(&mut s, "g", 100, 100);
    let depth = s.history().undo_depth();

    s.pointer(InputEvent::from_pointer_down(200.0, 200.0)).unwrap();
    for step in 1..=10 {
        let d = step as f32 * 5.0;
        s.pointer(InputEvent::from_pointer_move(200.0 + d, 200.0 + d)).unwrap();
    }
    // Live preview moves the drawn frame but not the scene.
    let drawn = s.draw_list().into_iter().find(|i| i.id == a).unwrap();
    assert_eq!((drawn.bounds.x, drawn.bounds.y), (230.0, 210.0));
    assert_eq!(s.scene().get(a).unwrap().x, 180.0);

    s.pointer(InputEvent::from_pointer_up(250.0, 250.0)).unwrap();
    assert_eq!(s.history().undo_depth(), depth + 1);
    let f = s.scene().get(a).unwrap();
    assert_eq!((f.x, f.y), (230.0, 210.0));
    assert!(f.selected);

    assert_eq!(s.undo().as_deref(), Some("Transform frame"));
    let f = s.scene().get(a).unwrap();
    assert_eq!((f.x, f.y), (180.0, 160.0));
}

#[test]
fn selection_changes_are_not_undoable() {
    let mut s = session();
    let a = add(&mut s, "h", 100, 100);
    let depth = s.history().undo_depth();
    s.pointer(InputEvent::from_pointer_down(200.0, 200.0)).unwrap();
    s.pointer(InputEvent::from_pointer_up(200.0, 200.0)).unwrap();
    assert_eq!(s.selected(), Some(a));
    s.pointer(InputEvent::from_pointer_down(5.0, 5.0)).unwrap();
    assert_eq!(s.selected(), None);
    assert_eq!(s.history().undo_depth(), depth);
}

// ─── Backgrounds ────────────────────────────────────────────────────────

#[test]
fn generated_background_undo_restores_everything() {
    let mut s = session();
    add(&mut s, "i", 100, 100);
    add(&mut s, "j", 100, 100);
    add(&mut s, "k", 100, 100);
    s.set_background("https://cdn/stock.jpg".into()).unwrap();
    let before = s.scene().clone();
    assert_eq!(before.len(), 4);

    s.apply_generated_background("https://cdn/generated.png".into())
        .unwrap();
    assert_eq!(s.scene().len(), 1);
    let bg = s.scene().background().unwrap();
    assert_eq!(bg.z_index, 0);
    assert_eq!(bg.src.as_str(), "https://cdn/generated.png");

    s.undo();
    assert_eq!(s.scene(), &before);
}

#[test]
fn deleting_background_is_undoable() {
    let mut s = session();
    s.set_background("https://cdn/bg.jpg".into()).unwrap();
    let bg = s.scene().background().unwrap().id;
    let mut h = History::from_scene(s.scene().clone());
    h.apply(&pp_core::SceneOp::DeleteFrame { id: bg }).unwrap();
    assert!(h.scene().background().is_none());
    h.undo();
    assert_eq!(h.scene().background().map(|f| f.id), Some(bg));
}
