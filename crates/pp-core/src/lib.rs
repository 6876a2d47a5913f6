pub mod error;
pub mod id;
pub mod layout;
pub mod model;
pub mod placement;
pub mod preset;
pub mod scene;

pub use error::SceneError;
pub use id::FrameId;
pub use layout::{StageSize, fit_stage};
pub use model::*;
pub use placement::Placement;
pub use preset::{CanvasPreset, PresetCategory};
pub use scene::{FramePatch, SceneOp};
