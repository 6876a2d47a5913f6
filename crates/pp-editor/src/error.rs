use pp_core::SceneError;
use pp_render::RenderError;

use crate::session::LoadToken;

/// Failures surfaced by the editor session.
///
/// None of these leave the scene or the history half-updated.
#[derive(thiserror::Error, Debug)]
pub enum EditorError {
    /// An image never produced a usable natural size: decode error,
    /// network error or timeout. Products and props report the same way.
    #[error("could not load {src}: {reason}")]
    AssetLoad { src: String, reason: String },

    /// A load result arrived for a request the session no longer tracks,
    /// usually because it already timed out.
    #[error("no pending image load for {0}")]
    UnknownLoad(LoadToken),

    #[error("unknown canvas preset '{0}'")]
    UnknownPreset(String),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
