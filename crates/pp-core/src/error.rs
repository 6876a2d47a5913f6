use crate::id::FrameId;

/// Reasons a scene operation refuses to produce a new scene.
///
/// A refused operation leaves the input scene untouched; callers treat
/// the error as "nothing happened".
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// No frame with this id exists in the scene.
    #[error("unknown frame {0}")]
    UnknownFrame(FrameId),

    /// Background frames fill the stage and cannot be moved, resized,
    /// duplicated or reordered.
    #[error("frame {0} is the background and cannot be transformed")]
    BackgroundLocked(FrameId),

    /// An image reported a zero natural width or height.
    #[error("image {src} has no pixels ({width}x{height})")]
    EmptyImage {
        src: String,
        width: u32,
        height: u32,
    },
}
