/// Failures from the external collaborators the editor talks to.
#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    #[error("background removal failed: {0}")]
    BackgroundRemoval(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error("upload failed: {0}")]
    Upload(String),

    /// The proxy answered, but not with something we can use.
    #[error("generation request rejected ({code}): {message}")]
    Rejected { code: i64, message: String },

    #[error("generate response missing taskId")]
    MissingTaskId,

    /// The task reached its `fail` state.
    #[error("generation failed: {0}")]
    GenerationFailed(String),

    #[error("generation timed out after {attempts} status checks")]
    TimedOut { attempts: u32 },

    #[error("generation finished without result URLs")]
    NoResults,

    /// Network or HTTP-level failure reported by the transport.
    #[error("transport error: {0}")]
    Transport(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("asset library unavailable: {0}")]
    Library(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
