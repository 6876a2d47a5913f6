/// Convenience result type for raster export.
pub type RenderResult<T> = Result<T, RenderError>;

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// The stage has not been laid out yet, or the pixel ratio collapses it.
    #[error("cannot export an empty stage ({width}x{height} px)")]
    EmptyStage { width: u32, height: u32 },

    /// PNG encoding failed.
    #[error(transparent)]
    Image(#[from] image::ImageError),
}
