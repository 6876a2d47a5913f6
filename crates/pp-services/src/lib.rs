pub mod assets;
pub mod chat;
pub mod credits;
pub mod cutout;
pub mod error;
pub mod generation;
pub mod wire;

pub use assets::{AssetEntry, AssetLibrary, AssetPage, StaticLibrary};
pub use chat::{ChatMessage, ChatSession, GenerationOutcome, Sender};
pub use credits::{CreditBalance, CreditGate, Unmetered};
pub use cutout::{BackgroundRemover, Cutout, CutoutParams, crop_to_opaque, cut_out_product};
pub use error::{ServiceError, ServiceResult};
pub use generation::{
    CancelHandle, CancelSignal, GenerationRequest, GenerationService, PollConfig, PollOutcome,
    TaskId, TaskStatus, cancel_pair, candidates, poll_until_done,
};
