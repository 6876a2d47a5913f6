pub mod error;
pub mod gesture;
pub mod history;
pub mod input;
pub mod session;

pub use error::EditorError;
pub use gesture::{FrameGesture, GestureOutcome, GestureState};
pub use history::History;
pub use input::InputEvent;
pub use session::{EditorSession, LOAD_TIMEOUT_MS, LoadToken};
