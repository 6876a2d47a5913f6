pub mod compose;
pub mod controls;
pub mod error;
pub mod hit;
pub mod order;
pub mod transform;

pub use compose::{ImageProvider, compose, export_file_name, export_png};
pub use controls::{ControlAction, ControlCluster, place_controls};
pub use error::RenderError;
pub use hit::{handle_at, hit_test};
pub use order::{DrawItem, draw_list};
pub use transform::{Handle, MIN_FRAME_SIZE, resize_with_handle};
