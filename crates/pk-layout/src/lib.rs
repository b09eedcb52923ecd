// ABOUTME: Pane layout capture and restoration.
// ABOUTME: Infers a split tree from pane rectangles and replays it on a window surface.

pub mod bounds;
mod error;
pub mod infer;
pub mod materialize;
pub mod memory;
pub mod scale;
pub mod surface;
pub mod views;
mod workspace;

pub use bounds::{analyze, Bounds};
pub use error::LayoutError;
pub use infer::{infer, infer_layout};
pub use materialize::materialize;
pub use memory::{MemorySurface, PaneView};
pub use scale::{scale, scale_to};
pub use surface::{Direction, SurfaceError, WindowSurface};
pub use views::restore_views;
pub use workspace::{CaptureScope, RestoreReport, SavedFocus, Workspace};
