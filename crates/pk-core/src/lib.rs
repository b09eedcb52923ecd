// ABOUTME: Shared types and configuration for panekeep.
// ABOUTME: Defines pane geometry, the split tree, config and session files.

pub mod config;
pub mod geometry;
pub mod session;
pub mod tree;

pub use config::{Config, ConfigError};
pub use geometry::{Extent, Geometry, Orientation, PaneId, Rect};
pub use session::{SessionData, SessionError};
pub use tree::LayoutTree;
