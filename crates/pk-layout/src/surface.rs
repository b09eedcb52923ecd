// ABOUTME: Capabilities a host window system provides to capture and restore.
// ABOUTME: Editors and multiplexers implement this over their own window commands.

use pk_core::{Extent, Geometry, Orientation, PaneId};

/// Focus movement between adjacent panes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Direction from one child of a split to the next
    pub fn forward(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Horizontal => Direction::Down,
            Orientation::Vertical => Direction::Right,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("Pane {0} no longer exists")]
    NoSuchPane(PaneId),

    #[error("Content '{0}' no longer exists")]
    NoSuchContent(String),

    #[error("Pane {pane} has no room for a {orientation:?} split")]
    NoRoom {
        pane: PaneId,
        orientation: Orientation,
    },
}

/// A live, mutable workspace of panes.
///
/// Calls are synchronous and authoritative. View state (content, cursor,
/// scroll) is window-local and can only be read from the focused pane.
pub trait WindowSurface {
    /// Split the focused pane. The new pane is placed above (`Horizontal`) or
    /// to the left (`Vertical`) and receives focus.
    fn open_split(&mut self, orientation: Orientation) -> Result<(), SurfaceError>;

    /// Focus the neighbouring pane in `direction`, if there is one
    fn move_focus(&mut self, direction: Direction) -> Result<(), SurfaceError>;

    fn resize_current(&mut self, height: Option<u32>, width: Option<u32>) -> Result<(), SurfaceError>;

    fn focus_pane(&mut self, pane: PaneId) -> Result<(), SurfaceError>;

    /// Close every pane except the focused one
    fn close_others(&mut self) -> Result<(), SurfaceError>;

    fn set_content(&mut self, content: &str) -> Result<(), SurfaceError>;

    fn set_cursor_line(&mut self, line: u32) -> Result<(), SurfaceError>;

    /// Scroll so the cursor line sits in the middle of the viewport
    fn center_viewport(&mut self) -> Result<(), SurfaceError>;

    fn current_pane_id(&self) -> PaneId;

    fn previous_pane_id(&self) -> Option<PaneId>;

    fn pane_ids(&self) -> Vec<PaneId>;

    fn pane_count(&self) -> usize {
        self.pane_ids().len()
    }

    fn current_content(&self) -> String;

    fn current_cursor_line(&self) -> u32;

    /// Buffer line shown in the middle row of the focused pane
    fn current_center_line(&self) -> u32;

    fn pane_geometry(&self, pane: PaneId) -> Result<Geometry, SurfaceError>;

    /// Pane area, excluding rows reserved for status and command lines
    fn workspace_extent(&self) -> Extent;
}
