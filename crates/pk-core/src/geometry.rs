// ABOUTME: Pane geometry and identity types shared by capture and restore.
// ABOUTME: Coordinates are 1-based and inclusive, one cell per terminal column/row.

use serde::{Deserialize, Serialize};

/// Host pane identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaneId(pub u64);

impl std::fmt::Display for PaneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "%{}", self.0)
    }
}

/// Direction of the cut lines in a split.
///
/// `Horizontal` cuts stack children top to bottom, so its major axis is rows.
/// `Vertical` cuts place children left to right, so its major axis is columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// Usable size of a workspace in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extent {
    pub rows: u32,
    pub cols: u32,
}

impl Extent {
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }
}

impl std::fmt::Display for Extent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}

/// Raw pane bounds as reported by a host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Geometry {
    pub fn height(&self) -> u32 {
        self.bottom + 1 - self.top
    }

    pub fn width(&self) -> u32 {
        self.right + 1 - self.left
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A captured pane: where it sits and what it was showing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
    pub pane_id: PaneId,
    pub content_id: String,
    pub cursor_line: u32,
    pub center_line: u32,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_current: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_previous: bool,
}

impl Rect {
    /// A bare rectangle with no view state, mostly useful in tests and tooling
    pub fn new(pane_id: PaneId, left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
            pane_id,
            content_id: String::new(),
            cursor_line: 1,
            center_line: 1,
            is_current: false,
            is_previous: false,
        }
    }

    pub fn geometry(&self) -> Geometry {
        Geometry {
            left: self.left,
            right: self.right,
            top: self.top,
            bottom: self.bottom,
        }
    }

    pub fn height(&self) -> u32 {
        self.geometry().height()
    }

    pub fn width(&self) -> u32 {
        self.geometry().width()
    }

    /// First coordinate on the major axis of `axis`
    pub fn leading(&self, axis: Orientation) -> u32 {
        match axis {
            Orientation::Horizontal => self.top,
            Orientation::Vertical => self.left,
        }
    }

    /// Last coordinate on the major axis of `axis`
    pub fn trailing(&self, axis: Orientation) -> u32 {
        match axis {
            Orientation::Horizontal => self.bottom,
            Orientation::Vertical => self.right,
        }
    }

    /// Number of cells covered on the major axis of `axis`
    pub fn span(&self, axis: Orientation) -> u32 {
        self.trailing(axis) + 1 - self.leading(axis)
    }
}
