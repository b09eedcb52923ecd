// ABOUTME: Size-independent split tree describing how panes tile a workspace.
// ABOUTME: Leaves carry captured panes; splits carry ordered full-span children.

use serde::{Deserialize, Serialize};

use crate::{Extent, Geometry, Orientation, Rect};

/// Hierarchical pane layout.
///
/// A `Split` always has at least two children. They partition the split's
/// bounding rectangle along lines perpendicular to its orientation, in
/// ascending coordinate order, and orientation alternates with depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutTree {
    Leaf(Rect),
    Split {
        orientation: Orientation,
        children: Vec<LayoutTree>,
    },
}

impl LayoutTree {
    pub fn split(orientation: Orientation, children: Vec<LayoutTree>) -> Self {
        LayoutTree::Split {
            orientation,
            children,
        }
    }

    /// All leaf rectangles, depth-first, in child order
    pub fn leaves(&self) -> Vec<&Rect> {
        let mut out = Vec::new();
        collect_leaves(self, &mut out);
        out
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            LayoutTree::Leaf(_) => 1,
            LayoutTree::Split { children, .. } => children.iter().map(|c| c.leaf_count()).sum(),
        }
    }

    /// Smallest rectangle enclosing every leaf
    pub fn bounds(&self) -> Geometry {
        match self {
            LayoutTree::Leaf(rect) => rect.geometry(),
            LayoutTree::Split { children, .. } => children
                .iter()
                .map(|c| c.bounds())
                .reduce(|a, b| Geometry {
                    left: a.left.min(b.left),
                    right: a.right.max(b.right),
                    top: a.top.min(b.top),
                    bottom: a.bottom.max(b.bottom),
                })
                .unwrap_or(Geometry {
                    left: 1,
                    right: 0,
                    top: 1,
                    bottom: 0,
                }),
        }
    }

    /// Workspace extent the tree was captured at
    pub fn extent(&self) -> Extent {
        let bounds = self.bounds();
        Extent::new(bounds.bottom, bounds.right)
    }

    /// Build a new tree of the same shape with every leaf passed through `f`
    pub fn map_leaves<F>(&self, f: &mut F) -> LayoutTree
    where
        F: FnMut(&Rect) -> Rect,
    {
        match self {
            LayoutTree::Leaf(rect) => LayoutTree::Leaf(f(rect)),
            LayoutTree::Split {
                orientation,
                children,
            } => LayoutTree::Split {
                orientation: *orientation,
                children: children.iter().map(|c| c.map_leaves(f)).collect(),
            },
        }
    }
}

fn collect_leaves<'a>(node: &'a LayoutTree, out: &mut Vec<&'a Rect>) {
    match node {
        LayoutTree::Leaf(rect) => out.push(rect),
        LayoutTree::Split { children, .. } => {
            for child in children {
                collect_leaves(child, out);
            }
        }
    }
}
