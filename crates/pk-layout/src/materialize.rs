// ABOUTME: Replays a split tree against a window surface.
// ABOUTME: Opens and sizes one pane per leaf, top-down, left to right.

use pk_core::{LayoutTree, Orientation, PaneId};

use crate::surface::{Direction, SurfaceError, WindowSurface};

/// Build the panes of `tree` starting from the focused pane, which must span
/// the whole workspace. Returns the pane created for each leaf, in leaf order.
pub fn materialize<S>(tree: &LayoutTree, surface: &mut S) -> Result<Vec<PaneId>, SurfaceError>
where
    S: WindowSurface + ?Sized,
{
    let mut panes = Vec::with_capacity(tree.leaf_count());
    fill(tree, surface, &mut panes)?;
    tracing::debug!(panes = panes.len(), "materialized layout");
    Ok(panes)
}

fn fill<S>(node: &LayoutTree, surface: &mut S, panes: &mut Vec<PaneId>) -> Result<(), SurfaceError>
where
    S: WindowSurface + ?Sized,
{
    let (orientation, children) = match node {
        LayoutTree::Leaf(_) => {
            panes.push(surface.current_pane_id());
            return Ok(());
        }
        LayoutTree::Split {
            orientation,
            children,
        } => (*orientation, children),
    };

    let Some((last, rest)) = children.split_last() else {
        return Ok(());
    };

    for child in rest {
        surface.open_split(orientation)?;
        // The cross-axis size is owned by the enclosing region
        let planned = child.bounds();
        match orientation {
            Orientation::Horizontal => surface.resize_current(Some(planned.height()), None)?,
            Orientation::Vertical => surface.resize_current(None, Some(planned.width()))?,
        }
        fill(child, surface, panes)?;
        surface.move_focus(Direction::forward(orientation))?;
    }

    // Remaining space goes to the last child
    fill(last, surface, panes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySurface;
    use pk_core::{Extent, Geometry, Rect};

    fn leaf(id: u64, left: u32, right: u32, top: u32, bottom: u32) -> LayoutTree {
        LayoutTree::Leaf(Rect::new(PaneId(id), left, right, top, bottom))
    }

    fn geometry_of(surface: &MemorySurface, panes: &[PaneId]) -> Vec<Geometry> {
        panes
            .iter()
            .map(|p| surface.pane_geometry(*p).unwrap())
            .collect()
    }

    #[test]
    fn leaf_keeps_the_single_pane() {
        let mut surface = MemorySurface::new(Extent::new(24, 80));
        let start = surface.current_pane_id();
        let panes = materialize(&leaf(9, 1, 80, 1, 24), &mut surface).unwrap();
        assert_eq!(panes, vec![start]);
        assert_eq!(surface.pane_count(), 1);
    }

    #[test]
    fn nested_tree_reproduces_geometry() {
        let tree = LayoutTree::split(
            Orientation::Horizontal,
            vec![
                leaf(1, 1, 80, 1, 10),
                LayoutTree::split(
                    Orientation::Vertical,
                    vec![leaf(2, 1, 40, 12, 24), leaf(3, 42, 80, 12, 24)],
                ),
            ],
        );
        let mut surface = MemorySurface::new(Extent::new(24, 80));
        let panes = materialize(&tree, &mut surface).unwrap();

        assert_eq!(panes.len(), 3);
        let expected: Vec<_> = tree.leaves().iter().map(|r| r.geometry()).collect();
        assert_eq!(geometry_of(&surface, &panes), expected);
    }

    #[test]
    fn split_child_before_last_is_filled_in_place() {
        let tree = LayoutTree::split(
            Orientation::Vertical,
            vec![
                LayoutTree::split(
                    Orientation::Horizontal,
                    vec![leaf(1, 1, 30, 1, 8), leaf(2, 1, 30, 10, 24)],
                ),
                leaf(3, 32, 55, 1, 24),
                LayoutTree::split(
                    Orientation::Horizontal,
                    vec![leaf(4, 57, 80, 1, 15), leaf(5, 57, 80, 17, 24)],
                ),
            ],
        );
        let mut surface = MemorySurface::new(Extent::new(24, 80));
        let panes = materialize(&tree, &mut surface).unwrap();

        let expected: Vec<_> = tree.leaves().iter().map(|r| r.geometry()).collect();
        assert_eq!(geometry_of(&surface, &panes), expected);
    }

    #[test]
    fn too_small_workspace_fails() {
        let tree = LayoutTree::split(
            Orientation::Horizontal,
            vec![leaf(1, 1, 80, 1, 1), leaf(2, 1, 80, 3, 3)],
        );
        let mut surface = MemorySurface::new(Extent::new(2, 80));
        assert!(matches!(
            materialize(&tree, &mut surface),
            Err(SurfaceError::NoRoom { .. })
        ));
    }
}
