// ABOUTME: Proportional rescaling of a split tree to a new workspace extent.
// ABOUTME: Far edges stay pinned to the far edge of the new extent.

use pk_core::{Extent, LayoutTree, Rect};

/// Remap every leaf of `tree` from `old` to `new` extent.
///
/// Returns a new tree; `tree` is left as captured.
pub fn scale(tree: &LayoutTree, old: Extent, new: Extent) -> LayoutTree {
    if old == new {
        return tree.clone();
    }

    tracing::debug!(%old, %new, "scaling layout");

    tree.map_leaves(&mut |rect| Rect {
        left: scale_coord(rect.left, old.cols, new.cols),
        right: scale_coord(rect.right, old.cols, new.cols),
        top: scale_coord(rect.top, old.rows, new.rows),
        bottom: scale_coord(rect.bottom, old.rows, new.rows),
        ..rect.clone()
    })
}

/// Scale `tree` from the extent it was captured at
pub fn scale_to(tree: &LayoutTree, new: Extent) -> LayoutTree {
    scale(tree, tree.extent(), new)
}

fn scale_coord(value: u32, old_max: u32, new_max: u32) -> u32 {
    if value >= old_max || old_max == 0 {
        return new_max;
    }
    let scaled = u64::from(value.saturating_sub(1)) * u64::from(new_max) / u64::from(old_max);
    scaled as u32 + 1
}
