// ABOUTME: Recovers a canonical split tree from a flat set of pane rectangles.
// ABOUTME: Only lines that bisect the whole region are accepted as cuts.

use pk_core::{LayoutTree, Orientation, Rect};

use crate::bounds::{analyze, Bounds};
use crate::LayoutError;

/// Infer the split tree of a captured workspace.
///
/// Rows are tried first at the top level, so a grid that can be cut both
/// ways comes out as a stack of rows.
pub fn infer_layout(rects: &[Rect]) -> Result<LayoutTree, LayoutError> {
    infer(Orientation::Horizontal, rects)
}

/// Infer the split tree of a region, cutting along `axis` first.
///
/// # Algorithm
///
/// 1. A single rectangle is a leaf.
/// 2. Every outward separator coordinate on the major axis except the
///    smallest (the region's own leading edge) is a candidate cut line.
/// 3. A candidate is kept when the rects ending right before it cover the
///    region's whole cross-section, separators included.
/// 4. Rects are grouped by the interval their leading edge falls in.
/// 5. Groups with several rects recurse on the other axis.
///
/// When `axis` has no internal full-span line the block is retried once on
/// the other axis. If that fails too the rects are not a gapless tiling.
pub fn infer(axis: Orientation, rects: &[Rect]) -> Result<LayoutTree, LayoutError> {
    infer_block(axis, rects, true)
}

fn infer_block(axis: Orientation, rects: &[Rect], may_retry: bool) -> Result<LayoutTree, LayoutError> {
    if rects.len() == 1 {
        return Ok(LayoutTree::Leaf(rects[0].clone()));
    }

    let bounds = analyze(rects)?;
    let cuts = bisecting_lines(axis, &bounds, rects);
    let groups = partition(axis, &cuts, rects);

    if groups.len() < 2 {
        if !may_retry {
            return Err(LayoutError::InvalidInput(format!(
                "{} panes spanning {}..{} x {}..{} do not form a gapless tiling",
                rects.len(),
                bounds.left,
                bounds.right,
                bounds.top,
                bounds.bottom
            )));
        }
        tracing::trace!(?axis, panes = rects.len(), "no full-span cut, retrying on other axis");
        return infer_block(axis.flipped(), rects, false);
    }

    tracing::debug!(?axis, ?cuts, panes = rects.len(), "split region");

    let children = groups
        .iter()
        .map(|group| match group.as_slice() {
            [single] => Ok(LayoutTree::Leaf(single.clone())),
            _ => infer(axis.flipped(), group),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LayoutTree::Split {
        orientation: axis,
        children,
    })
}

/// Candidate lines on `axis` that fully bisect the region, ascending
fn bisecting_lines(axis: Orientation, bounds: &Bounds, rects: &[Rect]) -> Vec<u32> {
    let minor = axis.flipped();
    let cross_section = bounds.span(minor) + 1;

    bounds
        .coords(axis)
        .iter()
        .skip(1)
        .copied()
        .filter(|&line| {
            let covered: u32 = rects
                .iter()
                .filter(|r| r.trailing(axis) + 1 == line)
                .map(|r| r.span(minor) + 1)
                .sum();
            covered == cross_section
        })
        .collect()
}

/// Group rects by the interval between accepted cuts holding their leading edge
fn partition(axis: Orientation, cuts: &[u32], rects: &[Rect]) -> Vec<Vec<Rect>> {
    let Some(last) = cuts.len().checked_sub(1) else {
        return Vec::new();
    };

    let mut groups: Vec<Vec<Rect>> = vec![Vec::new(); cuts.len()];
    for rect in rects {
        let leading = rect.leading(axis);
        let idx = cuts.iter().position(|&c| leading < c).unwrap_or(last);
        groups[idx].push(rect.clone());
    }
    groups.retain(|g| !g.is_empty());
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use pk_core::PaneId;

    fn leaf(id: u64, left: u32, right: u32, top: u32, bottom: u32) -> LayoutTree {
        LayoutTree::Leaf(Rect::new(PaneId(id), left, right, top, bottom))
    }

    fn rects_of(tree: &LayoutTree) -> Vec<Rect> {
        tree.leaves().into_iter().cloned().collect()
    }

    #[test]
    fn single_rect_is_a_leaf() {
        let rects = vec![Rect::new(PaneId(1), 1, 80, 1, 24)];
        assert_eq!(infer_layout(&rects).unwrap(), leaf(1, 1, 80, 1, 24));
    }

    #[test]
    fn empty_input_is_invalid() {
        assert!(matches!(infer_layout(&[]), Err(LayoutError::InvalidInput(_))));
    }

    #[test]
    fn side_by_side_panes_split_vertically() {
        let rects = vec![
            Rect::new(PaneId(1), 1, 40, 1, 24),
            Rect::new(PaneId(2), 42, 80, 1, 24),
        ];
        let expected = LayoutTree::split(
            Orientation::Vertical,
            vec![leaf(1, 1, 40, 1, 24), leaf(2, 42, 80, 1, 24)],
        );
        assert_eq!(infer_layout(&rects).unwrap(), expected);
        // Same answer when columns are tried first
        assert_eq!(infer(Orientation::Vertical, &rects).unwrap(), expected);
    }

    #[test]
    fn full_width_top_over_two_columns() {
        let rects = vec![
            Rect::new(PaneId(3), 42, 80, 12, 24),
            Rect::new(PaneId(1), 1, 80, 1, 10),
            Rect::new(PaneId(2), 1, 40, 12, 24),
        ];
        let expected = LayoutTree::split(
            Orientation::Horizontal,
            vec![
                leaf(1, 1, 80, 1, 10),
                LayoutTree::split(
                    Orientation::Vertical,
                    vec![leaf(2, 1, 40, 12, 24), leaf(3, 42, 80, 12, 24)],
                ),
            ],
        );
        assert_eq!(infer_layout(&rects).unwrap(), expected);
        assert_eq!(infer(Orientation::Vertical, &rects).unwrap(), expected);
    }

    #[test]
    fn internal_offset_is_not_a_cut() {
        // Left column split at row 10, right column split at row 16: neither
        // row line spans the full width, so the columns come first.
        let tree = LayoutTree::split(
            Orientation::Vertical,
            vec![
                LayoutTree::split(
                    Orientation::Horizontal,
                    vec![leaf(1, 1, 40, 1, 10), leaf(2, 1, 40, 12, 24)],
                ),
                LayoutTree::split(
                    Orientation::Horizontal,
                    vec![leaf(3, 42, 80, 1, 16), leaf(4, 42, 80, 18, 24)],
                ),
            ],
        );
        assert_eq!(infer_layout(&rects_of(&tree)).unwrap(), tree);
    }

    #[test]
    fn three_way_split_keeps_ascending_order() {
        let rects = vec![
            Rect::new(PaneId(3), 55, 80, 1, 24),
            Rect::new(PaneId(1), 1, 26, 1, 24),
            Rect::new(PaneId(2), 28, 53, 1, 24),
        ];
        let tree = infer_layout(&rects).unwrap();
        let ids: Vec<_> = tree.leaves().iter().map(|r| r.pane_id).collect();
        assert_eq!(ids, vec![PaneId(1), PaneId(2), PaneId(3)]);
        match tree {
            LayoutTree::Split {
                orientation,
                children,
            } => {
                assert_eq!(orientation, Orientation::Vertical);
                assert_eq!(children.len(), 3);
            }
            other => panic!("expected Split, got {:?}", other),
        }
    }

    #[test]
    fn grid_prefers_rows_at_top_level() {
        let rects = vec![
            Rect::new(PaneId(1), 1, 40, 1, 12),
            Rect::new(PaneId(2), 42, 80, 1, 12),
            Rect::new(PaneId(3), 1, 40, 14, 24),
            Rect::new(PaneId(4), 42, 80, 14, 24),
        ];
        let expected = LayoutTree::split(
            Orientation::Horizontal,
            vec![
                LayoutTree::split(
                    Orientation::Vertical,
                    vec![leaf(1, 1, 40, 1, 12), leaf(2, 42, 80, 1, 12)],
                ),
                LayoutTree::split(
                    Orientation::Vertical,
                    vec![leaf(3, 1, 40, 14, 24), leaf(4, 42, 80, 14, 24)],
                ),
            ],
        );
        assert_eq!(infer_layout(&rects).unwrap(), expected);
    }

    #[test]
    fn orientation_alternates_with_depth() {
        let tree = LayoutTree::split(
            Orientation::Horizontal,
            vec![
                leaf(1, 1, 80, 1, 5),
                LayoutTree::split(
                    Orientation::Vertical,
                    vec![
                        leaf(2, 1, 20, 7, 24),
                        LayoutTree::split(
                            Orientation::Horizontal,
                            vec![leaf(3, 22, 80, 7, 15), leaf(4, 22, 80, 17, 24)],
                        ),
                    ],
                ),
            ],
        );
        assert_eq!(infer_layout(&rects_of(&tree)).unwrap(), tree);
    }

    #[test]
    fn pinwheel_is_rejected() {
        // Four panes around a centre pane: no line crosses the whole region
        let rects = vec![
            Rect::new(PaneId(1), 1, 50, 1, 8),
            Rect::new(PaneId(2), 52, 80, 1, 16),
            Rect::new(PaneId(3), 31, 80, 18, 24),
            Rect::new(PaneId(4), 1, 29, 10, 24),
            Rect::new(PaneId(5), 31, 50, 10, 16),
        ];
        assert!(matches!(infer_layout(&rects), Err(LayoutError::InvalidInput(_))));
    }
}
