// ABOUTME: Enclosing bounds and separator coordinates of a rectangle set.
// ABOUTME: Feeds the candidate cut lines used by split inference.

use std::collections::BTreeSet;

use pk_core::{Orientation, Rect};

use crate::LayoutError;

/// Extremes of a rectangle set plus the outward separator coordinates on
/// each axis (one cell outside every rect edge), sorted and deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bounds {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
    pub xs: Vec<u32>,
    pub ys: Vec<u32>,
}

impl Bounds {
    /// Separator coordinates along the major axis of `axis`
    pub fn coords(&self, axis: Orientation) -> &[u32] {
        match axis {
            Orientation::Horizontal => &self.ys,
            Orientation::Vertical => &self.xs,
        }
    }

    /// Number of cells covered along the major axis of `axis`
    pub fn span(&self, axis: Orientation) -> u32 {
        match axis {
            Orientation::Horizontal => self.bottom + 1 - self.top,
            Orientation::Vertical => self.right + 1 - self.left,
        }
    }
}

pub fn analyze(rects: &[Rect]) -> Result<Bounds, LayoutError> {
    let first = rects
        .first()
        .ok_or_else(|| LayoutError::InvalidInput("cannot compute bounds of zero panes".into()))?;

    let mut bounds = Bounds {
        left: first.left,
        right: first.right,
        top: first.top,
        bottom: first.bottom,
        xs: Vec::new(),
        ys: Vec::new(),
    };
    let mut xs = BTreeSet::new();
    let mut ys = BTreeSet::new();

    for rect in rects {
        bounds.left = bounds.left.min(rect.left);
        bounds.right = bounds.right.max(rect.right);
        bounds.top = bounds.top.min(rect.top);
        bounds.bottom = bounds.bottom.max(rect.bottom);

        xs.insert(rect.left.saturating_sub(1));
        xs.insert(rect.right + 1);
        ys.insert(rect.top.saturating_sub(1));
        ys.insert(rect.bottom + 1);
    }

    bounds.xs = xs.into_iter().collect();
    bounds.ys = ys.into_iter().collect();
    Ok(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pk_core::PaneId;

    #[test]
    fn empty_set_is_invalid() {
        assert!(matches!(analyze(&[]), Err(LayoutError::InvalidInput(_))));
    }

    #[test]
    fn separators_include_outer_boundary() {
        let rects = vec![
            Rect::new(PaneId(1), 1, 80, 1, 10),
            Rect::new(PaneId(2), 1, 40, 12, 24),
            Rect::new(PaneId(3), 42, 80, 12, 24),
        ];
        let bounds = analyze(&rects).unwrap();

        assert_eq!((bounds.left, bounds.right), (1, 80));
        assert_eq!((bounds.top, bounds.bottom), (1, 24));
        assert_eq!(bounds.xs, vec![0, 41, 81]);
        assert_eq!(bounds.ys, vec![0, 11, 25]);
        assert_eq!(bounds.span(Orientation::Horizontal), 24);
        assert_eq!(bounds.span(Orientation::Vertical), 80);
        assert_eq!(bounds.coords(Orientation::Vertical), &[0, 41, 81]);
    }

    #[test]
    fn nested_region_keeps_its_own_offsets() {
        let rects = vec![
            Rect::new(PaneId(2), 1, 40, 12, 24),
            Rect::new(PaneId(3), 42, 80, 12, 24),
        ];
        let bounds = analyze(&rects).unwrap();
        assert_eq!(bounds.ys, vec![11, 25]);
        assert_eq!(bounds.span(Orientation::Horizontal), 13);
    }
}
