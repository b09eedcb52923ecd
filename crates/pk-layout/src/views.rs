// ABOUTME: Restores per-pane content, cursor and scroll after materialization.
// ABOUTME: Best effort: a pane that fails is skipped and the rest continue.

use pk_core::{LayoutTree, PaneId, Rect};

use crate::surface::{SurfaceError, WindowSurface};

/// Restore the view of every leaf onto its materialized pane, then re-establish
/// previous and current focus. Returns the panes whose view was skipped.
pub fn restore_views<S>(tree: &LayoutTree, panes: &[PaneId], surface: &mut S) -> Vec<PaneId>
where
    S: WindowSurface + ?Sized,
{
    let leaves = tree.leaves();
    let mut skipped = Vec::new();

    for (rect, &pane) in leaves.iter().zip(panes) {
        if let Err(err) = restore_view(surface, pane, rect) {
            tracing::warn!(%pane, content = %rect.content_id, %err, "Skipping view restore");
            skipped.push(pane);
        }
    }

    // Current goes last so it wins and previous ends up as the alternate
    let previous = single_flagged(&leaves, panes, |r| r.is_previous);
    let current = single_flagged(&leaves, panes, |r| r.is_current);
    for pane in [previous, current].into_iter().flatten() {
        if let Err(err) = surface.focus_pane(pane) {
            tracing::warn!(%pane, %err, "Failed to restore focus");
        }
    }

    skipped
}

/// The pane of the one leaf matching `pick`, if exactly one does
fn single_flagged(leaves: &[&Rect], panes: &[PaneId], pick: impl Fn(&Rect) -> bool) -> Option<PaneId> {
    let mut matches = leaves
        .iter()
        .zip(panes)
        .filter(|(rect, _)| pick(rect))
        .map(|(_, pane)| *pane);
    match (matches.next(), matches.next()) {
        (Some(pane), None) => Some(pane),
        _ => None,
    }
}

fn restore_view<S>(surface: &mut S, pane: PaneId, rect: &Rect) -> Result<(), SurfaceError>
where
    S: WindowSurface + ?Sized,
{
    surface.focus_pane(pane)?;
    surface.set_content(&rect.content_id)?;
    surface.set_cursor_line(rect.center_line)?;
    surface.center_viewport()?;
    surface.set_cursor_line(rect.cursor_line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materialize::materialize;
    use crate::memory::MemorySurface;
    use pk_core::{Extent, Orientation};

    fn pane(id: u64, left: u32, right: u32, content: &str, cursor: u32, center: u32) -> Rect {
        let mut rect = Rect::new(PaneId(id), left, right, 1, 24);
        rect.content_id = content.to_string();
        rect.cursor_line = cursor;
        rect.center_line = center;
        rect
    }

    fn build(leaves: Vec<Rect>, surface: &mut MemorySurface) -> (LayoutTree, Vec<PaneId>) {
        let tree = LayoutTree::split(
            Orientation::Vertical,
            leaves.into_iter().map(LayoutTree::Leaf).collect(),
        );
        let panes = materialize(&tree, surface).unwrap();
        (tree, panes)
    }

    #[test]
    fn restores_content_cursor_and_center() {
        let mut surface = MemorySurface::new(Extent::new(24, 80)).with_contents(["a.rs", "b.rs"]);
        let (tree, panes) = build(
            vec![pane(1, 1, 40, "a.rs", 100, 95), pane(2, 42, 80, "b.rs", 5, 13)],
            &mut surface,
        );

        let skipped = restore_views(&tree, &panes, &mut surface);
        assert!(skipped.is_empty());

        let first = surface.view(panes[0]).unwrap();
        assert_eq!(first.content, "a.rs");
        assert_eq!(first.cursor_line, 100);
        surface.focus_pane(panes[0]).unwrap();
        assert_eq!(surface.current_center_line(), 95);

        let second = surface.view(panes[1]).unwrap();
        assert_eq!(second.content, "b.rs");
        assert_eq!(second.cursor_line, 5);
    }

    #[test]
    fn missing_content_skips_only_that_pane() {
        let mut surface = MemorySurface::new(Extent::new(24, 80)).with_contents(["kept.rs"]);
        let (tree, panes) = build(
            vec![
                pane(1, 1, 26, "gone.rs", 3, 13),
                pane(2, 28, 53, "kept.rs", 7, 13),
                pane(3, 55, 80, "also-gone.rs", 9, 13),
            ],
            &mut surface,
        );

        let skipped = restore_views(&tree, &panes, &mut surface);
        assert_eq!(skipped, vec![panes[0], panes[2]]);
        assert_eq!(surface.view(panes[1]).unwrap().content, "kept.rs");
        assert_eq!(surface.view(panes[1]).unwrap().cursor_line, 7);
    }

    #[test]
    fn current_wins_over_previous() {
        let mut surface = MemorySurface::new(Extent::new(24, 80));
        let mut a = pane(1, 1, 26, "", 1, 13);
        a.is_previous = true;
        let mut b = pane(3, 55, 80, "", 1, 13);
        b.is_current = true;
        let (tree, panes) = build(vec![a, pane(2, 28, 53, "", 1, 13), b], &mut surface);

        restore_views(&tree, &panes, &mut surface);
        assert_eq!(surface.current_pane_id(), panes[2]);
        assert_eq!(surface.previous_pane_id(), Some(panes[0]));
    }

    #[test]
    fn ambiguous_flags_are_ignored() {
        let mut surface = MemorySurface::new(Extent::new(24, 80));
        let mut a = pane(1, 1, 40, "", 1, 13);
        a.is_current = true;
        let mut b = pane(2, 42, 80, "", 1, 13);
        b.is_current = true;
        let (tree, panes) = build(vec![a, b], &mut surface);

        restore_views(&tree, &panes, &mut surface);
        // Focus stays where the per-leaf pass left it
        assert_eq!(surface.current_pane_id(), panes[1]);
    }
}
