// ABOUTME: In-memory window surface with editor-style split semantics.
// ABOUTME: Lays panes out on a cell grid with one-cell separators between siblings.

use std::collections::{HashMap, HashSet};

use pk_core::{Extent, Geometry, Orientation, PaneId};

use crate::surface::{Direction, SurfaceError, WindowSurface};

#[derive(Debug, Clone)]
enum Node {
    Pane(PaneId),
    /// Children with their size along the split's major axis
    Split {
        orientation: Orientation,
        children: Vec<(Node, u32)>,
    },
}

/// What a pane is showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneView {
    pub content: String,
    pub cursor_line: u32,
    /// First buffer line visible in the pane
    pub top_line: u32,
}

impl Default for PaneView {
    fn default() -> Self {
        Self {
            content: String::new(),
            cursor_line: 1,
            top_line: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MemorySurface {
    root: Node,
    extent: Extent,
    current: PaneId,
    previous: Option<PaneId>,
    next_id: u64,
    views: HashMap<PaneId, PaneView>,
    contents: HashSet<String>,
}

impl MemorySurface {
    /// A workspace holding one empty pane
    pub fn new(extent: Extent) -> Self {
        let id = PaneId(1);
        let mut views = HashMap::new();
        views.insert(id, PaneView::default());
        let mut contents = HashSet::new();
        contents.insert(String::new());
        Self {
            root: Node::Pane(id),
            extent,
            current: id,
            previous: None,
            next_id: 2,
            views,
            contents,
        }
    }

    /// Register content ids that panes may display
    pub fn with_contents<I, T>(mut self, contents: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.contents.extend(contents.into_iter().map(Into::into));
        self
    }

    pub fn add_content(&mut self, content: impl Into<String>) {
        self.contents.insert(content.into());
    }

    /// Forget a content id, as if its buffer had been wiped
    pub fn remove_content(&mut self, content: &str) {
        self.contents.remove(content);
    }

    pub fn view(&self, pane: PaneId) -> Option<&PaneView> {
        self.views.get(&pane)
    }

    /// Every pane with its geometry, in layout order
    pub fn pane_rects(&self) -> Vec<(PaneId, Geometry)> {
        let mut out = Vec::new();
        collect_rects(&self.root, self.full_area(), &mut out);
        out
    }

    fn full_area(&self) -> Geometry {
        Geometry {
            left: 1,
            right: self.extent.cols,
            top: 1,
            bottom: self.extent.rows,
        }
    }

    fn geometry(&self, pane: PaneId) -> Option<Geometry> {
        self.pane_rects()
            .into_iter()
            .find(|(id, _)| *id == pane)
            .map(|(_, g)| g)
    }

    fn current_view(&self) -> PaneView {
        self.views.get(&self.current).cloned().unwrap_or_default()
    }

    fn current_view_mut(&mut self) -> &mut PaneView {
        self.views.entry(self.current).or_default()
    }

    fn current_height(&self) -> u32 {
        self.geometry(self.current).map(|g| g.height()).unwrap_or(1)
    }

    fn switch_to(&mut self, pane: PaneId) {
        if pane != self.current {
            self.previous = Some(self.current);
            self.current = pane;
        }
    }

    fn resize_along(&mut self, axis: Orientation, size: u32) {
        let target = self.current;
        if !resize_node(&mut self.root, target, axis, size.max(1)) {
            tracing::trace!(%target, ?axis, "no enclosing split to resize");
        }
    }
}

impl WindowSurface for MemorySurface {
    fn open_split(&mut self, orientation: Orientation) -> Result<(), SurfaceError> {
        let target = self.current;
        let geometry = self.geometry(target).ok_or(SurfaceError::NoSuchPane(target))?;
        let span = match orientation {
            Orientation::Horizontal => geometry.height(),
            Orientation::Vertical => geometry.width(),
        };
        if span < 3 {
            return Err(SurfaceError::NoRoom {
                pane: target,
                orientation,
            });
        }

        let new_size = (span - 1) / 2;
        let old_size = span - 1 - new_size;
        let new_id = PaneId(self.next_id);
        self.next_id += 1;

        split_node(&mut self.root, target, orientation, new_id, new_size, old_size);

        let view = self.views.get(&target).cloned().unwrap_or_default();
        self.views.insert(new_id, view);
        self.switch_to(new_id);
        Ok(())
    }

    fn move_focus(&mut self, direction: Direction) -> Result<(), SurfaceError> {
        let rects = self.pane_rects();
        let Some(cur) = rects.iter().find(|(id, _)| *id == self.current).map(|(_, g)| *g) else {
            return Err(SurfaceError::NoSuchPane(self.current));
        };

        let neighbour = rects.iter().find(|(_, g)| match direction {
            Direction::Down => g.top == cur.bottom + 2 && (g.left..=g.right).contains(&cur.left),
            Direction::Up => g.bottom + 2 == cur.top && (g.left..=g.right).contains(&cur.left),
            Direction::Right => g.left == cur.right + 2 && (g.top..=g.bottom).contains(&cur.top),
            Direction::Left => g.right + 2 == cur.left && (g.top..=g.bottom).contains(&cur.top),
        });

        if let Some((id, _)) = neighbour {
            self.switch_to(*id);
        }
        Ok(())
    }

    fn resize_current(&mut self, height: Option<u32>, width: Option<u32>) -> Result<(), SurfaceError> {
        if let Some(height) = height {
            self.resize_along(Orientation::Horizontal, height);
        }
        if let Some(width) = width {
            self.resize_along(Orientation::Vertical, width);
        }
        Ok(())
    }

    fn focus_pane(&mut self, pane: PaneId) -> Result<(), SurfaceError> {
        if !contains(&self.root, pane) {
            return Err(SurfaceError::NoSuchPane(pane));
        }
        self.switch_to(pane);
        Ok(())
    }

    fn close_others(&mut self) -> Result<(), SurfaceError> {
        let keep = self.current;
        self.root = Node::Pane(keep);
        self.views.retain(|id, _| *id == keep);
        self.previous = None;
        Ok(())
    }

    fn set_content(&mut self, content: &str) -> Result<(), SurfaceError> {
        if !self.contents.contains(content) {
            return Err(SurfaceError::NoSuchContent(content.to_string()));
        }
        *self.current_view_mut() = PaneView {
            content: content.to_string(),
            ..PaneView::default()
        };
        Ok(())
    }

    fn set_cursor_line(&mut self, line: u32) -> Result<(), SurfaceError> {
        let height = self.current_height();
        let view = self.current_view_mut();
        view.cursor_line = line.max(1);
        if view.cursor_line < view.top_line {
            view.top_line = view.cursor_line;
        } else if view.cursor_line >= view.top_line + height {
            view.top_line = view.cursor_line + 1 - height;
        }
        Ok(())
    }

    fn center_viewport(&mut self) -> Result<(), SurfaceError> {
        let height = self.current_height();
        let view = self.current_view_mut();
        view.top_line = view.cursor_line.saturating_sub(height / 2).max(1);
        Ok(())
    }

    fn current_pane_id(&self) -> PaneId {
        self.current
    }

    fn previous_pane_id(&self) -> Option<PaneId> {
        self.previous
    }

    fn pane_ids(&self) -> Vec<PaneId> {
        let mut out = Vec::new();
        collect_panes(&self.root, &mut out);
        out
    }

    fn current_content(&self) -> String {
        self.current_view().content
    }

    fn current_cursor_line(&self) -> u32 {
        self.current_view().cursor_line
    }

    fn current_center_line(&self) -> u32 {
        self.current_view().top_line + self.current_height() / 2
    }

    fn pane_geometry(&self, pane: PaneId) -> Result<Geometry, SurfaceError> {
        self.geometry(pane).ok_or(SurfaceError::NoSuchPane(pane))
    }

    fn workspace_extent(&self) -> Extent {
        self.extent
    }
}

fn collect_rects(node: &Node, area: Geometry, out: &mut Vec<(PaneId, Geometry)>) {
    match node {
        Node::Pane(id) => out.push((*id, area)),
        Node::Split {
            orientation,
            children,
        } => {
            let mut offset = match orientation {
                Orientation::Horizontal => area.top,
                Orientation::Vertical => area.left,
            };
            for (child, size) in children {
                let end = offset + size.saturating_sub(1);
                let child_area = match orientation {
                    Orientation::Horizontal => Geometry {
                        top: offset,
                        bottom: end,
                        ..area
                    },
                    Orientation::Vertical => Geometry {
                        left: offset,
                        right: end,
                        ..area
                    },
                };
                collect_rects(child, child_area, out);
                offset = end + 2;
            }
        }
    }
}

fn collect_panes(node: &Node, out: &mut Vec<PaneId>) {
    match node {
        Node::Pane(id) => out.push(*id),
        Node::Split { children, .. } => {
            for (child, _) in children {
                collect_panes(child, out);
            }
        }
    }
}

fn contains(node: &Node, target: PaneId) -> bool {
    match node {
        Node::Pane(id) => *id == target,
        Node::Split { children, .. } => children.iter().any(|(c, _)| contains(c, target)),
    }
}

/// Put `new_id` before `target`, joining the parent split when it already
/// runs in the same direction
fn split_node(
    node: &mut Node,
    target: PaneId,
    orientation: Orientation,
    new_id: PaneId,
    new_size: u32,
    old_size: u32,
) -> bool {
    match node {
        Node::Pane(id) if *id == target => {
            *node = Node::Split {
                orientation,
                children: vec![(Node::Pane(new_id), new_size), (Node::Pane(target), old_size)],
            };
            true
        }
        Node::Pane(_) => false,
        Node::Split {
            orientation: existing,
            children,
        } => {
            if *existing == orientation {
                let idx = children
                    .iter()
                    .position(|(c, _)| matches!(c, Node::Pane(id) if *id == target));
                if let Some(idx) = idx {
                    children[idx].1 = old_size;
                    children.insert(idx, (Node::Pane(new_id), new_size));
                    return true;
                }
            }
            children
                .iter_mut()
                .any(|(c, _)| split_node(c, target, orientation, new_id, new_size, old_size))
        }
    }
}

/// Resize the child of the nearest `axis` split holding `target`. Growth is
/// taken from following siblings first, then preceding ones; shrinkage goes
/// to the next sibling (or the previous one for a last child).
fn resize_node(node: &mut Node, target: PaneId, axis: Orientation, size: u32) -> bool {
    let Node::Split {
        orientation,
        children,
    } = node
    else {
        return false;
    };
    let Some(idx) = children.iter().position(|(c, _)| contains(c, target)) else {
        return false;
    };
    if resize_node(&mut children[idx].0, target, axis, size) {
        return true;
    }
    if *orientation != axis {
        return false;
    }

    let old = children[idx].1;
    if size > old {
        let mut wanted = size - old;
        let donors: Vec<usize> = (idx + 1..children.len()).chain((0..idx).rev()).collect();
        for donor in donors {
            if wanted == 0 {
                break;
            }
            let give = wanted.min(children[donor].1.saturating_sub(1));
            children[donor].1 -= give;
            children[idx].1 += give;
            wanted -= give;
        }
    } else if size < old {
        let receiver = if idx + 1 < children.len() {
            idx + 1
        } else {
            idx.saturating_sub(1)
        };
        if receiver != idx {
            children[receiver].1 += old - size;
            children[idx].1 = size;
        }
    }

    for (child, span) in children.iter_mut() {
        fit(child, axis, *span);
    }
    true
}

/// Make nested splits along `axis` add up to `span` again, adjusting the
/// trailing children
fn fit(node: &mut Node, axis: Orientation, span: u32) {
    let Node::Split {
        orientation,
        children,
    } = node
    else {
        return;
    };

    if *orientation == axis {
        let separators = children.len().saturating_sub(1) as u32;
        let used: u32 = children.iter().map(|(_, s)| *s).sum::<u32>() + separators;
        if used < span {
            if let Some((_, last)) = children.last_mut() {
                *last += span - used;
            }
        } else if used > span {
            let mut excess = used - span;
            for (_, size) in children.iter_mut().rev() {
                let take = excess.min(size.saturating_sub(1));
                *size -= take;
                excess -= take;
                if excess == 0 {
                    break;
                }
            }
        }
        for (child, size) in children.iter_mut() {
            fit(child, axis, *size);
        }
    } else {
        for (child, _) in children.iter_mut() {
            fit(child, axis, span);
        }
    }
}
