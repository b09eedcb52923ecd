// ABOUTME: Capture and restore entry points over a live window surface.
// ABOUTME: Capture scopes nest and only the outermost one restores focus.

use std::ops::{Deref, DerefMut};

use pk_core::{Config, LayoutTree, PaneId, Rect};

use crate::infer::infer_layout;
use crate::materialize::materialize;
use crate::scale::scale_to;
use crate::surface::WindowSurface;
use crate::views::restore_views;
use crate::LayoutError;

/// Focus state recorded when a capture scope opens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedFocus {
    pub current: PaneId,
    pub previous: Option<PaneId>,
}

/// Outcome of a restore
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Pane built for each leaf, in leaf order
    pub panes: Vec<PaneId>,
    /// Panes whose content or cursor could not be restored
    pub skipped: Vec<PaneId>,
}

#[derive(Debug)]
pub struct Workspace<S: WindowSurface> {
    surface: S,
    restore_views: bool,
    capture_depth: usize,
}

impl<S: WindowSurface> Workspace<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            restore_views: true,
            capture_depth: 0,
        }
    }

    pub fn with_config(surface: S, config: &Config) -> Self {
        Self {
            restore_views: config.restore_views,
            ..Self::new(surface)
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Start a capture that may move focus around.
    ///
    /// Every scope records the current and previous pane as it opens. The
    /// outermost one puts them back when dropped, on every exit path. Scopes
    /// opened while another is alive restore nothing.
    ///
    /// Hosts cannot clear their previous pane. When the capture began with no
    /// previous pane and focus had to move, the current pane is restored but
    /// the host's previous pane is whichever one was read last.
    pub fn begin_capture(&mut self) -> CaptureScope<'_, S> {
        let outermost = self.capture_depth == 0;
        let saved = SavedFocus {
            current: self.surface.current_pane_id(),
            previous: self.surface.previous_pane_id(),
        };
        self.capture_depth += 1;
        CaptureScope {
            workspace: self,
            saved,
            outermost,
        }
    }

    /// Whether a capture scope is currently alive
    pub fn is_capturing(&self) -> bool {
        self.capture_depth > 0
    }

    /// Read one pane's geometry and view state
    pub fn collect_rect(&mut self, pane: PaneId) -> Result<Rect, LayoutError> {
        let mut scope = self.begin_capture();
        let surface = &mut scope.surface;

        let geometry = surface.pane_geometry(pane)?;
        surface.focus_pane(pane)?;

        Ok(Rect {
            left: geometry.left,
            right: geometry.right,
            top: geometry.top,
            bottom: geometry.bottom,
            pane_id: pane,
            content_id: surface.current_content(),
            cursor_line: surface.current_cursor_line(),
            center_line: surface.current_center_line(),
            is_current: false,
            is_previous: false,
        })
    }

    /// Snapshot the workspace as a split tree.
    ///
    /// Focus is moved while reading pane views and is back where it was on
    /// return.
    pub fn capture_layout(&mut self) -> Result<LayoutTree, LayoutError> {
        let mut scope = self.begin_capture();

        let panes = scope.surface.pane_ids();
        if panes.is_empty() {
            return Err(LayoutError::InvalidInput("workspace has no panes".into()));
        }

        let mut rects = Vec::with_capacity(panes.len());
        for pane in panes {
            rects.push(scope.collect_rect(pane)?);
        }

        let focus = scope.saved_focus();
        for rect in &mut rects {
            rect.is_current = rect.pane_id == focus.current;
            rect.is_previous = Some(rect.pane_id) == focus.previous;
        }

        let tree = infer_layout(&rects)?;
        tracing::debug!(panes = rects.len(), extent = %tree.extent(), "captured layout");
        Ok(tree)
    }

    /// Rebuild `tree` on the surface, scaled to its current extent
    pub fn restore_layout(&mut self, tree: &LayoutTree) -> Result<RestoreReport, LayoutError> {
        let extent = self.surface.workspace_extent();
        let scaled = scale_to(tree, extent);

        self.surface.close_others()?;
        let panes = materialize(&scaled, &mut self.surface)?;

        let skipped = if self.restore_views {
            restore_views(&scaled, &panes, &mut self.surface)
        } else {
            Vec::new()
        };

        tracing::info!(
            panes = panes.len(),
            skipped = skipped.len(),
            %extent,
            "restored layout"
        );
        Ok(RestoreReport { panes, skipped })
    }

    fn end_capture(&mut self, saved: SavedFocus, outermost: bool) {
        self.capture_depth = self.capture_depth.saturating_sub(1);
        if !outermost {
            return;
        }

        let unchanged = self.surface.current_pane_id() == saved.current
            && self.surface.previous_pane_id() == saved.previous;
        if unchanged {
            return;
        }

        // Previous first so the host's alternate pane ends up right
        let targets = saved.previous.into_iter().chain(std::iter::once(saved.current));
        for pane in targets {
            if let Err(err) = self.surface.focus_pane(pane) {
                tracing::warn!(%pane, %err, "Failed to restore focus after capture");
            }
        }
    }
}

/// Guard returned by [`Workspace::begin_capture`]
pub struct CaptureScope<'a, S: WindowSurface> {
    workspace: &'a mut Workspace<S>,
    saved: SavedFocus,
    outermost: bool,
}

impl<S: WindowSurface> CaptureScope<'_, S> {
    /// Focus state as it was when this scope opened
    pub fn saved_focus(&self) -> SavedFocus {
        self.saved
    }
}

impl<S: WindowSurface> Deref for CaptureScope<'_, S> {
    type Target = Workspace<S>;

    fn deref(&self) -> &Self::Target {
        self.workspace
    }
}

impl<S: WindowSurface> DerefMut for CaptureScope<'_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.workspace
    }
}

impl<S: WindowSurface> Drop for CaptureScope<'_, S> {
    fn drop(&mut self) {
        self.workspace.end_capture(self.saved, self.outermost);
    }
}
