// ABOUTME: Error type for layout inference and replay.
// ABOUTME: Host failures are wrapped so callers see a single error enum.

use crate::surface::SurfaceError;

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Window surface error: {0}")]
    Surface(#[from] SurfaceError),
}
