// ABOUTME: Layout snapshot persistence for workspace restoration.
// ABOUTME: Saves the captured split tree to disk as zstd-compressed JSON.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::PathBuf;

use crate::{Extent, LayoutTree};

/// A captured workspace layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub version: u32,
    /// Pane area the layout was captured at
    pub extent: Extent,
    pub layout: LayoutTree,
}

impl SessionData {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new(layout: LayoutTree) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            extent: layout.extent(),
            layout,
        }
    }

    /// Get the default session file path (~/.local/state/panekeep/session.bin)
    pub fn default_path() -> Option<PathBuf> {
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .map(|p| p.join("panekeep").join("session.bin"))
    }

    /// Save session data to disk
    pub fn save(&self, path: &std::path::Path) -> Result<(), SessionError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec(self)?;
        let mut encoder = zstd::Encoder::new(Vec::new(), 3)?;
        encoder.write_all(&json)?;
        let compressed = encoder.finish()?;

        std::fs::write(path, compressed)?;
        Ok(())
    }

    /// Load session data from disk
    pub fn load(path: &std::path::Path) -> Result<Self, SessionError> {
        let compressed = std::fs::read(path)?;

        let mut decoder = zstd::Decoder::new(&compressed[..])?;
        let mut json = Vec::new();
        decoder.read_to_end(&mut json)?;

        let session: SessionData = serde_json::from_slice(&json)?;

        if session.version > Self::CURRENT_VERSION {
            return Err(SessionError::UnsupportedVersion(session.version));
        }

        Ok(session)
    }

    /// Delete a session file. Returns whether there was one to delete.
    pub fn remove(path: &std::path::Path) -> Result<bool, SessionError> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not determine state directory")]
    NoStatePath,

    #[error("Unsupported session version: {0}")]
    UnsupportedVersion(u32),
}
