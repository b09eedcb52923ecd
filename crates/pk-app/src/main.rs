// ABOUTME: Main application entry point.
// ABOUTME: Loads config, parses arguments and runs the selected layout command.

mod cli;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use pk_core::{Config, LayoutTree, Rect, SessionData, SessionError};
use pk_layout::{infer_layout, MemorySurface, WindowSurface, Workspace};

fn read_rects(path: &Path) -> Result<Vec<Rect>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let rects = serde_json::from_str(&content)
        .with_context(|| format!("parsing rects from {}", path.display()))?;
    Ok(rects)
}

fn infer_from(path: &Path) -> Result<LayoutTree> {
    let rects = read_rects(path)?;
    let tree = infer_layout(&rects).context("inferring layout")?;
    tracing::info!("Inferred {} panes from {}", tree.leaf_count(), path.display());
    Ok(tree)
}

fn session_path(explicit: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    explicit
        .or_else(|| config.session_path.clone())
        .or_else(SessionData::default_path)
        .ok_or(SessionError::NoStatePath)
        .context("Could not determine session file location")
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display())),
        None => Ok(Config::load_or_default()),
    }
}

fn replay(session: &SessionData, config: &Config, rows: u32, cols: u32) -> Result<()> {
    let extent = config.usable_extent(rows, cols);
    let contents = session
        .layout
        .leaves()
        .into_iter()
        .map(|r| r.content_id.clone())
        .collect::<Vec<_>>();
    let surface = MemorySurface::new(extent).with_contents(contents);

    let mut workspace = Workspace::with_config(surface, config);
    let report = workspace
        .restore_layout(&session.layout)
        .context("restoring layout")?;

    let surface = workspace.surface();
    println!("workspace {} (captured at {})", extent, session.extent);
    for (pane, geometry) in surface.pane_rects() {
        let marker = if pane == surface.current_pane_id() {
            "*"
        } else if Some(pane) == surface.previous_pane_id() {
            "-"
        } else {
            " "
        };
        let content = surface
            .view(pane)
            .map(|v| v.content.as_str())
            .filter(|c| !c.is_empty())
            .unwrap_or("[No Name]");
        println!(
            "{}{:<6} cols {:>3}-{:<3} rows {:>3}-{:<3} {}",
            marker,
            pane.to_string(),
            geometry.left, geometry.right, geometry.top, geometry.bottom, content
        );
    }
    if !report.skipped.is_empty() {
        tracing::warn!("{} panes could not restore their view", report.skipped.len());
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    tracing::debug!("Loaded config: reserved_rows={}", config.reserved_rows);

    match cli.command {
        Commands::Infer { rects } => {
            let tree = infer_from(&rects)?;
            println!("{}", serde_json::to_string_pretty(&tree)?);
        }
        Commands::Save { rects, output } => {
            let tree = infer_from(&rects)?;
            let path = session_path(output, &config)?;
            SessionData::new(tree)
                .save(&path)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("Session saved to {}", path.display());
        }
        Commands::Show { session } => {
            let path = session_path(session, &config)?;
            let session =
                SessionData::load(&path).with_context(|| format!("reading {}", path.display()))?;
            println!("{}", serde_json::to_string_pretty(&session)?);
        }
        Commands::Clear { session } => {
            let path = session_path(session, &config)?;
            if SessionData::remove(&path).with_context(|| format!("deleting {}", path.display()))? {
                tracing::info!("Session {} deleted", path.display());
            } else {
                tracing::info!("No session at {}", path.display());
            }
        }
        Commands::Replay {
            session,
            rows,
            cols,
        } => {
            let path = session_path(session, &config)?;
            let session =
                SessionData::load(&path).with_context(|| format!("reading {}", path.display()))?;
            replay(&session, &config, rows, cols)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_session_path_wins() {
        let config = Config {
            session_path: Some(PathBuf::from("/tmp/configured.bin")),
            ..Config::default()
        };
        let path = session_path(Some(PathBuf::from("/tmp/explicit.bin")), &config).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/explicit.bin"));
    }

    #[test]
    fn configured_session_path_beats_state_dir() {
        let config = Config {
            session_path: Some(PathBuf::from("/tmp/configured.bin")),
            ..Config::default()
        };
        assert_eq!(session_path(None, &config).unwrap(), PathBuf::from("/tmp/configured.bin"));
    }

    #[test]
    fn state_dir_is_the_fallback() {
        let resolved = session_path(None, &Config::default()).ok();
        assert_eq!(resolved, SessionData::default_path());
    }
}
