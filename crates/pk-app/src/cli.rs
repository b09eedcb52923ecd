// ABOUTME: Command-line argument definitions.
// ABOUTME: One subcommand per pipeline stage plus clearing the stored session.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// panekeep - capture and replay split-pane layouts
#[derive(Parser)]
#[command(name = "panekeep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/panekeep/config.toml)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Infer the split tree of a JSON list of pane rectangles and print it
    Infer {
        /// JSON file holding an array of rects
        rects: PathBuf,
    },

    /// Infer a split tree and store it as a session snapshot
    Save {
        /// JSON file holding an array of rects
        rects: PathBuf,

        /// Session file to write (default: config or state directory)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Print a stored session snapshot
    Show {
        /// Session file to read (default: config or state directory)
        session: Option<PathBuf>,
    },

    /// Delete a stored session snapshot
    Clear {
        /// Session file to delete (default: config or state directory)
        session: Option<PathBuf>,
    },

    /// Rebuild a stored layout in an in-memory terminal and print the panes
    Replay {
        /// Session file to read (default: config or state directory)
        session: Option<PathBuf>,

        /// Terminal height, including reserved status rows
        #[arg(long, default_value_t = 26)]
        rows: u32,

        /// Terminal width
        #[arg(long, default_value_t = 80)]
        cols: u32,
    },
}
