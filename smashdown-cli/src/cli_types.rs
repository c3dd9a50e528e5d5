//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "smashdown")]
#[command(about = "Crawl a custom-music site and download its songs", long_about = None)]
pub(crate) struct Cli {
    /// Catalog JSON file (default: settings file, then ./db.json)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Sync the catalog's game list with the site's home page
    UpdateGameList {
        /// Keep a copy of fetched pages in this directory
        #[arg(long)]
        html_dir: Option<PathBuf>,
    },

    /// Sync the song lists of one game or of a batch of games
    #[command(group(ArgGroup::new("target").required(true).args(["game", "count"])))]
    UpdateSongList {
        /// Id of the game to sync
        #[arg(long)]
        game: Option<u64>,

        /// Number of games to sync, stalest first
        #[arg(long)]
        count: Option<usize>,

        /// Pick games with missing songs according to the home page instead
        #[arg(long, requires = "count")]
        by_homepage: bool,

        /// Keep a copy of fetched pages in this directory
        #[arg(long)]
        html_dir: Option<PathBuf>,
    },

    /// Download one song or a random batch of songs not yet downloaded
    #[command(group(ArgGroup::new("target").required(true).args(["song", "count"])))]
    Download {
        /// Id of the song to download
        #[arg(long)]
        song: Option<u64>,

        /// Download again even if already downloaded
        #[arg(short, long, requires = "song")]
        force: bool,

        /// Number of random songs to download
        #[arg(long)]
        count: Option<usize>,

        /// Directory receiving the song files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Show catalog statistics
    Stats,

    /// Check downloaded files against their recorded digests
    Verify {
        /// Directory holding the song files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Also list files no song records as downloaded
        #[arg(long)]
        orphans: bool,
    },

    /// Record downloads for song files already on disk but unknown to the catalog
    Repair {
        /// Directory holding the song files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Inspect the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective configuration and where each value comes from
    Show,

    /// Print the settings file path
    Path,
}
