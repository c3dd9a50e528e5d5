//! smashdown CLI
//!
//! Crawls the site's game and song listings into a JSON catalog and
//! downloads the song files it discovers.

mod cli_types;
mod commands;
mod error;
mod logging;
mod progress;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
use commands::download::DownloadTarget;
use commands::update::SongListTarget;
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("error: cannot open log file: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let quiet = cli.quiet;
    let catalog = cli.catalog;

    match cli.command {
        Commands::UpdateGameList { html_dir } => {
            commands::update::run_update_game_list(catalog, html_dir)
        }
        Commands::UpdateSongList {
            game,
            count,
            by_homepage,
            html_dir,
        } => {
            let target = match (game, count) {
                (Some(id), _) => SongListTarget::Game(id),
                (None, Some(n)) if by_homepage => SongListTarget::UnderFetched(n),
                (None, Some(n)) => SongListTarget::Stalest(n),
                (None, None) => return Err(CliError::config("either --game or --count is required")),
            };
            commands::update::run_update_song_list(catalog, html_dir, target, quiet)
        }
        Commands::Download {
            song,
            force,
            count,
            output_dir,
        } => {
            let target = match (song, count) {
                (Some(id), _) => DownloadTarget::Song { id, force },
                (None, Some(n)) => DownloadTarget::Random(n),
                (None, None) => return Err(CliError::config("either --song or --count is required")),
            };
            commands::download::run_download(catalog, output_dir, target, quiet)
        }
        Commands::Stats => commands::stats::run_stats(catalog),
        Commands::Verify {
            output_dir,
            orphans,
        } => commands::verify::run_verify(catalog, output_dir, orphans),
        Commands::Repair { output_dir } => commands::repair::run_repair(catalog, output_dir),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(catalog),
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
        },
    }
}
