use std::path::PathBuf;

use smashdown_lib::{ListingChanges, Updater};

use crate::CliError;
use crate::progress::BarProgress;

use super::{effective_config, open_catalog, site_client};

fn summarize(what: &str, changes: &ListingChanges) {
    log::info!(
        "{}: {} added, {} removed, {} back on site.",
        what,
        changes.added.len(),
        changes.removed.len(),
        changes.reappeared.len(),
    );
}

pub(crate) fn run_update_game_list(
    catalog: Option<PathBuf>,
    html_dir: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = effective_config(catalog, None, html_dir)?;
    let mut catalog = open_catalog(&config)?;
    let mut client = site_client(&config)?;

    let changes = Updater::new(&mut client, &mut catalog).update_game_list()?;
    summarize("Games", &changes);
    log::info!("{} game(s) in catalog.", catalog.site().games.len());
    Ok(())
}

/// Which games to refresh.
pub(crate) enum SongListTarget {
    Game(u64),
    Stalest(usize),
    UnderFetched(usize),
}

pub(crate) fn run_update_song_list(
    catalog: Option<PathBuf>,
    html_dir: Option<PathBuf>,
    target: SongListTarget,
    quiet: bool,
) -> Result<(), CliError> {
    let config = effective_config(catalog, None, html_dir)?;
    let mut catalog = open_catalog(&config)?;
    let mut client = site_client(&config)?;
    let mut updater = Updater::new(&mut client, &mut catalog);

    let results = match target {
        SongListTarget::Game(game_id) => vec![(game_id, updater.update_game_song_list(game_id)?)],
        SongListTarget::Stalest(count) => {
            updater.update_game_song_lists(count, &mut BarProgress::new(quiet))?
        }
        SongListTarget::UnderFetched(count) => updater
            .update_game_song_lists_by_using_homepage(count, &mut BarProgress::new(quiet))?,
    };

    for (game_id, changes) in &results {
        if !changes.is_empty() {
            summarize(&format!("Game {game_id}"), changes);
        }
    }
    let added: usize = results.iter().map(|(_, c)| c.added.len()).sum();
    log::info!(
        "Song lists refreshed for {} game(s), {} new song(s).",
        results.len(),
        added
    );
    Ok(())
}
