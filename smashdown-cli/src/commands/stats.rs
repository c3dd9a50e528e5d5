use std::path::PathBuf;

use chrono::{Local, TimeZone};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::logging::log_blank;

use super::{effective_config, open_existing_catalog};

fn format_timestamp(ts: i64) -> String {
    Local
        .timestamp_opt(ts, 0)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}

pub(crate) fn run_stats(catalog: Option<PathBuf>) -> Result<(), CliError> {
    let config = effective_config(catalog, None, None)?;
    let Some(catalog) = open_existing_catalog(&config)? else {
        return Ok(());
    };
    let stats = catalog.statistics();

    log::info!(
        "{}",
        "Catalog Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Catalog: {}", config.catalog.value.display());
    log::info!("  Site:    {}", catalog.site().base_url);
    if let Some(ts) = catalog.site().last_checked() {
        log::info!("  Game list synced: {}", format_timestamp(ts));
    }
    log_blank();
    log::info!("  Games:              {:>8}", stats.games);
    log::info!("    visited:          {:>8}", stats.games_visited);
    log::info!("    never visited:    {:>8}", stats.games_not_visited);
    log::info!("    deleted on site:  {:>8}", stats.games_deleted_from_site);
    log::info!("  Songs:              {:>8}", stats.songs);
    log::info!("    downloaded:       {:>8}", stats.songs_downloaded);
    log::info!("    not downloaded:   {:>8}", stats.songs_not_downloaded);
    log::info!("    deleted on site:  {:>8}", stats.songs_deleted_from_site);
    if let Some(ts) = stats.oldest_game_visit {
        log_blank();
        log::info!("  Oldest game visit: {}", format_timestamp(ts));
    }
    Ok(())
}
