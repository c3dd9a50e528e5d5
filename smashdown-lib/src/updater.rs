//! Reconciliation of the catalog against live site listings.
//!
//! The same diff-and-merge runs at two levels: the site's game list and each
//! game's song list. Entities missing from a listing are flagged deleted,
//! listed ones have the flag cleared, and unknown ids are appended. Nothing is
//! ever removed and titles are left as first discovered.

use std::collections::{HashMap, HashSet};

use smashdown_catalog::{Catalog, Game, Song};
use smashdown_scraper::SiteClient;

use crate::error::SyncError;
use crate::progress::SyncProgress;
use crate::unix_now;

/// Ids affected by one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingChanges {
    /// New ids appended to the catalog.
    pub added: Vec<u64>,
    /// Ids that were live and are now flagged deleted.
    pub removed: Vec<u64>,
    /// Ids that were flagged deleted and are listed again.
    pub reappeared: Vec<u64>,
}

impl ListingChanges {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.reappeared.is_empty()
    }
}

/// Catalog entity that can be matched against a remote listing.
trait Listed {
    const KIND: &'static str;
    fn id(&self) -> u64;
    fn title(&self) -> &str;
    fn is_deleted(&self) -> bool;
    fn set_deleted(&mut self, deleted: bool);
}

impl Listed for Game {
    const KIND: &'static str = "Game";

    fn id(&self) -> u64 {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted_from_site
    }

    fn set_deleted(&mut self, deleted: bool) {
        self.is_deleted_from_site = deleted;
    }
}

impl Listed for Song {
    const KIND: &'static str = "Song";

    fn id(&self) -> u64 {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted_from_site
    }

    fn set_deleted(&mut self, deleted: bool) {
        self.is_deleted_from_site = deleted;
    }
}

/// Merge `on_site` (id, title) pairs into `in_db`.
///
/// Ids in `taken` belong to another owner and are never appended here.
fn reconcile<E: Listed>(
    in_db: &mut Vec<E>,
    on_site: &[(u64, &str)],
    taken: &HashSet<u64>,
    create: impl Fn(u64, &str) -> E,
) -> ListingChanges {
    let mut changes = ListingChanges::default();
    let site_ids: HashSet<u64> = on_site.iter().map(|&(id, _)| id).collect();

    log::debug!("Looking for {}s removed from website.", E::KIND.to_lowercase());
    for entity in in_db.iter_mut() {
        if site_ids.contains(&entity.id()) {
            continue;
        }
        if !entity.is_deleted() {
            log::info!(
                "{} {} ({}) has been removed from website.",
                E::KIND,
                entity.id(),
                entity.title()
            );
            changes.removed.push(entity.id());
        }
        entity.set_deleted(true);
    }

    log::debug!("Looking for {}s added.", E::KIND.to_lowercase());
    let index: HashMap<u64, usize> = in_db
        .iter()
        .enumerate()
        .map(|(i, e)| (e.id(), i))
        .collect();
    let mut seen = HashSet::new();
    for &(id, title) in on_site {
        if !seen.insert(id) {
            continue;
        }
        if let Some(&i) = index.get(&id) {
            let entity = &mut in_db[i];
            if entity.is_deleted() {
                log::info!("{} {} ({}) is back on website.", E::KIND, id, entity.title());
                changes.reappeared.push(id);
            }
            if entity.title() != title {
                log::debug!(
                    "{} {} is listed as '{}', keeping '{}'.",
                    E::KIND,
                    id,
                    title,
                    entity.title()
                );
            }
            entity.set_deleted(false);
        } else if taken.contains(&id) {
            log::warn!(
                "{} {} ({}) already belongs elsewhere in the catalog, skipping.",
                E::KIND,
                id,
                title
            );
        } else {
            in_db.push(create(id, title));
            log::info!("{} {} ({}) has been added.", E::KIND, id, title);
            changes.added.push(id);
        }
    }
    changes
}

/// Brings the catalog in line with what the site currently lists.
pub struct Updater<'a, C: SiteClient + ?Sized> {
    client: &'a mut C,
    catalog: &'a mut Catalog,
}

impl<'a, C: SiteClient + ?Sized> Updater<'a, C> {
    pub fn new(client: &'a mut C, catalog: &'a mut Catalog) -> Self {
        Self { client, catalog }
    }

    /// Reconcile the site's game list, stamp the site, and save.
    pub fn update_game_list(&mut self) -> Result<ListingChanges, SyncError> {
        let listing = self.client.fetch_game_list()?;
        let on_site: Vec<(u64, &str)> = listing.iter().map(|g| (g.id, g.title.as_str())).collect();

        let site = self.catalog.site_mut();
        let changes = reconcile(&mut site.games, &on_site, &HashSet::new(), |id, title| {
            Game::new(id, title)
        });
        site.download_timestamps.push(unix_now());
        self.catalog.save()?;
        Ok(changes)
    }

    /// Reconcile one game's song list, stamp the game, and save.
    pub fn update_game_song_list(&mut self, game_id: u64) -> Result<ListingChanges, SyncError> {
        self.catalog.game(game_id)?;
        let listing = self.client.fetch_song_list(game_id)?;
        let on_site: Vec<(u64, &str)> = listing.iter().map(|s| (s.id, s.title.as_str())).collect();

        let taken: HashSet<u64> = self
            .catalog
            .site()
            .games
            .iter()
            .filter(|g| g.id != game_id)
            .flat_map(|g| g.songs.iter().map(|s| s.id))
            .collect();
        let game = self.catalog.game_mut(game_id)?;
        let changes = reconcile(&mut game.songs, &on_site, &taken, |id, title| Song::new(id, title));
        game.download_timestamps.push(unix_now());
        self.catalog.save()?;
        Ok(changes)
    }

    /// Refresh the song lists of the `max_count` stalest games.
    pub fn update_game_song_lists(
        &mut self,
        max_count: usize,
        progress: &mut dyn SyncProgress,
    ) -> Result<Vec<(u64, ListingChanges)>, SyncError> {
        let game_ids: Vec<u64> = self
            .catalog
            .games_ordered_by_staleness(Some(max_count))
            .iter()
            .map(|g| g.id)
            .collect();
        self.update_song_lists_of(&game_ids, progress)
    }

    /// Refresh the song lists of up to `max_count` games, picked at random
    /// among those holding fewer songs than the home page advertises.
    pub fn update_game_song_lists_by_using_homepage(
        &mut self,
        max_count: usize,
        progress: &mut dyn SyncProgress,
    ) -> Result<Vec<(u64, ListingChanges)>, SyncError> {
        let listing = self.client.fetch_game_list()?;
        let advertised: Vec<(u64, u32)> = listing
            .iter()
            .filter_map(|g| g.song_count.map(|count| (g.id, count)))
            .collect();
        if advertised.len() < listing.len() {
            log::debug!(
                "{} game(s) on the home page carry no song count.",
                listing.len() - advertised.len()
            );
        }
        let game_ids = self.catalog.under_fetched_games(&advertised, max_count);
        log::info!("{} game(s) selected with missing songs.", game_ids.len());
        self.update_song_lists_of(&game_ids, progress)
    }

    fn update_song_lists_of(
        &mut self,
        game_ids: &[u64],
        progress: &mut dyn SyncProgress,
    ) -> Result<Vec<(u64, ListingChanges)>, SyncError> {
        progress.start(game_ids.len());
        let mut results = Vec::with_capacity(game_ids.len());
        for &game_id in game_ids {
            progress.item(&format!("game {game_id}"));
            let changes = match self.update_game_song_list(game_id) {
                Ok(changes) => changes,
                Err(e) => {
                    progress.finish();
                    return Err(e);
                }
            };
            results.push((game_id, changes));
            progress.advance();
        }
        progress.finish();
        Ok(results)
    }
}

#[cfg(test)]
#[path = "tests/updater_tests.rs"]
mod tests;
