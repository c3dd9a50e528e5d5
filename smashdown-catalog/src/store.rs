//! In-memory catalog bound to an optional JSON file.
//!
//! The store is single-writer: whoever holds the `Catalog` owns the file for
//! the duration of the process. Every save rewrites the whole document.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::error::{CatalogError, SongLookup};
use crate::select;
use crate::stats::CatalogStats;
use crate::types::{CatalogDocument, DownloadInfo, Game, Site, Song};

/// Borrowed view used for serialization so saving never clones the site.
#[derive(Serialize)]
struct DocumentRef<'a> {
    site: &'a Site,
}

/// The song catalog: a `Site` aggregate plus its persistence target and the
/// random source used by sampling policies.
pub struct Catalog {
    site: Site,
    output_file: Option<PathBuf>,
    rng: StdRng,
}

impl Catalog {
    /// Wrap a site in a catalog with no output file and an OS-seeded RNG.
    pub fn new(site: Site) -> Self {
        Self {
            site,
            output_file: None,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Read a catalog document from `path` and bind the catalog to it.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        let document: CatalogDocument = serde_json::from_str(&contents)
            .map_err(|e| CatalogError::corrupt(path, e.to_string()))?;
        check_unique_ids(&document.site).map_err(|reason| CatalogError::corrupt(path, reason))?;
        log::info!("Catalog read from '{}'.", path.display());
        Ok(Self::new(document.site).with_output_file(path))
    }

    /// Load `path` if it exists, otherwise start an empty catalog for
    /// `base_url` that will be written to `path` on first save.
    pub fn load_or_create(path: &Path, base_url: &str) -> Result<Self, CatalogError> {
        if path.exists() {
            return Self::load(path);
        }
        log::info!(
            "No catalog at '{}', starting a new one for {}.",
            path.display(),
            base_url
        );
        Ok(Self::new(Site::new(base_url)).with_output_file(path))
    }

    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// Replace the random source (seeded in tests).
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn site_mut(&mut self) -> &mut Site {
        &mut self.site
    }

    /// Write the catalog to its output file. No-op when none is bound.
    pub fn save(&self) -> Result<(), CatalogError> {
        let Some(path) = &self.output_file else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| CatalogError::io(parent, e))?;
        }
        let serialized = serde_json::to_string_pretty(&DocumentRef { site: &self.site })?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serialized).map_err(|e| CatalogError::io(&tmp, e))?;
        fs::rename(&tmp, path).map_err(|e| CatalogError::io(path, e))?;
        log::info!("Catalog saved into '{}'.", path.display());
        Ok(())
    }

    // ── Lookups ─────────────────────────────────────────────────────────────

    pub fn game(&self, game_id: u64) -> Result<&Game, CatalogError> {
        self.site
            .games
            .iter()
            .find(|g| g.id == game_id)
            .ok_or(CatalogError::GameNotFound(game_id))
    }

    pub fn game_mut(&mut self, game_id: u64) -> Result<&mut Game, CatalogError> {
        self.site
            .games
            .iter_mut()
            .find(|g| g.id == game_id)
            .ok_or(CatalogError::GameNotFound(game_id))
    }

    pub fn song(&self, song_id: u64) -> Result<&Song, CatalogError> {
        self.site
            .games
            .iter()
            .flat_map(|g| g.songs.iter())
            .find(|s| s.id == song_id)
            .ok_or(CatalogError::SongNotFound(SongLookup::Id(song_id)))
    }

    pub fn song_mut(&mut self, song_id: u64) -> Result<&mut Song, CatalogError> {
        self.site
            .games
            .iter_mut()
            .flat_map(|g| g.songs.iter_mut())
            .find(|s| s.id == song_id)
            .ok_or(CatalogError::SongNotFound(SongLookup::Id(song_id)))
    }

    /// The game that owns `song_id`.
    pub fn game_containing_song(&self, song_id: u64) -> Result<&Game, CatalogError> {
        self.site
            .games
            .iter()
            .find(|g| g.songs.iter().any(|s| s.id == song_id))
            .ok_or(CatalogError::SongNotFound(SongLookup::Id(song_id)))
    }

    /// The game and song whose recorded download location equals `path`.
    pub fn song_by_download_location(&self, path: &Path) -> Result<(&Game, &Song), CatalogError> {
        self.site
            .games
            .iter()
            .flat_map(|g| g.songs.iter().map(move |s| (g, s)))
            .find(|(_, s)| {
                s.download_info
                    .as_ref()
                    .is_some_and(|info| info.location == path)
            })
            .ok_or_else(|| CatalogError::SongNotFound(SongLookup::Location(path.to_path_buf())))
    }

    /// Every song with download provenance, with its owning game.
    pub fn downloaded_songs(&self) -> impl Iterator<Item = (&Game, &Song, &DownloadInfo)> + '_ {
        self.site.games.iter().flat_map(|g| {
            g.songs
                .iter()
                .filter_map(move |s| s.download_info.as_ref().map(|info| (g, s, info)))
        })
    }

    // ── Selection ───────────────────────────────────────────────────────────

    /// Non-deleted games, never-checked first, then oldest-checked first.
    pub fn games_ordered_by_staleness(&self, limit: Option<usize>) -> Vec<&Game> {
        let candidates: Vec<&Game> = self
            .site
            .games
            .iter()
            .filter(|g| !g.is_deleted_from_site)
            .collect();
        select::stalest_first(candidates, limit)
    }

    /// Non-deleted songs without a download, in random order.
    pub fn songs_without_download(&mut self, limit: Option<usize>) -> Vec<&Song> {
        let candidates: Vec<&Song> = self
            .site
            .games
            .iter()
            .flat_map(|g| g.songs.iter())
            .filter(|s| !s.is_deleted_from_site && !s.is_downloaded())
            .collect();
        select::sample(candidates, &mut self.rng, limit)
    }

    /// Ids of catalog games holding fewer non-deleted songs than the site
    /// advertises, randomly sampled down to `limit`.
    ///
    /// `advertised` pairs a game id with its song count on the home page.
    /// Ids unknown to the catalog are ignored.
    pub fn under_fetched_games(&mut self, advertised: &[(u64, u32)], limit: usize) -> Vec<u64> {
        let candidates: Vec<u64> = advertised
            .iter()
            .filter_map(|&(game_id, count)| {
                let game = self.site.games.iter().find(|g| g.id == game_id)?;
                let recorded = game.active_song_count();
                (recorded < count as usize).then_some(game_id)
            })
            .collect();
        select::sample(candidates, &mut self.rng, Some(limit))
    }

    pub fn statistics(&self) -> CatalogStats {
        CatalogStats::collect(&self.site)
    }
}

/// Game ids must be unique within the site, song ids across all games.
fn check_unique_ids(site: &Site) -> Result<(), String> {
    let mut game_ids = HashSet::new();
    let mut song_ids = HashSet::new();
    for game in &site.games {
        if !game_ids.insert(game.id) {
            return Err(format!("duplicate game id {}", game.id));
        }
        for song in &game.songs {
            if !song_ids.insert(song.id) {
                return Err(format!("duplicate song id {} (game {})", song.id, game.id));
            }
        }
    }
    Ok(())
}
