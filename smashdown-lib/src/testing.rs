//! In-memory site used by the unit tests.

use std::collections::HashMap;

use smashdown_catalog::{Catalog, Game, Site, Song};
use smashdown_scraper::{GameInfo, ScrapeError, SiteClient, SongInfo};

pub(crate) const BASE_URL: &str = "http://idontexist.net/";

/// Serves fixed listings and song files, and records every call.
#[derive(Default)]
pub(crate) struct FakeClient {
    pub games: Vec<GameInfo>,
    pub songs: HashMap<u64, Vec<SongInfo>>,
    pub files: HashMap<u64, Vec<u8>>,
    pub calls: Vec<String>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// List a game whose page shows `song_ids`; the home page advertises
    /// that many songs.
    pub fn with_game(mut self, id: u64, song_ids: &[u64]) -> Self {
        self.games.push(GameInfo {
            id,
            title: format!("Game {id}"),
            song_count: Some(song_ids.len() as u32),
        });
        self.songs.insert(
            id,
            song_ids
                .iter()
                .map(|&sid| SongInfo {
                    id: sid,
                    title: format!("Song {sid}"),
                })
                .collect(),
        );
        self
    }

    /// Override the song count the home page advertises for `id`.
    pub fn with_advertised_count(mut self, id: u64, count: Option<u32>) -> Self {
        if let Some(game) = self.games.iter_mut().find(|g| g.id == id) {
            game.song_count = count;
        }
        self
    }

    pub fn with_file(mut self, song_id: u64, bytes: &[u8]) -> Self {
        self.files.insert(song_id, bytes.to_vec());
        self
    }

    fn not_found(path: String) -> ScrapeError {
        ScrapeError::Status {
            status: 404,
            url: format!("{BASE_URL}{path}"),
        }
    }
}

/// Deterministic payload for songs without an explicit file.
pub(crate) fn payload_for(song_id: u64) -> Vec<u8> {
    format!("RSTM payload of song {song_id}").into_bytes()
}

impl SiteClient for FakeClient {
    fn fetch_game_list(&mut self) -> Result<Vec<GameInfo>, ScrapeError> {
        self.calls.push("home".to_string());
        Ok(self.games.clone())
    }

    fn fetch_song_list(&mut self, game_id: u64) -> Result<Vec<SongInfo>, ScrapeError> {
        self.calls.push(format!("game/{game_id}"));
        self.songs
            .get(&game_id)
            .cloned()
            .ok_or_else(|| Self::not_found(format!("game/{game_id}")))
    }

    fn fetch_song_file(&mut self, song_id: u64) -> Result<Vec<u8>, ScrapeError> {
        self.calls.push(format!("brstm/{song_id}"));
        if let Some(bytes) = self.files.get(&song_id) {
            return Ok(bytes.clone());
        }
        let listed = self.songs.values().flatten().any(|s| s.id == song_id);
        if listed {
            Ok(payload_for(song_id))
        } else {
            Err(Self::not_found(format!("brstm/{song_id}")))
        }
    }
}

/// Site holding `games`, each a game id and the ids of its songs.
pub(crate) fn site_with(games: &[(u64, &[u64])]) -> Site {
    let mut site = Site::new(BASE_URL);
    site.games = games
        .iter()
        .map(|&(id, song_ids)| {
            Game::new(id, format!("Game {id}")).with_songs(
                song_ids
                    .iter()
                    .map(|&sid| Song::new(sid, format!("Song {sid}")))
                    .collect(),
            )
        })
        .collect();
    site
}

pub(crate) fn catalog_with(games: &[(u64, &[u64])]) -> Catalog {
    Catalog::new(site_with(games))
}
