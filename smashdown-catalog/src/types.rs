//! Data model types for the song catalog.
//!
//! These types mirror the persisted JSON schema one to one: a single `Site`
//! owning its `Game`s, each owning its `Song`s. Entities are never removed once
//! discovered; absence from the remote listing only flips
//! `is_deleted_from_site`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ── Document ────────────────────────────────────────────────────────────────

/// Top-level JSON document: `{ "site": { ... } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub site: Site,
}

// ── Site ────────────────────────────────────────────────────────────────────

/// The crawled website and every game discovered on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub base_url: String,
    /// Discovery order; not semantically significant.
    #[serde(default)]
    pub games: Vec<Game>,
    /// One entry per full game-list sync, oldest first.
    #[serde(default)]
    pub download_timestamps: Vec<i64>,
}

impl Site {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            games: Vec::new(),
            download_timestamps: Vec::new(),
        }
    }

    /// Time of the latest game-list sync, if any.
    pub fn last_checked(&self) -> Option<i64> {
        self.download_timestamps.last().copied()
    }
}

// ── Game ────────────────────────────────────────────────────────────────────

/// A game page on the site, with the songs listed on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub songs: Vec<Song>,
    #[serde(default)]
    pub is_deleted_from_site: bool,
    /// One entry per song-list sync of this game, oldest first.
    #[serde(default)]
    pub download_timestamps: Vec<i64>,
}

impl Game {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            songs: Vec::new(),
            is_deleted_from_site: false,
            download_timestamps: Vec::new(),
        }
    }

    pub fn with_songs(mut self, songs: Vec<Song>) -> Self {
        self.songs = songs;
        self
    }

    pub fn with_timestamps(mut self, timestamps: Vec<i64>) -> Self {
        self.download_timestamps = timestamps;
        self
    }

    pub fn deleted(mut self) -> Self {
        self.is_deleted_from_site = true;
        self
    }

    /// Time of the latest song-list sync for this game, if any.
    pub fn last_checked(&self) -> Option<i64> {
        self.download_timestamps.last().copied()
    }

    /// Number of songs still listed on the site.
    pub fn active_song_count(&self) -> usize {
        self.songs.iter().filter(|s| !s.is_deleted_from_site).count()
    }
}

// ── Song ────────────────────────────────────────────────────────────────────

/// A song entry, optionally carrying provenance of its downloaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub is_deleted_from_site: bool,
    #[serde(rename = "brstm_download_info", default)]
    pub download_info: Option<DownloadInfo>,
}

impl Song {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            is_deleted_from_site: false,
            download_info: None,
        }
    }

    pub fn with_download_info(mut self, info: DownloadInfo) -> Self {
        self.download_info = Some(info);
        self
    }

    pub fn deleted(mut self) -> Self {
        self.is_deleted_from_site = true;
        self
    }

    pub fn is_downloaded(&self) -> bool {
        self.download_info.is_some()
    }
}

/// Where and when a song's file was downloaded, and its content digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadInfo {
    /// Path relative to the download output directory.
    pub location: PathBuf,
    pub timestamp: i64,
    #[serde(rename = "file_md5")]
    pub content_digest: String,
}
