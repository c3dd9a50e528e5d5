//! Fetching song files and recording their provenance.

use std::fs;
use std::path::{Path, PathBuf};

use smashdown_catalog::{Catalog, DownloadInfo};
use smashdown_scraper::SiteClient;

use crate::error::SyncError;
use crate::hasher::digest_bytes;
use crate::naming::song_path;
use crate::progress::SyncProgress;
use crate::unix_now;

pub struct Downloader<'a, C: SiteClient + ?Sized> {
    client: &'a mut C,
    catalog: &'a mut Catalog,
    output_dir: PathBuf,
}

impl<'a, C: SiteClient + ?Sized> Downloader<'a, C> {
    pub fn new(client: &'a mut C, catalog: &'a mut Catalog, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            catalog,
            output_dir: output_dir.into(),
        }
    }

    /// Download one song, write it under the output directory, then record
    /// and save its provenance.
    ///
    /// The file hits the disk before the catalog does: an interruption in
    /// between leaves an orphan file, never a record without a file.
    pub fn download_one(&mut self, song_id: u64) -> Result<DownloadInfo, SyncError> {
        let game = self.catalog.game_containing_song(song_id)?;
        let song = self.catalog.song(song_id)?;
        let location = song_path(game, song);

        let bytes = self.client.fetch_song_file(song_id)?;
        let content_digest = digest_bytes(&bytes);
        write_file(&self.output_dir.join(&location), &bytes)?;

        let info = DownloadInfo {
            location,
            timestamp: unix_now(),
            content_digest,
        };
        self.catalog.song_mut(song_id)?.download_info = Some(info.clone());
        log::info!(
            "Music saved into '{}' (md5 {}).",
            info.location.display(),
            info.content_digest
        );
        self.catalog.save()?;
        Ok(info)
    }

    /// Like [`download_one`](Self::download_one), but skips songs already
    /// downloaded unless `force` is set. Returns `None` when skipped.
    pub fn download_one_if_needed(
        &mut self,
        song_id: u64,
        force: bool,
    ) -> Result<Option<DownloadInfo>, SyncError> {
        let song = self.catalog.song(song_id)?;
        if song.is_downloaded() && !force {
            log::info!("Song {song_id} already downloaded, use force to fetch it again.");
            return Ok(None);
        }
        self.download_one(song_id).map(Some)
    }

    /// Download up to `max_count` random songs that have no file yet.
    pub fn download_many(
        &mut self,
        max_count: usize,
        progress: &mut dyn SyncProgress,
    ) -> Result<Vec<DownloadInfo>, SyncError> {
        let song_ids: Vec<u64> = self
            .catalog
            .songs_without_download(Some(max_count))
            .iter()
            .map(|s| s.id)
            .collect();
        progress.start(song_ids.len());
        let mut downloaded = Vec::with_capacity(song_ids.len());
        for song_id in song_ids {
            progress.item(&format!("song {song_id}"));
            match self.download_one(song_id) {
                Ok(info) => downloaded.push(info),
                Err(e) => {
                    progress.finish();
                    return Err(e);
                }
            }
            progress.advance();
        }
        progress.finish();
        Ok(downloaded)
    }
}

fn write_file(path: &Path, data: &[u8]) -> Result<(), SyncError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| SyncError::io(parent, e))?;
    }
    fs::write(path, data).map_err(|e| SyncError::io(path, e))
}

#[cfg(test)]
#[path = "tests/downloader_tests.rs"]
mod tests;
