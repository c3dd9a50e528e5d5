//! Checks of downloaded files against the catalog, and recovery of files
//! written by an interrupted download.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use smashdown_catalog::{Catalog, DownloadInfo};

use crate::error::SyncError;
use crate::hasher::file_digest;
use crate::naming::song_path;
use crate::unix_now;

/// A recorded download that does not check out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyIssue {
    Missing {
        song_id: u64,
        location: PathBuf,
    },
    DigestMismatch {
        song_id: u64,
        location: PathBuf,
        expected: String,
        actual: String,
    },
    Unreadable {
        song_id: u64,
        location: PathBuf,
        message: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyStats {
    pub checked: usize,
    pub verified: usize,
    pub missing: usize,
    pub digest_mismatch: usize,
    pub errors: usize,
    pub issues: Vec<VerifyIssue>,
}

impl VerifyStats {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Recompute the digest of every recorded download and compare it to the
/// catalog.
pub fn verify_downloads(catalog: &Catalog, output_dir: &Path) -> VerifyStats {
    let mut stats = VerifyStats::default();
    for (_, song, info) in catalog.downloaded_songs() {
        stats.checked += 1;
        let path = output_dir.join(&info.location);
        match file_digest(&path) {
            Ok(actual) if actual == info.content_digest => stats.verified += 1,
            Ok(actual) => {
                log::warn!(
                    "Digest mismatch for song {} at '{}': expected {}, got {}.",
                    song.id,
                    path.display(),
                    info.content_digest,
                    actual
                );
                stats.digest_mismatch += 1;
                stats.issues.push(VerifyIssue::DigestMismatch {
                    song_id: song.id,
                    location: info.location.clone(),
                    expected: info.content_digest.clone(),
                    actual,
                });
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::warn!("Missing file for song {}: '{}'.", song.id, path.display());
                stats.missing += 1;
                stats.issues.push(VerifyIssue::Missing {
                    song_id: song.id,
                    location: info.location.clone(),
                });
            }
            Err(e) => {
                log::warn!("Cannot read '{}': {}", path.display(), e);
                stats.errors += 1;
                stats.issues.push(VerifyIssue::Unreadable {
                    song_id: song.id,
                    location: info.location.clone(),
                    message: e.to_string(),
                });
            }
        }
    }
    log::info!(
        "Verified {} of {} downloaded song(s).",
        stats.verified,
        stats.checked
    );
    stats
}

/// Files under `output_dir` (game directory, then song file) that no song
/// records as its download location. Paths are relative and sorted.
pub fn find_orphan_files(catalog: &Catalog, output_dir: &Path) -> Result<Vec<PathBuf>, SyncError> {
    let recorded: HashSet<&Path> = catalog
        .downloaded_songs()
        .map(|(_, _, info)| info.location.as_path())
        .collect();

    let mut orphans = Vec::new();
    for entry in read_dir_sorted(output_dir)? {
        let Some(name) = entry.file_name() else {
            continue;
        };
        let relative = PathBuf::from(name);
        if entry.is_dir() {
            for inner in read_dir_sorted(&entry)? {
                let Some(inner_name) = inner.file_name() else {
                    continue;
                };
                let relative = relative.join(inner_name);
                if inner.is_file() && !recorded.contains(relative.as_path()) {
                    orphans.push(relative);
                }
            }
        } else if !recorded.contains(relative.as_path()) {
            orphans.push(relative);
        }
    }
    Ok(orphans)
}

fn read_dir_sorted(dir: &Path) -> Result<Vec<PathBuf>, SyncError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(SyncError::io(dir, e)),
    };
    let mut paths = entries
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| SyncError::io(dir, e))?;
    paths.sort();
    Ok(paths)
}

/// Record provenance for live songs whose file already sits at its expected
/// path but that the catalog does not know as downloaded. Returns the number
/// of songs adopted; the catalog is saved when any were.
pub fn repair_downloads(catalog: &mut Catalog, output_dir: &Path) -> Result<usize, SyncError> {
    let candidates: Vec<(u64, PathBuf)> = catalog
        .site()
        .games
        .iter()
        .flat_map(|g| g.songs.iter().map(move |s| (g, s)))
        .filter(|(_, s)| !s.is_deleted_from_site && !s.is_downloaded())
        .map(|(g, s)| (s.id, song_path(g, s)))
        .filter(|(_, location)| output_dir.join(location).is_file())
        .collect();

    for (song_id, location) in &candidates {
        let path = output_dir.join(location);
        let content_digest = file_digest(&path).map_err(|e| SyncError::io(&path, e))?;
        log::info!("Adopting '{}' for song {} (md5 {}).", path.display(), song_id, content_digest);
        catalog.song_mut(*song_id)?.download_info = Some(DownloadInfo {
            location: location.clone(),
            timestamp: unix_now(),
            content_digest,
        });
    }
    if !candidates.is_empty() {
        catalog.save()?;
    }
    Ok(candidates.len())
}

#[cfg(test)]
#[path = "tests/verify_tests.rs"]
mod tests;
