//! Synchronization of the song catalog with the site and the download folder.

pub mod downloader;
pub mod error;
pub mod hasher;
pub mod naming;
pub mod progress;
pub mod settings;
pub mod updater;
pub mod verify;

#[cfg(test)]
pub(crate) mod testing;

pub use downloader::Downloader;
pub use error::SyncError;
pub use hasher::{digest_bytes, file_digest};
pub use naming::{game_dir, slugify, song_path};
pub use progress::{LogProgress, SilentProgress, SyncProgress};
pub use settings::{EffectiveConfig, Settings, settings_path};
pub use updater::{ListingChanges, Updater};
pub use verify::{VerifyIssue, VerifyStats, find_orphan_files, repair_downloads, verify_downloads};

/// Current time as whole seconds since the Unix epoch.
pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}
