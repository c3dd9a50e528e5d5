use std::path::Path;

use smashdown_catalog::CatalogError;
use smashdown_scraper::ScrapeError;
use thiserror::Error;

/// Errors raised while synchronizing the catalog with the site or the disk.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Settings error: {0}")]
    Settings(String),
}

impl SyncError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }
}
