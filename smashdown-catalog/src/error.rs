use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// How a song was looked up when the lookup missed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SongLookup {
    Id(u64),
    Location(PathBuf),
}

impl fmt::Display for SongLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id {}", id),
            Self::Location(path) => write!(f, "download location '{}'", path.display()),
        }
    }
}

/// Errors raised by catalog lookups and persistence.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Game {0} not found in catalog")]
    GameNotFound(u64),

    #[error("Song not found in catalog ({0})")]
    SongNotFound(SongLookup),

    #[error("Corrupt catalog {path}: {reason}")]
    CorruptCatalog { path: String, reason: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn corrupt(path: &Path, reason: impl Into<String>) -> Self {
        Self::CorruptCatalog {
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
