use smashdown_catalog::CatalogError;
use smashdown_lib::SyncError;
use smashdown_scraper::ScrapeError;
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Downloaded files that do not match the catalog
    #[error("Verification failed: {0} problem(s) found")]
    VerifyFailed(usize),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
