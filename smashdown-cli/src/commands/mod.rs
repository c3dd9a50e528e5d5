pub(crate) mod config;
pub(crate) mod download;
pub(crate) mod repair;
pub(crate) mod stats;
pub(crate) mod update;
pub(crate) mod verify;

use std::path::PathBuf;

use smashdown_catalog::Catalog;
use smashdown_lib::settings::CliOverrides;
use smashdown_lib::{EffectiveConfig, Settings, unix_now};
use smashdown_scraper::{ClientOptions, FileHtmlWriter, HttpSiteClient};

use crate::CliError;

/// Resolve the run's configuration from flags and the settings file.
pub(crate) fn effective_config(
    catalog: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    html_dir: Option<PathBuf>,
) -> Result<EffectiveConfig, CliError> {
    let settings = Settings::load()?;
    Ok(EffectiveConfig::resolve(
        CliOverrides {
            catalog,
            output_dir,
            html_dir,
        },
        &settings,
    ))
}

/// Open the catalog, starting an empty one when the file does not exist yet.
pub(crate) fn open_catalog(config: &EffectiveConfig) -> Result<Catalog, CliError> {
    Ok(Catalog::load_or_create(
        &config.catalog.value,
        &config.base_url.value,
    )?)
}

/// Open an existing catalog, or `None` (with a hint) when there is none.
pub(crate) fn open_existing_catalog(config: &EffectiveConfig) -> Result<Option<Catalog>, CliError> {
    let path = &config.catalog.value;
    if !path.exists() {
        log::warn!("No catalog found at {}", path.display());
        log::info!("Run 'smashdown update-game-list' to create one.");
        return Ok(None);
    }
    Ok(Some(Catalog::load(path)?))
}

/// HTTP client for the configured site, writing page snapshots when an HTML
/// directory is configured.
pub(crate) fn site_client(config: &EffectiveConfig) -> Result<HttpSiteClient, CliError> {
    let (min, max) = config.nap.value;
    let client = HttpSiteClient::new(ClientOptions {
        base_url: config.base_url.value.clone(),
        user_agent: config.user_agent.value.clone(),
        nap: Some((min, max)),
        ..ClientOptions::default()
    })?;
    Ok(match &config.html_dir.value {
        Some(dir) => client.with_writer(Box::new(FileHtmlWriter::new(dir, unix_now()))),
        None => client,
    })
}
