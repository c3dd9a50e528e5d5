//! Optional user settings (`~/.config/smashdown/settings.toml`).
//!
//! Every value is resolved with the same priority chain:
//!
//! 1. Command-line flag
//! 2. Settings file
//! 3. Built-in default

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use smashdown_scraper::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};

use crate::error::SyncError;

pub const DEFAULT_CATALOG_FILE: &str = "db.json";
pub const DEFAULT_OUTPUT_DIR: &str = "songs";
pub const DEFAULT_NAP_SECS: (u64, u64) = (60, 120);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub site: SiteSettings,
    pub paths: PathSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    pub base_url: Option<String>,
    pub nap_min_secs: Option<u64>,
    pub nap_max_secs: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    pub catalog: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub html_dir: Option<PathBuf>,
}

/// Canonical path to the settings file.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("smashdown").join("settings.toml")
}

impl Settings {
    /// Load the settings file at its canonical path.
    pub fn load() -> Result<Self, SyncError> {
        Self::load_from(&settings_path())
    }

    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, SyncError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(SyncError::io(path, e)),
        };
        toml::from_str(&contents)
            .map_err(|e| SyncError::settings(format!("{}: {e}", path.display())))
    }

    /// Nap range from the file, if either bound is given. A missing bound
    /// comes from the default range, clamped so that `min <= max`.
    pub fn nap_range(&self) -> Option<(u64, u64)> {
        let (default_min, default_max) = DEFAULT_NAP_SECS;
        match (self.site.nap_min_secs, self.site.nap_max_secs) {
            (None, None) => None,
            (Some(min), Some(max)) => Some((min, max)),
            (Some(min), None) => Some((min, default_max.max(min))),
            (None, Some(max)) => Some((default_min.min(max), max)),
        }
    }
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    CommandLine,
    SettingsFile,
    Default,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::CommandLine => "command line",
            Self::SettingsFile => "settings file",
            Self::Default => "default",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: ValueSource,
}

/// Pick the command-line value, else the file value, else the default.
pub fn resolve<T>(cli: Option<T>, file: Option<T>, default: impl FnOnce() -> T) -> Resolved<T> {
    match (cli, file) {
        (Some(value), _) => Resolved {
            value,
            source: ValueSource::CommandLine,
        },
        (None, Some(value)) => Resolved {
            value,
            source: ValueSource::SettingsFile,
        },
        (None, None) => Resolved {
            value: default(),
            source: ValueSource::Default,
        },
    }
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub base_url: Resolved<String>,
    pub user_agent: Resolved<String>,
    pub nap: Resolved<(u64, u64)>,
    pub catalog: Resolved<PathBuf>,
    pub output_dir: Resolved<PathBuf>,
    /// No snapshots are written when unset.
    pub html_dir: Resolved<Option<PathBuf>>,
}

/// Values given on the command line; `None` means not given.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub catalog: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub html_dir: Option<PathBuf>,
}

impl EffectiveConfig {
    pub fn resolve(cli: CliOverrides, settings: &Settings) -> Self {
        let site = &settings.site;
        let paths = &settings.paths;
        Self {
            base_url: resolve(None, site.base_url.clone(), || DEFAULT_BASE_URL.to_string()),
            user_agent: resolve(None, site.user_agent.clone(), || {
                DEFAULT_USER_AGENT.to_string()
            }),
            nap: resolve(None, settings.nap_range(), || DEFAULT_NAP_SECS),
            catalog: resolve(cli.catalog, paths.catalog.clone(), || {
                PathBuf::from(DEFAULT_CATALOG_FILE)
            }),
            output_dir: resolve(cli.output_dir, paths.output_dir.clone(), || {
                PathBuf::from(DEFAULT_OUTPUT_DIR)
            }),
            html_dir: resolve(cli.html_dir.map(Some), paths.html_dir.clone().map(Some), || None),
        }
    }
}
