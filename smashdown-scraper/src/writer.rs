//! Optional on-disk snapshots of fetched listing pages.

use std::fs;
use std::path::PathBuf;

use crate::error::ScrapeError;

/// Sink for raw listing pages.
pub trait HtmlWriter {
    fn write_home_page(&self, html: &str) -> Result<(), ScrapeError>;
    fn write_game_page(&self, game_id: u64, html: &str) -> Result<(), ScrapeError>;
}

/// Writes `home_<ts>.html` and `game_<id>_<ts>.html` into a directory.
///
/// The timestamp is fixed at construction so every page of one run shares it.
pub struct FileHtmlWriter {
    output_dir: PathBuf,
    timestamp: i64,
}

impl FileHtmlWriter {
    pub fn new(output_dir: impl Into<PathBuf>, timestamp: i64) -> Self {
        Self {
            output_dir: output_dir.into(),
            timestamp,
        }
    }

    fn write(&self, file_name: String, html: &str) -> Result<(), ScrapeError> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(file_name);
        fs::write(&path, html)?;
        log::info!("HTML page written into '{}'.", path.display());
        Ok(())
    }
}

impl HtmlWriter for FileHtmlWriter {
    fn write_home_page(&self, html: &str) -> Result<(), ScrapeError> {
        self.write(format!("home_{}.html", self.timestamp), html)
    }

    fn write_game_page(&self, game_id: u64, html: &str) -> Result<(), ScrapeError> {
        self.write(format!("game_{game_id}_{}.html", self.timestamp), html)
    }
}
