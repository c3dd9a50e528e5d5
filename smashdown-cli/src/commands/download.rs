use std::path::PathBuf;

use smashdown_lib::Downloader;

use crate::CliError;
use crate::progress::BarProgress;

use super::{effective_config, open_catalog, site_client};

pub(crate) enum DownloadTarget {
    Song { id: u64, force: bool },
    Random(usize),
}

pub(crate) fn run_download(
    catalog: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    target: DownloadTarget,
    quiet: bool,
) -> Result<(), CliError> {
    let config = effective_config(catalog, output_dir, None)?;
    let mut catalog = open_catalog(&config)?;
    let mut client = site_client(&config)?;
    let output_dir = config.output_dir.value.clone();
    let mut downloader = Downloader::new(&mut client, &mut catalog, &output_dir);

    match target {
        DownloadTarget::Song { id, force } => {
            if downloader.download_one_if_needed(id, force)?.is_none() {
                log::info!("Nothing to do.");
            }
        }
        DownloadTarget::Random(count) => {
            let downloaded = downloader.download_many(count, &mut BarProgress::new(quiet))?;
            log::info!(
                "{} song(s) downloaded into {}.",
                downloaded.len(),
                output_dir.display()
            );
        }
    }
    Ok(())
}
