use std::path::PathBuf;

use smashdown_lib::repair_downloads;

use crate::CliError;

use super::{effective_config, open_existing_catalog};

pub(crate) fn run_repair(
    catalog: Option<PathBuf>,
    output_dir: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = effective_config(catalog, output_dir, None)?;
    let Some(mut catalog) = open_existing_catalog(&config)? else {
        return Ok(());
    };
    let adopted = repair_downloads(&mut catalog, &config.output_dir.value)?;
    if adopted == 0 {
        log::info!("No untracked song files found.");
    } else {
        log::info!(
            "{} song file(s) recorded from {}.",
            adopted,
            config.output_dir.value.display()
        );
    }
    Ok(())
}
