use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use smashdown_lib::{VerifyIssue, find_orphan_files, verify_downloads};

use crate::CliError;
use crate::logging::log_blank;

use super::{effective_config, open_existing_catalog};

pub(crate) fn run_verify(
    catalog: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    orphans: bool,
) -> Result<(), CliError> {
    let config = effective_config(catalog, output_dir, None)?;
    let Some(catalog) = open_existing_catalog(&config)? else {
        return Ok(());
    };
    let output_dir = &config.output_dir.value;

    let stats = verify_downloads(&catalog, output_dir);

    log::info!(
        "{}",
        "Download Verification".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Directory: {}", output_dir.display());
    log_blank();
    log::info!("  Checked:          {:>8}", stats.checked);
    log::info!(
        "  Verified:         {:>8}",
        stats.verified.if_supports_color(Stdout, |t| t.green())
    );
    log::info!("  Missing:          {:>8}", stats.missing);
    log::info!("  Digest mismatch:  {:>8}", stats.digest_mismatch);
    log::info!("  Unreadable:       {:>8}", stats.errors);

    if !stats.is_clean() {
        log_blank();
        for issue in &stats.issues {
            let line = match issue {
                VerifyIssue::Missing { song_id, location } => {
                    format!("song {song_id}: missing {}", location.display())
                }
                VerifyIssue::DigestMismatch {
                    song_id,
                    location,
                    expected,
                    actual,
                } => format!(
                    "song {song_id}: {} has md5 {actual}, expected {expected}",
                    location.display()
                ),
                VerifyIssue::Unreadable {
                    song_id,
                    location,
                    message,
                } => format!("song {song_id}: cannot read {}: {message}", location.display()),
            };
            log::info!("  {}", line.if_supports_color(Stdout, |t| t.red()));
        }
    }

    if orphans {
        let orphans = find_orphan_files(&catalog, output_dir)?;
        log_blank();
        log::info!("  Orphan files:     {:>8}", orphans.len());
        for path in &orphans {
            log::info!(
                "    {}",
                path.display().if_supports_color(Stdout, |t| t.yellow())
            );
        }
        if !orphans.is_empty() {
            log::info!("  Run 'smashdown repair' to adopt files matching a song.");
        }
    }

    if stats.is_clean() {
        Ok(())
    } else {
        Err(CliError::VerifyFailed(stats.issues.len()))
    }
}
