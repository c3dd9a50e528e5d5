use std::fmt::Display;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use smashdown_lib::settings::{Resolved, ValueSource};
use smashdown_lib::settings_path;

use crate::CliError;
use crate::logging::log_blank;

use super::effective_config;

fn show_value(name: &str, value: impl Display, source: ValueSource) {
    log::info!(
        "  {:<12} {} {}",
        name,
        value.if_supports_color(Stdout, |t| t.cyan()),
        format!("({source})").if_supports_color(Stdout, |t| t.dimmed()),
    );
}

fn show_path(name: &str, resolved: &Resolved<PathBuf>) {
    show_value(name, resolved.value.display(), resolved.source);
}

/// Show the effective configuration and where each value came from.
pub(crate) fn run_config_show(catalog: Option<PathBuf>) -> Result<(), CliError> {
    let path = settings_path();
    let config = effective_config(catalog, None, None)?;

    log::info!(
        "{}",
        "Smashdown Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log_blank();
    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log_blank();

    show_value("base_url", &config.base_url.value, config.base_url.source);
    show_value("user_agent", &config.user_agent.value, config.user_agent.source);
    let (min, max) = config.nap.value;
    show_value("nap", format!("{min}-{max} s"), config.nap.source);
    show_path("catalog", &config.catalog);
    show_path("output_dir", &config.output_dir);
    match &config.html_dir.value {
        Some(dir) => show_value("html_dir", dir.display(), config.html_dir.source),
        None => show_value("html_dir", "(none)", config.html_dir.source),
    }
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    println!("{}", settings_path().display());
}
