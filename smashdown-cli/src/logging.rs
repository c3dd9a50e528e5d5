//! Console logging, optionally teed into a file.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use log::{Level, LevelFilter};

/// Writes log lines to stdout and, when set, to a file with ANSI escapes
/// stripped.
struct TeeWriter {
    file: Option<File>,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        if let Some(file) = &mut self.file {
            file.write_all(&strip_ansi_escapes::strip(buf))?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        if let Some(file) = &mut self.file {
            file.flush()?;
        }
        Ok(())
    }
}

/// Install the global logger.
///
/// `quiet` keeps warnings and errors only, `verbose` adds debug messages with
/// timestamps. `RUST_LOG` applies when neither is given.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> io::Result<()> {
    let file = logfile
        .map(|path| OpenOptions::new().create(true).append(true).open(path))
        .transpose()?;

    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Info);
    if quiet {
        builder.filter_level(LevelFilter::Warn);
    } else if verbose {
        builder.filter_level(LevelFilter::Debug);
    } else {
        builder.parse_default_env();
    }

    builder
        .format(move |buf, record| {
            let prefix = match record.level() {
                Level::Error => "error: ",
                Level::Warn => "warning: ",
                _ => "",
            };
            if verbose {
                writeln!(
                    buf,
                    "{} {:<5} [{}] {}",
                    chrono::Local::now().format("%H:%M:%S%.3f"),
                    record.level(),
                    record.target(),
                    record.args()
                )
            } else {
                writeln!(buf, "{prefix}{}", record.args())
            }
        })
        .target(env_logger::Target::Pipe(Box::new(TeeWriter { file })))
        .init();
    Ok(())
}

/// Print an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}
