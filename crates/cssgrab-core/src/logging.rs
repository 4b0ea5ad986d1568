//! Tracing setup for the `cssgrab` binary.
//!
//! Events always go to `cssgrab.log` under the XDG state directory. With
//! `--verbose` they are mirrored to stderr and the default filter drops to
//! `debug` for our own crates. `RUST_LOG` overrides the default filter.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_FILE: &str = "cssgrab.log";

/// Filter directives used when `RUST_LOG` is unset.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "info,cssgrab=debug,cssgrab_core=debug"
    } else {
        "warn,cssgrab=info,cssgrab_core=info"
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)))
}

/// `~/.local/state/cssgrab/cssgrab.log`. Creates the state directory.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cssgrab")?;
    let log_dir = xdg_dirs.get_state_home();
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("could not create log directory {}", log_dir.display()))?;
    Ok(log_dir.join(LOG_FILE))
}

fn open_log(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("could not open log file {}", path.display()))
}

/// Installs the global subscriber: log file, plus stderr when `verbose`.
/// Returns the log file path. On error nothing is installed and the caller
/// can fall back to [`init_logging_stderr`].
pub fn init_logging(verbose: bool) -> Result<PathBuf> {
    let path = log_file_path()?;
    let file = open_log(&path)?;

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);
    let stderr_layer = verbose.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;

    tracing::debug!(path = %path.display(), "logging initialized");
    Ok(path)
}

/// Stderr-only logging for when the state directory is unusable.
pub fn init_logging_stderr(verbose: bool) {
    let installed = tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
    if let Err(e) = installed {
        eprintln!("cssgrab: logging disabled: {e}");
    }
}
