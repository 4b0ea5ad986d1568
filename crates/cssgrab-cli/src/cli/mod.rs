//! CLI for cssgrab.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use cssgrab_core::config;
use cssgrab_core::fetch::CurlFetcher;
use std::path::{Path, PathBuf};

use commands::{run_completions, run_fetch, run_list};

/// Top-level CLI for cssgrab.
#[derive(Debug, Parser)]
#[command(name = "cssgrab")]
#[command(about = "cssgrab: mirror a stylesheet and every asset it references", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of ~/.config/cssgrab/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Mirror log events to stderr and log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List the resolved assets of a stylesheet (stylesheet first).
    List {
        /// Absolute HTTP/HTTPS URL of the stylesheet.
        url: String,
        /// Destination root used to compute local paths.
        #[arg(long, default_value = ".", value_name = "DIR")]
        dest: PathBuf,
        /// Print a JSON array instead of one line per asset.
        #[arg(long)]
        json: bool,
    },

    /// Download a stylesheet and its assets into DEST, skipping files already there.
    Fetch {
        /// Absolute HTTP/HTTPS URL of the stylesheet.
        url: String,
        /// Destination root directory (created if missing).
        dest: PathBuf,
    },

    /// Print shell completions to stdout.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Dispatches the parsed subcommand.
    pub fn run(self) -> Result<()> {
        match self.command {
            CliCommand::List { url, dest, json } => {
                run_list(&fetcher(self.config.as_deref())?, &url, &dest, json)
            }
            CliCommand::Fetch { url, dest } => {
                run_fetch(&fetcher(self.config.as_deref())?, &url, &dest)
            }
            CliCommand::Completions { shell } => run_completions(shell),
        }
    }
}

/// Fetcher configured from `--config` or the default config file.
fn fetcher(config_path: Option<&Path>) -> Result<CurlFetcher> {
    let cfg = match config_path {
        Some(path) => config::load_from_path(path)?,
        None => config::load_or_init()?,
    };
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(CurlFetcher::new(cfg.fetch_options()))
}

#[cfg(test)]
mod tests;
