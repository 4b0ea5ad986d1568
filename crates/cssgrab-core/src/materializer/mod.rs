//! Materializer: puts every resolved asset on disk.
//!
//! Walks `AssetLocator::list_resolved_assets()` (stylesheet first), creates the
//! destination directory for each asset, skips files that are already present
//! and fetches the rest. Failures are recorded per asset; the run always
//! visits every asset.

mod dirs;
mod report;

pub use dirs::ensure_dir;
pub use report::{AssetError, AssetOutcome, AssetReport, RunReport};

use std::fs::File;
use std::path::Path;

use crate::fetch::Fetcher;
use crate::locator::{AssetLocator, ResolvedAsset};

/// Sequential, single-threaded download of a locator's assets.
pub struct Materializer<'a, F: Fetcher + ?Sized> {
    locator: &'a AssetLocator,
    fetcher: &'a F,
}

impl<'a, F: Fetcher + ?Sized> Materializer<'a, F> {
    pub fn new(locator: &'a AssetLocator, fetcher: &'a F) -> Self {
        Self { locator, fetcher }
    }

    /// Materializes all assets under the locator's destination root.
    /// Running it again over the same tree fetches nothing.
    pub fn run(&self) -> RunReport {
        let root = self.locator.dest_root();
        if let Err(e) = ensure_dir(root) {
            // Every asset below will report its own failure.
            tracing::warn!(path = %root.display(), "could not create destination root: {}", e);
        }

        let assets = self
            .locator
            .list_resolved_assets()
            .map(|asset| {
                let outcome = self.materialize(&asset);
                AssetReport { asset, outcome }
            })
            .collect();
        RunReport { assets }
    }

    fn materialize(&self, asset: &ResolvedAsset) -> AssetOutcome {
        if asset.file_name.is_empty() {
            let err = AssetError::NoFileName {
                url: asset.absolute_url.clone(),
            };
            tracing::warn!("skipping asset: {}", err);
            return AssetOutcome::Failed(err);
        }

        if let Err(source) = ensure_dir(&asset.destination_dir) {
            let err = AssetError::DirectoryCreation {
                path: asset.destination_dir.clone(),
                source,
            };
            tracing::warn!(url = %asset.absolute_url, "skipping asset: {}", err);
            return AssetOutcome::Failed(err);
        }

        let dest = asset.destination_path();
        if is_present(&dest) {
            tracing::debug!(path = %dest.display(), "already present, not fetching");
            return AssetOutcome::AlreadyPresent;
        }

        match self.fetcher.fetch_to_file(&asset.absolute_url, &dest) {
            Ok(bytes) => {
                tracing::info!(url = %asset.absolute_url, path = %dest.display(), bytes, "downloaded");
                AssetOutcome::Downloaded { bytes }
            }
            Err(source) => {
                let err = AssetError::Fetch {
                    url: asset.absolute_url.clone(),
                    source,
                };
                tracing::warn!("skipping asset: {}", err);
                AssetOutcome::Failed(err)
            }
        }
    }
}

/// A regular file at `path` that we can open for reading.
fn is_present(path: &Path) -> bool {
    File::open(path)
        .and_then(|f| f.metadata())
        .map(|m| m.is_file())
        .unwrap_or(false)
}
