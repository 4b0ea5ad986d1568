//! Per-asset outcomes of a materializer run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::fetch::FetchError;
use crate::locator::ResolvedAsset;

/// Failure local to one asset. Never aborts the run.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("{url} names a directory, not a file")]
    NoFileName { url: String },
    #[error("could not create directory {}: {source}", .path.display())]
    DirectoryCreation { path: PathBuf, source: io::Error },
    #[error("could not fetch {url}: {source}")]
    Fetch { url: String, source: FetchError },
}

#[derive(Debug)]
pub enum AssetOutcome {
    /// Fetched and written; byte count of the body.
    Downloaded { bytes: u64 },
    /// File already on disk, nothing fetched.
    AlreadyPresent,
    Failed(AssetError),
}

#[derive(Debug)]
pub struct AssetReport {
    pub asset: ResolvedAsset,
    pub outcome: AssetOutcome,
}

/// Everything one `Materializer::run` did, in processing order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub assets: Vec<AssetReport>,
}

impl RunReport {
    pub fn downloaded(&self) -> usize {
        self.count(|o| matches!(o, AssetOutcome::Downloaded { .. }))
    }

    pub fn already_present(&self) -> usize {
        self.count(|o| matches!(o, AssetOutcome::AlreadyPresent))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, AssetOutcome::Failed(_)))
    }

    /// Total bytes written during this run.
    pub fn bytes_downloaded(&self) -> u64 {
        self.assets
            .iter()
            .map(|r| match r.outcome {
                AssetOutcome::Downloaded { bytes } => bytes,
                _ => 0,
            })
            .sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&ResolvedAsset, &AssetError)> {
        self.assets.iter().filter_map(|r| match &r.outcome {
            AssetOutcome::Failed(e) => Some((&r.asset, e)),
            _ => None,
        })
    }

    /// True when every asset is on disk after the run.
    pub fn is_complete(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, pred: impl Fn(&AssetOutcome) -> bool) -> usize {
        self.assets.iter().filter(|r| pred(&r.outcome)).count()
    }
}
