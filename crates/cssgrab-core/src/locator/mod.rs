//! Asset discovery: fetch a stylesheet once, scan it for `url(...)` tokens and
//! resolve every token to an absolute URL plus a local destination.

mod resolve;
mod scan;
mod stylesheet;

pub use resolve::resolve_reference;
pub use scan::extract_references;
pub use stylesheet::StylesheetReference;

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::fetch::{FetchError, Fetcher};

/// Errors that stop asset discovery before anything is resolved.
#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("invalid stylesheet URL {url}: {reason}")]
    InvalidSourceUrl { url: String, reason: String },
    #[error("failed to fetch stylesheet {url}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
}

/// A raw reference collected from the stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetReference {
    /// Token found inside `url(...)`, quotes stripped.
    Asset(String),
    /// The stylesheet itself, by file name. Always the last entry.
    Stylesheet(String),
}

impl AssetReference {
    pub fn as_str(&self) -> &str {
        match self {
            AssetReference::Asset(s) | AssetReference::Stylesheet(s) => s,
        }
    }
}

/// Where an asset comes from and where it goes on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedAsset {
    pub absolute_url: String,
    pub destination_dir: PathBuf,
    pub file_name: String,
}

impl ResolvedAsset {
    /// `destination_dir/file_name`.
    pub fn destination_path(&self) -> PathBuf {
        self.destination_dir.join(&self.file_name)
    }
}

/// Stylesheet snapshot plus the references found in it.
#[derive(Debug, Clone)]
pub struct AssetLocator {
    stylesheet: StylesheetReference,
    dest_root: PathBuf,
    references: Vec<AssetReference>,
}

impl AssetLocator {
    /// Fetches `source_url` once with `fetcher` and scans the body.
    pub fn new<F: Fetcher + ?Sized>(
        source_url: &str,
        dest_root: impl Into<PathBuf>,
        fetcher: &F,
    ) -> Result<Self, LocatorError> {
        // Validate before touching the network.
        let stylesheet = StylesheetReference::parse(source_url)?;
        let body = fetcher
            .fetch(source_url)
            .map_err(|source| LocatorError::Fetch {
                url: source_url.to_string(),
                source,
            })?;
        tracing::debug!(url = source_url, bytes = body.len(), "stylesheet fetched");
        Ok(Self::with_body(
            stylesheet,
            dest_root.into(),
            &String::from_utf8_lossy(&body),
        ))
    }

    /// Builds a locator from an already available stylesheet body.
    pub fn from_stylesheet(
        source_url: &str,
        dest_root: impl Into<PathBuf>,
        body: &str,
    ) -> Result<Self, LocatorError> {
        let stylesheet = StylesheetReference::parse(source_url)?;
        Ok(Self::with_body(stylesheet, dest_root.into(), body))
    }

    fn with_body(stylesheet: StylesheetReference, dest_root: PathBuf, body: &str) -> Self {
        let mut references: Vec<AssetReference> = extract_references(body)
            .into_iter()
            .map(AssetReference::Asset)
            .collect();
        tracing::debug!(
            stylesheet = stylesheet.source_url(),
            count = references.len(),
            "extracted asset references"
        );
        references.push(AssetReference::Stylesheet(
            stylesheet.file_name().to_string(),
        ));
        AssetLocator {
            stylesheet,
            dest_root,
            references,
        }
    }

    pub fn stylesheet(&self) -> &StylesheetReference {
        &self.stylesheet
    }

    pub fn dest_root(&self) -> &Path {
        &self.dest_root
    }

    /// References in extraction order; the stylesheet entry is last.
    pub fn references(&self) -> &[AssetReference] {
        &self.references
    }

    /// Resolves one raw `url(...)` token against this stylesheet.
    pub fn resolve(&self, raw: &str) -> ResolvedAsset {
        resolve_reference(&self.stylesheet, &self.dest_root, raw)
    }

    fn resolve_entry(&self, reference: &AssetReference) -> ResolvedAsset {
        match reference {
            AssetReference::Asset(raw) => self.resolve(raw),
            AssetReference::Stylesheet(name) => ResolvedAsset {
                absolute_url: self.stylesheet.source_url().to_string(),
                destination_dir: self.dest_root.clone(),
                file_name: name.clone(),
            },
        }
    }

    /// Resolved assets in reverse extraction order: the stylesheet comes
    /// first. Each call starts over from the stored references.
    pub fn list_resolved_assets(&self) -> impl Iterator<Item = ResolvedAsset> + '_ {
        self.references
            .iter()
            .rev()
            .map(move |reference| self.resolve_entry(reference))
    }
}
