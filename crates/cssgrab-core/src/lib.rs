pub mod config;
pub mod logging;

pub mod fetch;
pub mod locator;
pub mod materializer;
pub mod storage;

pub use fetch::{CurlFetcher, FetchError, FetchOptions, Fetcher};
pub use locator::{AssetLocator, LocatorError, ResolvedAsset};
pub use materializer::{Materializer, RunReport};
