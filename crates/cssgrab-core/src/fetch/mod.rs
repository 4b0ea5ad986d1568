//! Fetch-by-URL capability used by the locator (stylesheet body) and the
//! materializer (asset files).
//!
//! The core only depends on the `Fetcher` trait; `CurlFetcher` is the libcurl
//! implementation used by the CLI. Tests plug in an in-memory fetcher.

mod easy;
mod error;

pub use easy::CurlFetcher;
pub use error::FetchError;

use std::path::Path;
use std::time::Duration;

/// Transfer settings for `CurlFetcher`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub connect_timeout: Duration,
    /// Upper bound for a whole transfer.
    pub timeout: Duration,
    pub max_redirections: u32,
    pub user_agent: Option<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            timeout: Duration::from_secs(300),
            max_redirections: 10,
            user_agent: None,
        }
    }
}

/// Fetch a URL into memory or onto disk. One attempt per call; no retries.
pub trait Fetcher {
    /// GET `url` and return the response body.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;

    /// GET `url` and write the body to `dest`. `dest` must only appear once the
    /// body is complete. Returns the number of bytes written.
    fn fetch_to_file(&self, url: &str, dest: &Path) -> Result<u64, FetchError>;
}
