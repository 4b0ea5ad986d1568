//! libcurl-backed fetcher (blocking, one `Easy` handle per request).

use curl::easy::{Easy, WriteError};
use std::io;
use std::path::Path;

use super::{FetchError, FetchOptions, Fetcher};
use crate::storage::PartFile;

/// `Fetcher` that performs plain GETs with libcurl. Follows redirects.
/// Runs in the current thread.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    options: FetchOptions,
}

impl CurlFetcher {
    pub fn new(options: FetchOptions) -> Self {
        Self { options }
    }

    fn easy(&self, url: &str) -> Result<Easy, curl::Error> {
        let mut easy = Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.options.max_redirections)?;
        easy.connect_timeout(self.options.connect_timeout)?;
        easy.timeout(self.options.timeout)?;
        if let Some(ua) = &self.options.user_agent {
            easy.useragent(ua)?;
        }
        Ok(easy)
    }
}

/// Non-2xx is an error. Non-HTTP schemes (e.g. `file://`) report code 0.
fn check_status(easy: &mut Easy) -> Result<(), FetchError> {
    let code = easy.response_code()?;
    if code != 0 && !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }
    Ok(())
}

/// Stream the response body into `part`. A failed disk write aborts the
/// transfer and is parked in `write_error`.
fn perform_into(
    easy: &mut Easy,
    part: &mut PartFile,
    write_error: &mut Option<io::Error>,
) -> Result<(), curl::Error> {
    let mut transfer = easy.transfer();
    transfer.write_function(|data| match part.write_chunk(data) {
        Ok(()) => Ok(data.len()),
        Err(e) => {
            *write_error = Some(e);
            Ok(0) // abort transfer
        }
    })?;
    transfer.perform()
}

impl Fetcher for CurlFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut body = Vec::new();
        let mut easy = self.easy(url)?;
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok::<usize, WriteError>(data.len())
            })?;
            transfer.perform()?;
        }
        check_status(&mut easy)?;
        tracing::debug!(url, bytes = body.len(), "fetched");
        Ok(body)
    }

    fn fetch_to_file(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        let mut easy = self.easy(url)?;
        let mut part = PartFile::create(dest)?;
        let mut write_error = None;

        let outcome = perform_into(&mut easy, &mut part, &mut write_error)
            .map_err(|e| match write_error.take() {
                Some(io_err) => FetchError::Storage(io_err),
                None => FetchError::Curl(e),
            })
            .and_then(|()| check_status(&mut easy));

        match outcome {
            Ok(()) => {
                let written = part.finalize()?;
                tracing::debug!(url, path = %dest.display(), bytes = written, "fetched to file");
                Ok(written)
            }
            Err(e) => {
                part.abandon();
                Err(e)
            }
        }
    }
}
