//! Sequential writer for a `.part` temp file.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::temp_path;

/// Open `.part` file for one download. Dropping it without `finalize` leaves
/// the temp file behind; call `abandon` on failure paths.
pub struct PartFile {
    file: File,
    temp_path: PathBuf,
    final_path: PathBuf,
    written: u64,
}

impl PartFile {
    /// Create (or truncate) the temp file for `final_path`.
    pub fn create(final_path: &Path) -> io::Result<Self> {
        let temp_path = temp_path(final_path);
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        Ok(PartFile {
            file,
            temp_path,
            final_path: final_path.to_path_buf(),
            written: 0,
        })
    }

    /// Append `data` to the temp file.
    pub fn write_chunk(&mut self, data: &[u8]) -> io::Result<()> {
        self.file.write_all(data)?;
        self.written += data.len() as u64;
        Ok(())
    }

    /// Flush, then atomically rename the temp file to the final path.
    /// Returns the number of bytes written. On failure the temp file is
    /// removed and the final path is left untouched.
    pub fn finalize(mut self) -> io::Result<u64> {
        if let Err(e) = self.file.flush().and_then(|()| self.file.sync_all()) {
            self.abandon();
            return Err(e);
        }
        let PartFile {
            file,
            temp_path,
            final_path,
            written,
        } = self;
        drop(file);
        if let Err(e) = std::fs::rename(&temp_path, &final_path) {
            remove_temp(&temp_path);
            return Err(e);
        }
        Ok(written)
    }

    /// Close and delete the temp file; errors are ignored.
    pub fn abandon(self) {
        let PartFile { file, temp_path, .. } = self;
        drop(file);
        remove_temp(&temp_path);
    }
}

fn remove_temp(temp_path: &Path) {
    if let Err(e) = std::fs::remove_file(temp_path) {
        tracing::debug!(path = %temp_path.display(), "could not remove temp file: {}", e);
    }
}
