//! Disk side of a download: `.part` temp files and atomic finalize.
//!
//! Asset bodies are streamed into `<name>.part` next to the final path and
//! renamed into place only once the transfer succeeded, so a file that exists
//! under its final name is always complete.

mod writer;

pub use writer::PartFile;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `logo.png` → `logo.png.part`).
pub fn temp_path(final_path: &std::path::Path) -> std::path::PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    std::path::PathBuf::from(o)
}
