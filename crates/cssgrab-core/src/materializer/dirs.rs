//! Create-if-missing for destination directories.

use std::fs;
use std::io;
use std::path::Path;

/// Creates `path`, creating missing parents first. An existing path counts as
/// success. Any other OS error is returned.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    match create_one(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && parent != path => {
                ensure_dir(parent)?;
                match create_one(path) {
                    Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
                    other => other,
                }
            }
            _ => Err(e),
        },
        Err(e) => Err(e),
    }
}

/// Single `mkdir` with permissive mode (umask still applies).
fn create_one(path: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o777);
    }
    builder.create(path)
}
