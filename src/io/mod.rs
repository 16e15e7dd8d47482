pub mod assignment_io;
pub mod roster_io;

use std::io::{self, Write};
use std::path::Path;

use log::debug;
use tempfile::NamedTempFile;

/// Writes through a sibling temp file so a crash never leaves a half-written
/// assignments file behind.
pub(crate) fn atomic_write_string(path: &Path, content: &str) -> io::Result<()> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.as_file().sync_all()?;

    match temp_file.persist(path) {
        Ok(_) => Ok(()),
        Err(err) => {
            if err.error.kind() == io::ErrorKind::AlreadyExists {
                debug!("replacing {} in place", path.display());
                std::fs::remove_file(path)?;
                err.file.persist(path).map(|_| ()).map_err(|e| e.error)
            } else {
                Err(err.error)
            }
        }
    }
}
