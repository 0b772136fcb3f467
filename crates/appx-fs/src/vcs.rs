//! VCS metadata folder cleanup
//!
//! The web-asset tree is fully owned by the sync; any version-control
//! metadata that got copied along with it is deleted before packaging.

use std::fs;
use std::path::Path;

use crate::walk::is_vcs_dir;
use crate::{Error, Result};

/// Recursively delete VCS metadata directories (`.svn`, `.git`) under
/// `root`. Returns the number of directories removed.
pub fn remove_vcs_dirs(root: &Path) -> Result<usize> {
    let mut removed = 0;

    for entry in fs::read_dir(root).map_err(|e| Error::io(root, e))? {
        let entry = entry.map_err(|e| Error::io(root, e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| Error::io(entry.path(), e))?;
        if !file_type.is_dir() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        if is_vcs_dir(&file_name) {
            fs::remove_dir_all(entry.path()).map_err(|e| Error::io(entry.path(), e))?;
            tracing::debug!(dir = %entry.path().display(), "removed VCS metadata directory");
            removed += 1;
        } else {
            removed += remove_vcs_dirs(&entry.path())?;
        }
    }

    Ok(removed)
}
