//! Recursive content-tree listing
//!
//! Produces the flat list of relative file paths that the source-list
//! reconciler mirrors into the project file. The listing is recomputed
//! in full on every call; nothing is cached across runs.

use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Directory names holding version-control metadata. These are never
/// part of the bundled content tree.
pub const VCS_DIRS: &[&str] = &[".svn", ".git"];

/// Returns true for a directory name that holds VCS metadata.
pub fn is_vcs_dir(name: &str) -> bool {
    VCS_DIRS.contains(&name)
}

/// List every regular file under `dir`, recursively, as
/// `name/<relative path>` strings with forward slashes.
///
/// VCS metadata directories are skipped entirely. Entries that are
/// neither regular files nor traversable directories (sockets, FIFOs,
/// symlinks) are silently omitted. Entries within each directory are
/// visited in file-name order so the listing is reproducible.
pub fn folder_contents(name: &str, dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Err(Error::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut entries: Vec<fs::DirEntry> = fs::read_dir(dir)
        .map_err(|e| Error::io(dir, e))?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| Error::io(dir, e))?;
    entries.sort_by_key(|e| e.file_name());

    let mut results = Vec::new();
    for entry in entries {
        let file_type = entry
            .file_type()
            .map_err(|e| Error::io(entry.path(), e))?;
        let file_name = entry.file_name().to_string_lossy().into_owned();

        if file_type.is_dir() {
            if is_vcs_dir(&file_name) {
                tracing::debug!(dir = %entry.path().display(), "skipping VCS metadata directory");
                continue;
            }
            let sub = folder_contents(&format!("{}/{}", name, file_name), &entry.path())?;
            results.extend(sub);
        } else if file_type.is_file() {
            results.push(format!("{}/{}", name, file_name));
        }
        // Sockets, FIFOs and symlinks are omitted from the listing.
    }

    Ok(results)
}
