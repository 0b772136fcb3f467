//! Source-list reconciliation
//!
//! Mirrors the content tree under the web-asset root into the project
//! file's source entries: stale entries under the root prefix are
//! removed (whatever their casing or build-variable prefix), then the
//! freshly computed listing is inserted. Running twice against an
//! unchanged tree produces an identical entry set.

use std::path::Path;

use regex::Regex;

use crate::error::Result;
use crate::project::ProjectDocument;

/// Pattern matching any source entry a prior reconciliation could have
/// produced for `root_name`: case-insensitive, tolerating an optional
/// `$(MSBuildThisFileDirectory)` prefix and either path separator.
pub fn stale_entry_pattern(root_name: &str) -> Regex {
    let pattern = format!(
        r"(?i)^(?:\$\(MSBuildThisFileDirectory\))?{}[\\/]",
        regex::escape(root_name)
    );
    Regex::new(&pattern).expect("escaped prefix is a valid pattern")
}

/// Reconcile the project file's source entries with the content tree
/// under `root_dir`, listed as `root_name/<relative path>`.
pub fn reconcile(project_file: &Path, root_name: &str, root_dir: &Path) -> Result<()> {
    let mut project = ProjectDocument::load(project_file)?;

    let removed = project.remove_source_entries(&stale_entry_pattern(root_name));
    let listing = appx_fs::folder_contents(root_name, root_dir)?;
    tracing::debug!(
        removed,
        inserted = listing.len(),
        project = %project_file.display(),
        "reconciling source entries"
    );

    project.add_source_entries(listing);
    project.save()?;

    tracing::info!(project = %project_file.display(), "source list reconciled");
    Ok(())
}
