//! Per-project sync orchestration
//!
//! Sequences one prepare run: config guard → manifest + icon work for
//! legacy-template projects → pre-package hook → source-list
//! reconciliation → BOM insertion and VCS cleanup. Strictly
//! single-threaded and sequential; every step fully completes (or
//! fails the run) before the next begins.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assets;
use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::hooks::{HookEvent, HookPayload, HookRunner};
use crate::manifest;
use crate::sources;

/// Platform tag used for icon/splash selection and hook payloads.
pub const PLATFORM_TAG: &str = "windows";

/// Name of the web-asset root inside the platform project.
pub const ASSET_ROOT_NAME: &str = "www";

/// Which project template generation the platform directory holds.
///
/// Decided once at discovery and stored on the handle; never
/// re-derived per call. The modern template reads identity from the
/// shared project items file, so manifest reconciliation and the icon
/// copy are skipped entirely for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateKind {
    /// Old-style `.jsproj` project with its own `package.appxmanifest`.
    Legacy,
    /// Universal project identified by a `.projitems` file.
    Modern,
}

/// Handle to one discovered platform project.
#[derive(Debug, Clone)]
pub struct ProjectHandle {
    root: PathBuf,
    project_file: PathBuf,
    template: TemplateKind,
}

impl ProjectHandle {
    /// Inspect `root` and classify the project template.
    ///
    /// A `.projitems` file marks the modern template; failing that, a
    /// `.jsproj` file marks the legacy one. Neither present means the
    /// directory is not a recognizable platform project.
    pub fn discover(root: &Path) -> Result<Self> {
        if let Some(project_file) = find_by_extension(root, "projitems")? {
            return Ok(Self {
                root: root.to_path_buf(),
                project_file,
                template: TemplateKind::Modern,
            });
        }
        if let Some(project_file) = find_by_extension(root, "jsproj")? {
            return Ok(Self {
                root: root.to_path_buf(),
                project_file,
                template: TemplateKind::Legacy,
            });
        }
        Err(Error::ProjectNotFound {
            path: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn project_file(&self) -> &Path {
        &self.project_file
    }

    pub fn template(&self) -> TemplateKind {
        self.template
    }

    /// The platform-local web-asset root this sync owns.
    pub fn www_dir(&self) -> PathBuf {
        self.root.join(ASSET_ROOT_NAME)
    }

    /// Manifest location; only meaningful for the legacy template.
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join("package.appxmanifest")
    }
}

/// Case-insensitive extension match over the directory's entries, in
/// name order so discovery is deterministic.
fn find_by_extension(root: &Path, extension: &str) -> Result<Option<PathBuf>> {
    let mut entries: Vec<fs::DirEntry> = fs::read_dir(root)
        .map_err(|_| Error::ProjectNotFound {
            path: root.to_path_buf(),
        })
        .and_then(|iter| {
            iter.collect::<std::io::Result<Vec<_>>>()
                .map_err(Error::from)
        })?;
    entries.sort_by_key(|e| e.file_name());

    Ok(entries
        .into_iter()
        .map(|entry| entry.path())
        .find(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
        }))
}

/// Report of one completed sync run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    pub success: bool,
    pub actions: Vec<String>,
}

impl SyncReport {
    fn new() -> Self {
        Self {
            success: true,
            actions: Vec::new(),
        }
    }

    fn record(&mut self, action: impl Into<String>) {
        self.actions.push(action.into());
    }
}

/// Orchestrates one prepare run against a discovered project.
pub struct ProjectSync {
    handle: ProjectHandle,
    app_root: PathBuf,
    hooks: HookRunner,
}

impl ProjectSync {
    /// `app_root` is the application directory holding the descriptor,
    /// source images and the `hooks/` directory.
    pub fn new(handle: ProjectHandle, app_root: &Path) -> Self {
        Self {
            handle,
            app_root: app_root.to_path_buf(),
            hooks: HookRunner::new(app_root),
        }
    }

    /// Run the full sync sequence for `config`.
    ///
    /// The config guard and the manifest/icon work run before the
    /// pre-package hook; any failure there aborts the run without the
    /// hook or the file-list steps ever executing. A hook rejection is
    /// propagated as the run's own failure.
    pub fn sync(&self, config: &AppConfig) -> Result<SyncReport> {
        config.validate()?;

        let mut report = SyncReport::new();
        let www = self.handle.www_dir();

        match self.handle.template() {
            TemplateKind::Legacy => {
                manifest::reconcile(&self.handle.manifest_path(), config)?;
                report.record("reconciled package.appxmanifest");

                assets::copy_icons(
                    &config.icons(PLATFORM_TAG),
                    &self.app_root,
                    self.handle.root(),
                )?;
                assets::copy_splash(
                    &config.splash_screens(PLATFORM_TAG),
                    &self.app_root,
                    self.handle.root(),
                )?;
                report.record("copied icon and splash assets");
            }
            TemplateKind::Modern => {
                tracing::debug!("modern template: manifest reconciliation skipped");
                report.record("skipped manifest reconciliation (modern template)");
            }
        }

        let payload = HookPayload {
            asset_root: www.clone(),
            platforms: vec![PLATFORM_TAG.to_string()],
        };
        let hook_results = self.hooks.fire(HookEvent::PrePackage, &payload)?;
        if !hook_results.is_empty() {
            report.record(format!("ran {} pre-package hook(s)", hook_results.len()));
        }

        sources::reconcile(self.handle.project_file(), ASSET_ROOT_NAME, &www)?;
        report.record("reconciled project source entries");

        let marked = appx_fs::bom::add_bom_tree(&www)?;
        if marked > 0 {
            report.record(format!("added BOM to {marked} file(s)"));
        }

        let removed = appx_fs::vcs::remove_vcs_dirs(&www)?;
        if removed > 0 {
            report.record(format!("removed {removed} VCS metadata folder(s)"));
        }

        tracing::info!(project = %self.handle.root().display(), "project sync complete");
        Ok(report)
    }
}
