//! Manifest and project-file reconciliation for appx-prepare
//!
//! Reconciles a platform-independent application descriptor into the
//! two artifacts a Windows Store web-app project derives from it:
//!
//! 1. The XML application manifest (`package.appxmanifest`): identity,
//!    display names and a canonically ordered capability list.
//! 2. The MSBuild project file (`.jsproj`): the explicit list of
//!    bundled web-asset source entries.
//!
//! Both reconcilers are idempotent: applying them twice against an
//! unchanged config and filesystem produces byte-identical output on
//! the second pass. The [`sync::ProjectSync`] orchestrator sequences
//! them together with the icon copy, pre-package lifecycle hook, BOM
//! insertion and VCS cleanup collaborators.

pub mod assets;
pub mod config;
pub mod error;
pub mod hooks;
pub mod manifest;
pub mod project;
pub mod sources;
pub mod sync;
pub mod version;
mod xml;

pub use config::{AppConfig, ImageResource, ImageSet};
pub use error::{Error, Result};
pub use sync::{ProjectHandle, ProjectSync, SyncReport, TemplateKind};
pub use version::normalize_version;
