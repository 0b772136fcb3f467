//! Filesystem primitives for the appx-prepare pipeline
//!
//! Provides atomic whole-file-replace writes, recursive content-tree
//! listing, BOM insertion for store certification, and VCS metadata
//! cleanup. The reconcilers in `appx-core` treat this crate as their
//! only route to the filesystem.

pub mod bom;
pub mod error;
pub mod io;
pub mod vcs;
pub mod walk;

pub use error::{Error, Result};
pub use walk::folder_contents;
