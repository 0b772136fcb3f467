//! Error types for appx-core

use std::path::PathBuf;

/// Result type for appx-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in appx-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The supplied descriptor fails config validation. Raised before
    /// any project file is touched; never retried.
    #[error("Invalid application config: {message}")]
    InvalidConfig { message: String },

    /// The manifest file could not be parsed as XML.
    #[error("Malformed manifest at {path}: {message}")]
    MalformedManifest { path: PathBuf, message: String },

    /// A node the manifest schema requires is absent.
    #[error("Invalid manifest structure: missing <{node}> node")]
    InvalidManifestStructure { node: String },

    /// The project file could not be parsed as an MSBuild document.
    #[error("Invalid project file at {path}: {message}")]
    InvalidProjectFile { path: PathBuf, message: String },

    /// No recognized project file in the platform directory.
    #[error("No project file found in {path}")]
    ProjectNotFound { path: PathBuf },

    /// A lifecycle hook exited with a failure; propagated verbatim.
    #[error("Hook {event} failed ({command}): {message}")]
    HookFailed {
        event: String,
        command: String,
        message: String,
    },

    /// A mutated document could not be serialized back to XML.
    #[error("XML serialization failed: {message}")]
    XmlWrite { message: String },

    /// Filesystem error from appx-fs
    #[error(transparent)]
    Fs(#[from] appx_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
