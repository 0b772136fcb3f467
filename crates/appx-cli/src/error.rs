//! Error types for the appx-prep CLI

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] appx_core::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
