use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::manifest::ManifestError;
use crate::prerequisites::PrerequisiteError;

pub type Result<T> = std::result::Result<T, ScaffoldError>;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("failed to read manifest `{}`: {source}", .path.display())]
    ReadManifest { path: PathBuf, source: io::Error },

    #[error("invalid manifest `{}`: {source}", .path.display())]
    InvalidManifest {
        path: PathBuf,
        source: ManifestError,
    },

    #[error("failed to write `{}`: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to render `{}`: {source}", .path.display())]
    Render {
        path: PathBuf,
        source: askama::Error,
    },

    #[error(transparent)]
    Prerequisites(#[from] PrerequisiteError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ScaffoldError {
    pub(crate) fn write(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| ScaffoldError::Write { path, source }
    }
}
