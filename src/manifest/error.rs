use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("malformed manifest XML at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("manifest ended before `<{element}>` was closed")]
    UnexpectedEof { element: String },

    #[error("manifest has no `<{element}>` element")]
    MissingElement { element: &'static str },

    #[error("manifest declares more than one `<{element}>` element")]
    DuplicateElement { element: &'static str },

    #[error("failed to serialize manifest: {message}")]
    Write { message: String },

    #[error("manifest is not valid UTF-8 after rewriting")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

impl ManifestError {
    pub(super) fn xml(position: u64, source: impl Into<quick_xml::Error>) -> Self {
        ManifestError::Xml {
            position,
            source: source.into(),
        }
    }

    pub(super) fn write(err: impl std::fmt::Display) -> Self {
        ManifestError::Write {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ManifestError>;
