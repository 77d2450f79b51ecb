use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Fatal conditions of a generation run. None of them leave output behind.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Reading tabular source {path:?}: {message}")]
    SourceRead { path: PathBuf, message: String },
    #[error("Rendering template: {0}")]
    Template(String),
    #[error("Writing output {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn source_read(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::SourceRead {
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
