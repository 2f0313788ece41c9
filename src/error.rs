//! Library error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::surface::ElementId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse page config {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid page config: {0}")]
    Config(String),

    #[error("unknown element {0}")]
    UnknownElement(ElementId),
}

pub type Result<T> = std::result::Result<T, Error>;
