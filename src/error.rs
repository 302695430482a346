//! Error types for the tetris crate

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for fallible tetris operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No platform config directory and none given on the command line
    #[error("no config directory available")]
    NoConfigDir,

    #[error("audio output unavailable: {0}")]
    AudioStream(#[from] rodio::StreamError),

    #[error("audio playback failed: {0}")]
    AudioPlay(#[from] rodio::PlayError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Error::Json { path: path.into(), source }
    }
}
