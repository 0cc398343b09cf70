use std::path::PathBuf;
use thiserror::Error;

use crate::llm::GatewayError;

/// Failures while reading the static content directory. Always fatal at startup.
#[derive(Debug, Error)]
pub enum ContentLoadError {
    #[error("content directory not found: {0}")]
    MissingDirectory(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed student profile {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no student profiles found in {0}")]
    EmptyRoster(PathBuf),
}

/// Failures reading or writing a save file.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save file I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt save file {path}: {source}")]
    CorruptSave {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors surfaced by the game engine.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Save(#[from] SaveError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("failed to write run artifact {path}: {source}")]
    Artifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no known student with id '{0}'")]
    UnknownStudent(String),

    #[error("the game is over; no further actions are accepted")]
    Finished,
}

pub type GameResult<T> = Result<T, GameError>;
