//! Error taxonomy shared by the generators, the colony and the file formats.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A board cannot be built with the requested parameters.
    #[error("invalid instance: {0}")]
    InvalidInstance(String),

    /// The distance mode is not one of the known metrics.
    #[error("unsupported distance metric: {0}")]
    UnsupportedMetric(String),

    /// An ant ran out of unvisited holes before closing its tour.
    #[error("ant {ant} deadlocked at step {step}: no hole can be selected")]
    DeadlockedAgent { ant: usize, step: usize },

    /// An ant closed a route that is not a permutation of the holes.
    #[error("ant {ant} produced a route that is not a permutation of the holes")]
    InvalidRoute { ant: usize },

    /// Invalid engine parameters.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("cannot access {path:?}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed file {path:?} at line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The exact oracle cannot handle the instance.
    #[error("exact solver unavailable: {0}")]
    OracleUnavailable(String),
}

impl Error {
    pub fn persistence<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Error::Persistence {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse<P: Into<PathBuf>>(path: P, line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
