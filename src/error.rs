//! Error handling for trace loading operations.
//!
//! Only fatal conditions are errors. Rows that fail to parse are skipped by
//! the loader and never surface here.

use std::collections::TryReserveError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Source unavailable: {path} - {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Resource exhausted: could not grow column buffer to {requested} rows")]
    ResourceExhausted {
        requested: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl TraceError {
    /// Create a source error for a path that could not be opened or read
    pub fn source_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SourceUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True for failures caused by the input source rather than by memory or config
    pub fn is_source_error(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. })
    }
}

pub type Result<T> = std::result::Result<T, TraceError>;
