//! Loader configuration and validation.
//!
//! Defaults reproduce the reference behavior: a five-line detection window,
//! a 1000-row starting buffer and automatic separator detection.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{DEFAULT_INITIAL_CAPACITY, DEFAULT_SAMPLE_LINES};
use crate::delimiter::Delimiter;
use crate::error::{Result, TraceError};

/// Settings for [`crate::loader::TableLoader`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Lines inspected when inferring the separator
    pub sample_lines: usize,

    /// Starting row capacity of the column buffer
    pub initial_capacity: usize,

    /// Fixed separator; skips detection when set
    pub delimiter: Option<Delimiter>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            sample_lines: DEFAULT_SAMPLE_LINES,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            delimiter: None,
        }
    }
}

impl LoaderConfig {
    /// Create configuration with a custom detection window
    pub fn with_sample_lines(mut self, sample_lines: usize) -> Self {
        self.sample_lines = sample_lines;
        self
    }

    /// Create configuration with a custom starting buffer size
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Create configuration that always splits on `delimiter`
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Check values before any file is touched
    pub fn validate(&self) -> Result<()> {
        if self.sample_lines == 0 && self.delimiter.is_none() {
            return Err(TraceError::configuration(
                "sample_lines must be at least 1 when no delimiter is fixed",
            ));
        }
        if self.initial_capacity == 0 {
            return Err(TraceError::configuration(
                "initial_capacity must be at least 1",
            ));
        }

        debug!(
            "Loader config: sample_lines={}, initial_capacity={}, delimiter={:?}",
            self.sample_lines, self.initial_capacity, self.delimiter
        );
        Ok(())
    }
}
