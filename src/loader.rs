//! Two-column table loading.
//!
//! A load runs through `Opening -> DetectingDelimiter -> Parsing -> Done`,
//! or ends in `Failed` when the source cannot be opened or read or the
//! column buffer cannot grow. Header rows and malformed rows are skipped
//! silently: a non-numeric first field looks the same as a header, and both
//! are handled the same way.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;

use tracing::{debug, trace};

use crate::buffer::ColumnBuffer;
use crate::config::LoaderConfig;
use crate::delimiter::{Delimiter, detect_delimiter};
use crate::error::{Result, TraceError};
use crate::models::{LoadResult, LoadStats, Table};
use crate::numeric::parse_leading;
use crate::row::extract_row;

/// Stage of a single load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Opening,
    DetectingDelimiter,
    Parsing,
    Done,
    Failed,
}

impl LoadState {
    /// Final state of a load that stopped in `self` with `result`
    fn settle<T>(self, result: &Result<T>) -> LoadState {
        match result {
            Ok(_) => self,
            Err(_) => LoadState::Failed,
        }
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoadState::Opening => "opening",
            LoadState::DetectingDelimiter => "detecting delimiter",
            LoadState::Parsing => "parsing",
            LoadState::Done => "done",
            LoadState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Loader for delimiter-agnostic two-column trace files
///
/// Holds only configuration. Every call owns its own buffer and delimiter
/// choice, so one loader can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct TableLoader {
    config: LoaderConfig,
}

impl TableLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load the first and last numeric columns of the file at `path`
    pub fn load(&self, path: &Path) -> Result<LoadResult> {
        self.config.validate()?;

        let mut state = LoadState::Opening;
        let result = File::open(path)
            .map_err(|e| TraceError::source_unavailable(path, e))
            .and_then(|file| self.run(BufReader::new(file), path, &mut state));

        finish(path, state, result)
    }

    /// Load from any rewindable reader
    pub fn load_reader<R: BufRead + Seek>(&self, reader: R) -> Result<LoadResult> {
        self.config.validate()?;

        let source = Path::new("<reader>");
        let mut state = LoadState::Opening;
        let result = self.run(reader, source, &mut state);
        finish(source, state, result)
    }

    fn run<R: BufRead + Seek>(
        &self,
        mut reader: R,
        source: &Path,
        state: &mut LoadState,
    ) -> Result<LoadResult> {
        let read_error = |e| TraceError::source_unavailable(source, e);

        *state = LoadState::DetectingDelimiter;
        let delimiter = match self.config.delimiter {
            Some(fixed) => fixed,
            None => {
                let detected =
                    detect_delimiter(&mut reader, self.config.sample_lines).map_err(read_error)?;
                reader.rewind().map_err(read_error)?;
                detected
            }
        };

        *state = LoadState::Parsing;
        let mut buffer = ColumnBuffer::with_capacity(self.config.initial_capacity)?;
        let mut stats = LoadStats {
            delimiter: Some(delimiter),
            ..Default::default()
        };

        let mut line = Vec::with_capacity(1024);
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line).map_err(read_error)? == 0 {
                break;
            }
            stats.lines_read += 1;

            match parse_row(&line, delimiter) {
                Some((position, value)) => {
                    buffer.push(position, value)?;
                    stats.rows_accepted += 1;
                }
                None => {
                    stats.rows_rejected += 1;
                    trace!("Skipping line {} of {}", stats.lines_read, source.display());
                }
            }
        }

        stats.capacity_doublings = buffer.doublings();
        *state = LoadState::Done;

        Ok(LoadResult {
            table: buffer.into_table(),
            stats,
        })
    }
}

fn finish(source: &Path, state: LoadState, result: Result<LoadResult>) -> Result<LoadResult> {
    match &result {
        Ok(loaded) => debug!(
            "Loaded {}: {} rows accepted, {} skipped, delimiter={}",
            source.display(),
            loaded.stats.rows_accepted,
            loaded.stats.rows_rejected,
            loaded
                .stats
                .delimiter
                .map_or("none", Delimiter::name)
        ),
        Err(e) => debug!(
            "Load of {} {} while {}: {}",
            source.display(),
            state.settle(&result),
            state,
            e
        ),
    }
    result
}

/// Turn one raw line into a `(position, value)` row
///
/// Both the first and the last field must carry a number.
pub fn parse_row(line: &[u8], delimiter: Delimiter) -> Option<(f64, f64)> {
    let candidate = extract_row(line, delimiter)?;
    let position = parse_leading(candidate.position).get()?;
    let value = parse_leading(candidate.value).get()?;
    Some((position, value))
}

/// Load a trace file with default settings
pub fn load_table(path: &Path) -> Result<Table> {
    TableLoader::default().load(path).map(|loaded| loaded.table)
}
