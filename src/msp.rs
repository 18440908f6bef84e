//! MSP spectral library reading.
//!
//! An MSP library is a run of blank-line separated entries:
//!
//! ```text
//! Name: Caffeine
//! Precursor_type: [M+H]+
//! PrecursorMZ: 195.0877
//! Num Peaks: 2
//! 138.0662 100
//! 195.0877 45.2
//! ```
//!
//! Entries are indexed by compound name in file order. Metadata lines are kept
//! as `(key, value)` pairs and peak lines become a two-column [`Table`] of
//! m/z and intensity.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::buffer::ColumnBuffer;
use crate::constants::{MSP_FIELD_SEPARATOR, MSP_NUM_PEAKS_PREFIX};
use crate::error::{Result, TraceError};
use crate::label::{extract_label, extract_name};
use crate::models::Table;
use crate::numeric::parse_numeric;

/// Starting peak capacity of each entry
const DEFAULT_PEAK_CAPACITY: usize = 16;

/// One library spectrum
#[derive(Debug, Clone, PartialEq)]
pub struct MspEntry {
    pub name: String,
    /// Header fields in file order, `Num Peaks` included
    pub metadata: Vec<(String, String)>,
    /// m/z in positions, intensity in values
    pub peaks: Table,
}

impl MspEntry {
    /// First metadata value stored under `key`
    pub fn field(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Peak count announced by the entry, which may differ from `peaks.len()`
    pub fn num_peaks_declared(&self) -> Option<usize> {
        self.field("Num Peaks")?.trim().parse().ok()
    }

    pub fn precursor_mz(&self) -> Option<f64> {
        self.field("PrecursorMZ").and_then(parse_numeric)
    }
}

/// Name-indexed collection of library spectra
#[derive(Debug, Clone, Default)]
pub struct MspLibrary {
    entries: IndexMap<String, MspEntry>,
}

impl MspLibrary {
    /// Read and index the library at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| TraceError::source_unavailable(path, e))?;
        let library = Self::read(BufReader::new(file), path)?;
        debug!(
            "Indexed {} MSP entries from {}",
            library.len(),
            path.display()
        );
        Ok(library)
    }

    /// Read and index a library from any buffered reader
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        Self::read(reader, Path::new("<reader>"))
    }

    pub fn get(&self, name: &str) -> Option<&MspEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compound names in file order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = &MspEntry> {
        self.entries.values()
    }

    fn read<R: BufRead>(mut reader: R, source: &Path) -> Result<Self> {
        let mut library = Self::default();
        let mut current: Option<EntryBuilder> = None;
        let mut raw = Vec::new();

        loop {
            raw.clear();
            let n = reader
                .read_until(b'\n', &mut raw)
                .map_err(|e| TraceError::source_unavailable(source, e))?;
            if n == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&raw);

            if let Some(name) = extract_name(&line) {
                if let Some(done) = current.take() {
                    library.insert(done.build());
                }
                current = Some(EntryBuilder::new(name)?);
                continue;
            }

            if line.trim().is_empty() {
                if let Some(done) = current.take() {
                    library.insert(done.build());
                }
                continue;
            }

            // Lines before the first entry are preamble
            if let Some(entry) = current.as_mut() {
                entry.add_line(&line)?;
            }
        }

        if let Some(done) = current.take() {
            library.insert(done.build());
        }
        Ok(library)
    }

    fn insert(&mut self, entry: MspEntry) {
        if self.entries.contains_key(&entry.name) {
            trace!("Replacing duplicate MSP entry '{}'", entry.name);
        }
        self.entries.insert(entry.name.clone(), entry);
    }
}

/// Entry under construction
struct EntryBuilder {
    name: String,
    metadata: Vec<(String, String)>,
    peaks: ColumnBuffer,
    in_peaks: bool,
}

impl EntryBuilder {
    fn new(name: &str) -> Result<Self> {
        Ok(Self {
            name: name.trim().to_string(),
            metadata: Vec::new(),
            peaks: ColumnBuffer::with_capacity(DEFAULT_PEAK_CAPACITY)?,
            in_peaks: false,
        })
    }

    fn add_line(&mut self, line: &str) -> Result<()> {
        if self.in_peaks {
            if let Some((mz, intensity)) = parse_peak(line) {
                self.peaks.push(mz, intensity)?;
            }
            return Ok(());
        }

        if let Some(count) = extract_label(line, MSP_NUM_PEAKS_PREFIX) {
            self.in_peaks = true;
            self.metadata
                .push(("Num Peaks".to_string(), count.trim().to_string()));
            return Ok(());
        }

        let line = line.trim_end_matches(['\n', '\r']);
        if let Some((key, value)) = line.split_once(MSP_FIELD_SEPARATOR) {
            self.metadata.push((key.to_string(), value.to_string()));
        }
        Ok(())
    }

    fn build(self) -> MspEntry {
        MspEntry {
            name: self.name,
            metadata: self.metadata,
            peaks: self.peaks.into_table(),
        }
    }
}

/// First two whitespace-separated numbers of a peak line
fn parse_peak(line: &str) -> Option<(f64, f64)> {
    let mut tokens = line.split_ascii_whitespace();
    let mz = parse_numeric(tokens.next()?)?;
    let intensity = parse_numeric(tokens.next()?)?;
    Some((mz, intensity))
}
