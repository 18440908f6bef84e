//! Core data structures for trace loading.
//!
//! Defines the two-column table handed back to callers and the diagnostic
//! statistics gathered while loading.

use serde::Serialize;
use std::path::PathBuf;

use crate::constants::{POSITION_COLUMN, VALUE_COLUMN};
use crate::delimiter::Delimiter;

/// Ordered pair of equal-length numeric columns
///
/// Row order is file order among accepted rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    positions: Vec<f64>,
    values: Vec<f64>,
}

impl Table {
    /// Build a table from two columns
    ///
    /// Returns `None` if the columns differ in length.
    pub fn from_columns(positions: Vec<f64>, values: Vec<f64>) -> Option<Self> {
        (positions.len() == values.len()).then_some(Self { positions, values })
    }

    /// Callers guarantee equal lengths
    pub(crate) fn from_parts(positions: Vec<f64>, values: Vec<f64>) -> Self {
        debug_assert_eq!(positions.len(), values.len());
        Self { positions, values }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// First column (retention time for chromatograms, m/z for spectra)
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Last column (detector response, intensity)
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterate rows as `(position, value)` pairs
    pub fn rows(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.positions.iter().copied().zip(self.values.iter().copied())
    }

    /// Hand both columns to the caller
    pub fn into_columns(self) -> (Vec<f64>, Vec<f64>) {
        (self.positions, self.values)
    }

    /// Column labels used when exposing the table to a tabular host
    pub fn column_names() -> [&'static str; 2] {
        [POSITION_COLUMN, VALUE_COLUMN]
    }
}

/// Diagnostics for one load
///
/// Rejected rows are only counted here, never reported individually.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    /// Lines read in the extraction pass
    pub lines_read: usize,
    /// Lines that became rows
    pub rows_accepted: usize,
    /// Lines skipped as headers or malformed data
    pub rows_rejected: usize,
    /// Separator used for extraction
    pub delimiter: Option<Delimiter>,
    /// Times the column buffer doubled its capacity
    pub capacity_doublings: usize,
}

impl LoadStats {
    /// Share of lines that became rows, as a percentage
    pub fn acceptance_rate(&self) -> f64 {
        if self.lines_read == 0 {
            0.0
        } else {
            (self.rows_accepted as f64 / self.lines_read as f64) * 100.0
        }
    }
}

/// Table plus the statistics gathered while loading it
#[derive(Debug, Clone)]
pub struct LoadResult {
    pub table: Table,
    pub stats: LoadStats,
}

/// Outcome of loading one file in a batch
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: crate::error::Result<LoadResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_columns_requires_equal_length() {
        assert!(Table::from_columns(vec![1.0, 2.0], vec![3.0]).is_none());
        let table = Table::from_columns(vec![1.0, 2.0], vec![3.0, 4.0]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows().collect::<Vec<_>>(), vec![(1.0, 3.0), (2.0, 4.0)]);
    }

    #[test]
    fn test_into_columns() {
        let table = Table::from_columns(vec![0.5], vec![9.0]).unwrap();
        let (positions, values) = table.into_columns();
        assert_eq!(positions, vec![0.5]);
        assert_eq!(values, vec![9.0]);
    }

    #[test]
    fn test_acceptance_rate() {
        let stats = LoadStats {
            lines_read: 4,
            rows_accepted: 3,
            rows_rejected: 1,
            ..Default::default()
        };
        assert_eq!(stats.acceptance_rate(), 75.0);
        assert_eq!(LoadStats::default().acceptance_rate(), 0.0);
    }

    #[test]
    fn test_column_names() {
        assert_eq!(Table::column_names(), ["Time (min)", "Value (mAU)"]);
    }
}
