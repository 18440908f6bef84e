//! Trace Loader Library
//!
//! Fast loading of two-column measurement traces (retention time against
//! detector response) from text exports whose separator is not known in
//! advance, plus a line tokenizer for MSP spectral libraries.
//!
//! This library provides tools for:
//! - Inferring the field separator (comma, tab or space) from the first lines
//! - Extracting the first and last numeric column of every row, skipping
//!   header and malformed rows
//! - Collecting rows in a paired, fallibly-growing column buffer
//! - Extracting prefix-labelled fields and bare numbers from single lines
//! - Indexing MSP spectral libraries by compound name
//!
//! ```no_run
//! use std::path::Path;
//! use trace_loader::{TableLoader, LoaderConfig};
//!
//! # fn example() -> trace_loader::Result<()> {
//! let loader = TableLoader::new(LoaderConfig::default());
//! let loaded = loader.load(Path::new("uv_trace.csv"))?;
//! println!(
//!     "{} rows, {} lines skipped",
//!     loaded.table.len(),
//!     loaded.stats.rows_rejected
//! );
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod buffer;
pub mod cli;
pub mod config;
pub mod constants;
pub mod delimiter;
pub mod error;
pub mod label;
pub mod loader;
pub mod models;
pub mod msp;
pub mod numeric;
pub mod row;

pub use batch::BatchLoader;
pub use buffer::ColumnBuffer;
pub use config::LoaderConfig;
pub use delimiter::{Delimiter, DelimiterDetector, detect_delimiter};
pub use error::{Result, TraceError};
pub use label::{extract_label, extract_name};
pub use loader::{LoadState, TableLoader, load_table, parse_row};
pub use models::{LoadResult, LoadStats, Table};
pub use msp::{MspEntry, MspLibrary};
pub use numeric::{NumericValue, parse_leading, parse_numeric};
pub use row::{RowCandidate, extract_row};
