//! Application constants for trace loading
//!
//! Default values, column labels and MSP field prefixes used throughout
//! the crate.

// =============================================================================
// Loader Defaults
// =============================================================================

/// Number of leading lines inspected when inferring the field separator
pub const DEFAULT_SAMPLE_LINES: usize = 5;

/// Starting row capacity of the column buffer
///
/// Typical UV traces carry a few hundred to a few thousand points, so this
/// avoids most early reallocations.
pub const DEFAULT_INITIAL_CAPACITY: usize = 1000;

// =============================================================================
// Column Labels
// =============================================================================

/// Label for the first (position) column when handed to a tabular host
pub const POSITION_COLUMN: &str = "Time (min)";

/// Label for the last (value) column when handed to a tabular host
pub const VALUE_COLUMN: &str = "Value (mAU)";

// =============================================================================
// MSP Spectral Library Format
// =============================================================================

/// Prefix that opens a new library entry
pub const MSP_NAME_PREFIX: &str = "Name: ";

/// Prefix of the line announcing the peak list
pub const MSP_NUM_PEAKS_PREFIX: &str = "Num Peaks: ";

/// Separator between a metadata key and its value
pub const MSP_FIELD_SEPARATOR: &str = ": ";

// =============================================================================
// Input Discovery
// =============================================================================

/// File extensions picked up when a directory is given to the CLI
pub const TRACE_FILE_EXTENSIONS: &[&str] = &["csv", "txt", "tsv", "dat", "arw"];
