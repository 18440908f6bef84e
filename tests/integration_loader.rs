//! Integration tests for trace loading through the public API
//!
//! Each test writes a realistic instrument export to a temporary file and
//! loads it end to end.

use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use trace_loader::{
    BatchLoader, Delimiter, LoaderConfig, MspLibrary, TableLoader, TraceError, extract_name,
    load_table, parse_numeric,
};

fn write_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Test a tab-separated UV export with a multi-line preamble
///
/// Purpose: Validate that metadata and header lines are skipped like malformed rows
/// Benefit: Instrument exports load without any format configuration
#[test]
fn test_uv_export_with_preamble() {
    let file = write_file(
        "Sample\tSTMIX_5uM\n\
         Detector\tDAD 254 nm\n\
         Time (min)\tStep (s)\tValue (mAU)\n\
         0.000\t0.4\t-0.0123\n\
         0.007\t0.4\t0.0456\n\
         0.013\t0.4\t1.25e1\n",
    );

    let loaded = TableLoader::default().load(file.path()).unwrap();
    assert_eq!(loaded.stats.delimiter, Some(Delimiter::Tab));
    assert_eq!(loaded.table.positions(), &[0.0, 0.007, 0.013]);
    assert_eq!(loaded.table.values(), &[-0.0123, 0.0456, 12.5]);
    assert_eq!(loaded.stats.rows_rejected, 3);
    assert_eq!(loaded.stats.lines_read, 6);
}

/// Test that row count equals the number of lines with two valid numbers
///
/// Purpose: Validate counting and buffer growth across a file larger than the initial capacity
/// Benefit: Corrupt rows scattered through long runs never shift or drop good rows
#[test]
fn test_row_count_matches_valid_lines() {
    let mut contents = String::from("time,signal\n");
    let mut expected = 0;
    for i in 0..2500 {
        if i % 7 == 0 {
            contents.push_str("corrupt,row\n");
        } else {
            contents.push_str(&format!("{},{}\n", i as f64 / 100.0, i));
            expected += 1;
        }
    }
    let file = write_file(&contents);

    let loaded = TableLoader::default().load(file.path()).unwrap();
    assert_eq!(loaded.table.len(), expected);
    assert_eq!(loaded.table.positions().len(), loaded.table.values().len());
    // 1000 -> 2000 -> 4000
    assert_eq!(loaded.stats.capacity_doublings, 2);
}

/// Test each separator is detected when used consistently
///
/// Purpose: Validate comma, tab and space exports load without configuration
/// Benefit: Files from different instrument vendors share one code path
#[test]
fn test_consistent_separators_detected() {
    for (separator, delimiter) in [
        (",", Delimiter::Comma),
        ("\t", Delimiter::Tab),
        (" ", Delimiter::Space),
    ] {
        let contents = format!("1.0{0}10\n2.0{0}20\n3.0{0}30\n", separator);
        let file = write_file(&contents);
        let loaded = TableLoader::default().load(file.path()).unwrap();
        assert_eq!(loaded.stats.delimiter, Some(delimiter));
        assert_eq!(loaded.table.values(), &[10.0, 20.0, 30.0]);
    }
}

/// Test that the degenerate single-column case is accepted
///
/// Purpose: Validate that one field serves as both position and value
/// Benefit: Single-column exports still produce a usable table
#[test]
fn test_single_column_file() {
    let file = write_file("42.0\n43.5\n");
    let table = load_table(file.path()).unwrap();
    assert_eq!(
        table.rows().collect::<Vec<_>>(),
        vec![(42.0, 42.0), (43.5, 43.5)]
    );
}

/// Test that a missing file surfaces as a source error
///
/// Purpose: Validate the error kind returned for an unopenable path
/// Benefit: Callers can tell missing input apart from memory exhaustion
#[test]
fn test_missing_file() {
    let err = load_table(&PathBuf::from("/no/such/dir/trace.csv")).unwrap_err();
    assert!(matches!(err, TraceError::SourceUnavailable { .. }));
}

/// Test that independent loads share no state across threads
///
/// Purpose: Validate one loader serving concurrent loads with different separators
/// Benefit: Hosts can fan out loads without cloning or locking the loader
#[test]
fn test_parallel_loads_are_independent() {
    let comma = write_file("0,1\n1,2\n2,3\n");
    let space = write_file("0 5\n1 6\n");
    let loader = TableLoader::new(LoaderConfig::default().with_initial_capacity(1));

    std::thread::scope(|scope| {
        let a = scope.spawn(|| loader.load(comma.path()).unwrap());
        let b = scope.spawn(|| loader.load(space.path()).unwrap());
        let (a, b) = (a.join().unwrap(), b.join().unwrap());

        assert_eq!(a.stats.delimiter, Some(Delimiter::Comma));
        assert_eq!(a.table.values(), &[1.0, 2.0, 3.0]);
        assert_eq!(b.stats.delimiter, Some(Delimiter::Space));
        assert_eq!(b.table.values(), &[5.0, 6.0]);
    });
}

/// Test batch loading over a mix of good and missing files
///
/// Purpose: Validate that one failure is reported without stopping the batch
/// Benefit: A directory load reports every file it could read
#[tokio::test]
async fn test_batch_loader_reports_each_file() {
    let good = write_file("t,v\n0.1,7\n");
    let paths = vec![good.path().to_path_buf(), PathBuf::from("/no/such/trace.txt")];

    let outcomes = BatchLoader::new(TableLoader::default(), 2)
        .load_all(paths, |_| {})
        .await;

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].result.as_ref().unwrap().table.len(), 1);
    assert!(outcomes[1].result.is_err());
}

/// Test the standalone line helpers used for library scanning
///
/// Purpose: Validate name extraction and permissive numeric parsing on single lines
/// Benefit: Library scanners can reuse the same primitives as the loader
#[test]
fn test_line_helpers() {
    assert_eq!(extract_name("Name: Caffeine\n"), Some("Caffeine"));
    assert_eq!(extract_name("Other: x"), None);
    assert_eq!(parse_numeric("12.5abc"), Some(12.5));
    assert_eq!(parse_numeric("abc"), None);
    assert_eq!(parse_numeric(""), None);
}

/// Test indexing an MSP library file end to end
///
/// Purpose: Validate metadata, peaks and name lookup from a file on disk
/// Benefit: Spectral matches can fetch reference peaks by compound name
#[test]
fn test_msp_library_file() {
    let file = write_file(
        "Name: Caffeine\n\
         Synon: 1,3,7-Trimethylxanthine\n\
         PrecursorMZ: 195.0877\n\
         Num Peaks: 2\n\
         138.0662 100\n\
         195.0877 45.2\n\
         \n\
         Name: Paraxanthine\n\
         Num Peaks: 1\n\
         181.0720\t100\n",
    );

    let library = MspLibrary::load(file.path()).unwrap();
    assert_eq!(library.len(), 2);

    let caffeine = library.get("Caffeine").unwrap();
    assert_eq!(caffeine.field("Synon"), Some("1,3,7-Trimethylxanthine"));
    assert_eq!(caffeine.peaks.len(), 2);
    assert_eq!(
        library.get("Paraxanthine").unwrap().peaks.positions(),
        &[181.0720]
    );
}
