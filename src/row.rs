//! Row field extraction.
//!
//! Splits a raw line on a single separator byte and hands back the first and
//! last fields as borrowed views. No quoting, no escaping; consecutive
//! separators produce empty fields.

use crate::delimiter::Delimiter;

/// Position/value candidate tokens carved from one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCandidate<'a> {
    /// First field
    pub position: &'a [u8],
    /// Last field (same as `position` for single-field lines)
    pub value: &'a [u8],
    /// Number of fields in the line, empty ones included
    pub field_count: usize,
}

impl RowCandidate<'_> {
    /// Single-field line, where both candidates are the same field
    pub fn is_degenerate(&self) -> bool {
        self.field_count == 1
    }
}

/// Remove a trailing `\n` or `\r\n`
pub fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Extract first/last field candidates from `line`
///
/// Returns `None` when the line has no extractable field: it is empty or
/// consists only of separators.
pub fn extract_row(line: &[u8], delimiter: Delimiter) -> Option<RowCandidate<'_>> {
    let line = strip_line_ending(line);
    let sep = delimiter.as_byte();

    if line.iter().all(|&b| b == sep) {
        return None;
    }

    let mut fields = line.split(|&b| b == sep);
    let position = fields.next()?;
    let mut value = position;
    let mut field_count = 1;
    for field in fields {
        value = field;
        field_count += 1;
    }

    Some(RowCandidate {
        position,
        value,
        field_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_and_last_fields() {
        let row = extract_row(b"1.5,,3.2,,7.8", Delimiter::Comma).unwrap();
        assert_eq!(row.position, b"1.5");
        assert_eq!(row.value, b"7.8");
        assert_eq!(row.field_count, 5);
    }

    #[test]
    fn test_single_field_is_degenerate() {
        let row = extract_row(b"42.0\n", Delimiter::Comma).unwrap();
        assert_eq!(row.position, b"42.0");
        assert_eq!(row.value, b"42.0");
        assert!(row.is_degenerate());
    }

    #[test]
    fn test_empty_and_separator_only_lines_rejected() {
        assert_eq!(extract_row(b"", Delimiter::Comma), None);
        assert_eq!(extract_row(b"\n", Delimiter::Comma), None);
        assert_eq!(extract_row(b"\r\n", Delimiter::Tab), None);
        assert_eq!(extract_row(b",,,\n", Delimiter::Comma), None);
        assert_eq!(extract_row(b"   ", Delimiter::Space), None);
    }

    #[test]
    fn test_line_ending_not_part_of_last_field() {
        let row = extract_row(b"0.01\t12.5\r\n", Delimiter::Tab).unwrap();
        assert_eq!(row.value, b"12.5");
    }

    #[test]
    fn test_trailing_separator_gives_empty_last_field() {
        let row = extract_row(b"1.0,2.0,", Delimiter::Comma).unwrap();
        assert_eq!(row.position, b"1.0");
        assert_eq!(row.value, b"");
    }

    #[test]
    fn test_other_separators_are_plain_text() {
        let row = extract_row(b"1.0 2.0\t3.0", Delimiter::Tab).unwrap();
        assert_eq!(row.position, b"1.0 2.0");
        assert_eq!(row.value, b"3.0");
    }

    #[test]
    fn test_strip_line_ending() {
        assert_eq!(strip_line_ending(b"a\r\n"), b"a");
        assert_eq!(strip_line_ending(b"a\n"), b"a");
        assert_eq!(strip_line_ending(b"a"), b"a");
    }
}
